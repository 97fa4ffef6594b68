//! PowerPoint package
//!
//! 最小構成の PresentationML パッケージ（.pptx）を zip で書き出す。
//! スライドは 4:3、白紙レイアウトにタイトル・凡例・グラフ画像・表を配置する

use anyhow::{Context, Result};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 1インチ（EMU）
pub const EMU_PER_INCH: i64 = 914_400;

const SLIDE_WIDTH: i64 = 10 * EMU_PER_INCH;
const SLIDE_HEIGHT: i64 = 7 * EMU_PER_INCH + EMU_PER_INCH / 2;

const CONTENT_LEFT: i64 = EMU_PER_INCH / 2;
const CONTENT_WIDTH: i64 = 9 * EMU_PER_INCH;

/// グラフ画像（18:8）
const CHART_TOP: i64 = EMU_PER_INCH / 2;
const CHART_HEIGHT: i64 = CONTENT_WIDTH * 8 / 18;

/// 表
const TABLE_TOP: i64 = 4_069_080;
const TABLE_HEIGHT: i64 = 3 * EMU_PER_INCH;

const HEADER_FONT_SIZE: u32 = 1000;
const BODY_FONT_SIZE: u32 = 800;
const TITLE_FONT_SIZE: u32 = 1800;
const LEGEND_FONT_SIZE: u32 = 1200;
const AXES_FONT_SIZE: u32 = 900;

/// Medium Style 2 - Accent 1
const TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// スライド1枚分の素材
#[derive(Debug, Clone)]
pub struct SlidePart {
    pub title: String,
    /// (ラベル, RRGGBB)
    pub legend: Vec<(String, String)>,
    /// 軸名（凡例の後ろに表示）
    pub axes: String,
    pub chart_png: Vec<u8>,
    /// 先頭行がヘッダ
    pub table: Vec<Vec<String>>,
}

/// プレゼンテーション全体
#[derive(Debug, Clone)]
pub struct PresentationPackage {
    title: String,
    slides: Vec<SlidePart>,
}

impl PresentationPackage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn add_slide(&mut self, slide: SlidePart) {
        self.slides.push(slide);
    }

    /// パッケージを書き出す
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut parts: Vec<(String, Vec<u8>)> = vec![
            ("[Content_Types].xml".into(), self.content_types().into_bytes()),
            ("_rels/.rels".into(), package_rels().into_bytes()),
            ("docProps/core.xml".into(), self.core_props().into_bytes()),
            ("docProps/app.xml".into(), self.app_props().into_bytes()),
            ("ppt/presentation.xml".into(), self.presentation().into_bytes()),
            ("ppt/_rels/presentation.xml.rels".into(), self.presentation_rels().into_bytes()),
            ("ppt/tableStyles.xml".into(), table_styles().into_bytes()),
            ("ppt/slideMasters/slideMaster1.xml".into(), slide_master().into_bytes()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".into(),
                slide_master_rels().into_bytes(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml".into(), slide_layout().into_bytes()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels".into(),
                slide_layout_rels().into_bytes(),
            ),
            ("ppt/theme/theme1.xml".into(), theme().into_bytes()),
        ];

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            parts.push((format!("ppt/slides/slide{}.xml", n), slide_xml(slide).into_bytes()));
            parts.push((format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(n).into_bytes()));
            parts.push((format!("ppt/media/image{}.png", n), slide.chart_png.clone()));
        }

        for (name, data) in parts {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("Failed to add {} to presentation", name))?;
            zip.write_all(&data)?;
        }
        zip.finish().context("Failed to finish presentation package")?;
        Ok(())
    }

    fn content_types(&self) -> String {
        let mut xml = format!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/>"#,
            XML_DECL
        );
        let overrides = [
            ("/ppt/presentation.xml", "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
            ("/ppt/tableStyles.xml", "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"),
            ("/ppt/slideMasters/slideMaster1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
            ("/ppt/slideLayouts/slideLayout1.xml", "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
            ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml"),
            ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
            ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
        ];
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        for n in 1..=self.slides.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                n
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn core_props(&self) -> String {
        format!(
            r#"{}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>{}</dc:creator></cp:coreProperties>"#,
            XML_DECL,
            xml_escape(&self.title),
            env!("CARGO_PKG_NAME")
        )
    }

    fn app_props(&self) -> String {
        format!(
            r#"{}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{}</Application><Slides>{}</Slides></Properties>"#,
            XML_DECL,
            env!("CARGO_PKG_NAME"),
            self.slides.len()
        )
    }

    fn presentation(&self) -> String {
        let slide_ids: String = (0..self.slides.len())
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 4))
            .collect();
        let slide_list = if slide_ids.is_empty() {
            String::new()
        } else {
            format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids)
        };
        format!(
            r#"{}<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="{}" cy="{}" type="screen4x3"/><p:notesSz cx="{}" cy="{}"/></p:presentation>"#,
            XML_DECL, NS_A, NS_R, NS_P, slide_list, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn presentation_rels(&self) -> String {
        let mut rels = vec![
            relationship(1, "slideMaster", "slideMasters/slideMaster1.xml"),
            relationship(2, "tableStyles", "tableStyles.xml"),
            relationship(3, "theme", "theme/theme1.xml"),
        ];
        for n in 1..=self.slides.len() {
            rels.push(relationship(n + 3, "slide", &format!("slides/slide{}.xml", n)));
        }
        relationships(&rels)
    }
}

fn relationship(id: usize, kind: &str, target: &str) -> String {
    format!(
        r#"<Relationship Id="rId{}" Type="{}/{}" Target="{}"/>"#,
        id, REL_TYPE, kind, target
    )
}

fn relationships(rels: &[String]) -> String {
    format!(
        r#"{}<Relationships xmlns="{}">{}</Relationships>"#,
        XML_DECL,
        NS_REL,
        rels.concat()
    )
}

fn package_rels() -> String {
    relationships(&[
        relationship(1, "officeDocument", "ppt/presentation.xml"),
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#
            .to_string(),
        relationship(3, "extended-properties", "docProps/app.xml"),
    ])
}

fn table_styles() -> String {
    format!(
        r#"{}<a:tblStyleLst xmlns:a="{}" def="{}"/>"#,
        XML_DECL, NS_A, TABLE_STYLE_ID
    )
}

/// 空のシェイプツリー（グループのプロパティのみ）
fn empty_group() -> &'static str {
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
}

fn slide_master() -> String {
    format!(
        r#"{}<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_group()
    )
}

fn slide_master_rels() -> String {
    relationships(&[
        relationship(1, "slideLayout", "../slideLayouts/slideLayout1.xml"),
        relationship(2, "theme", "../theme/theme1.xml"),
    ])
}

fn slide_layout() -> String {
    format!(
        r#"{}<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_group()
    )
}

fn slide_layout_rels() -> String {
    relationships(&[relationship(1, "slideMaster", "../slideMasters/slideMaster1.xml")])
}

fn theme() -> String {
    let colors = [
        ("dk1", "000000"),
        ("lt1", "FFFFFF"),
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ];
    let scheme: String = colors
        .iter()
        .map(|(name, rgb)| format!(r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, name, rgb))
        .collect();
    let fonts = r#"<a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/>"#;
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#;
    let effect = r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#;
    format!(
        r#"{decl}<a:theme xmlns:a="{ns}" name="Office Theme"><a:themeElements><a:clrScheme name="Office">{scheme}</a:clrScheme><a:fontScheme name="Office"><a:majorFont>{fonts}</a:majorFont><a:minorFont>{fonts}</a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst><a:lnStyleLst>{line}{line}{line}</a:lnStyleLst><a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst><a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        decl = XML_DECL,
        ns = NS_A,
        scheme = scheme,
        fonts = fonts,
        fill = fill,
        line = line,
        effect = effect
    )
}

fn slide_rels(n: usize) -> String {
    relationships(&[
        relationship(1, "slideLayout", "../slideLayouts/slideLayout1.xml"),
        relationship(2, "image", &format!("../media/image{}.png", n)),
    ])
}

fn xfrm(tag: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        r#"<{0}><a:off x="{1}" y="{2}"/><a:ext cx="{3}" cy="{4}"/></{0}>"#,
        tag, x, y, cx, cy
    )
}

fn run(text: &str, size: u32, bold: bool, color: Option<&str>) -> String {
    let fill = color
        .map(|rgb| format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, rgb))
        .unwrap_or_default();
    format!(
        r#"<a:r><a:rPr lang="en-US" sz="{}" b="{}" dirty="0">{}</a:rPr><a:t>{}</a:t></a:r>"#,
        size,
        u8::from(bold),
        fill,
        xml_escape(text)
    )
}

fn text_box(id: u32, name: &str, frame: String, align: &str, runs: String) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="{}"/>{}</a:p></p:txBody></p:sp>"#,
        id, name, frame, align, runs
    )
}

fn slide_xml(slide: &SlidePart) -> String {
    let band = CHART_TOP;
    let title = text_box(
        2,
        "Title",
        xfrm("a:xfrm", CONTENT_LEFT, 0, CONTENT_WIDTH * 2 / 3, band),
        "l",
        run(&slide.title, TITLE_FONT_SIZE, true, None),
    );
    let mut legend_runs: String = slide
        .legend
        .iter()
        .map(|(label, rgb)| run(&format!("● {}  ", label), LEGEND_FONT_SIZE, false, Some(rgb)))
        .collect();
    if !slide.axes.is_empty() {
        legend_runs.push_str(&run(&slide.axes, AXES_FONT_SIZE, false, Some("595959")));
    }
    let legend = text_box(
        3,
        "Legend",
        xfrm(
            "a:xfrm",
            CONTENT_LEFT + CONTENT_WIDTH * 2 / 3,
            0,
            CONTENT_WIDTH / 3,
            band,
        ),
        "r",
        legend_runs,
    );

    let picture = format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Chart"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        xfrm("a:xfrm", CONTENT_LEFT, CHART_TOP, CONTENT_WIDTH, CHART_HEIGHT)
    );

    format!(
        r#"{}<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld><p:spTree>{}{}{}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_group(),
        title,
        legend,
        picture,
        table_frame(&slide.table)
    )
}

fn table_frame(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let column_width = CONTENT_WIDTH / columns as i64;
    let row_height = TABLE_HEIGHT / rows.len().max(1) as i64;

    let grid: String = (0..columns)
        .map(|_| format!(r#"<a:gridCol w="{}"/>"#, column_width))
        .collect();
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let (size, bold) = if r == 0 {
                (HEADER_FONT_SIZE, true)
            } else {
                (BODY_FONT_SIZE, false)
            };
            let cells: String = (0..columns)
                .map(|c| {
                    let text = row.get(c).map(String::as_str).unwrap_or("");
                    format!(
                        r#"<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p>{}</a:p></a:txBody><a:tcPr/></a:tc>"#,
                        run(text, size, bold, None)
                    )
                })
                .collect();
            format!(r#"<a:tr h="{}">{}</a:tr>"#, row_height, cells)
        })
        .collect();

    format!(
        r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="5" name="Table"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>{}<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr><a:tblGrid>{}</a:tblGrid>{}</a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
        xfrm("p:xfrm", CONTENT_LEFT, TABLE_TOP, CONTENT_WIDTH, TABLE_HEIGHT),
        TABLE_STYLE_ID,
        grid,
        body
    )
}

/// XML のテキスト・属性値用エスケープ
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
