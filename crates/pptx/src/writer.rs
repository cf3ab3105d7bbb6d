//! PPTX generation from slide records.

use crate::constants::*;
use deck_core::{ContentLine, Error, LineKind, PptxLayout, Result, Rgb, SegmenterConfig, SlideRecord};
use quick_xml::escape::escape;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

type Archive = ZipWriter<Cursor<Vec<u8>>>;

/// Text box geometry for the coloured layout: 1in from the top-left corner,
/// 8in wide and 5.5in tall.
const TEXT_BOX_OFFSET_EMU: i64 = EMU_PER_INCH;
const TEXT_BOX_WIDTH_EMU: i64 = 8 * EMU_PER_INCH;
const TEXT_BOX_HEIGHT_EMU: i64 = 11 * EMU_PER_INCH / 2;

/// Layout parts written into every package.
const TITLE_AND_CONTENT_LAYOUT: usize = 1;
const BLANK_LAYOUT: usize = 2;

/// Writes slide records as a native presentation.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    layout: PptxLayout,

    /// Body font size in points.
    font_size: u32,

    /// Document title stored in the core properties.
    title: Option<String>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(PptxLayout::default())
    }
}

impl PptxWriter {
    /// Create a writer using the layout's default font size.
    pub fn new(layout: PptxLayout) -> Self {
        Self {
            layout,
            font_size: layout.default_font_size(),
            title: None,
        }
    }

    /// Override the font size; `None` keeps the layout default.
    pub fn with_font_size(mut self, points: Option<u32>) -> Self {
        if let Some(points) = points.filter(|p| *p > 0) {
            self.font_size = points;
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn layout(&self) -> PptxLayout {
        self.layout
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Write the presentation to `path`, replacing any existing file.
    pub fn write_to(
        &self,
        slides: &[SlideRecord],
        config: &SegmenterConfig,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.generate(slides, config)?;
        fs::write(path.as_ref(), bytes)?;
        log::debug!(
            "Wrote {} slides to {}",
            slides.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Generate the presentation as bytes.
    pub fn generate(&self, slides: &[SlideRecord], config: &SegmenterConfig) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.write_content_types(&mut zip, options, slides.len())?;
        self.write_root_rels(&mut zip, options)?;
        self.write_doc_props(&mut zip, options, slides.len())?;
        self.write_presentation(&mut zip, options, slides.len())?;
        self.write_theme(&mut zip, options)?;
        self.write_slide_master(&mut zip, options)?;
        self.write_slide_layouts(&mut zip, options)?;

        for (i, slide) in slides.iter().enumerate() {
            self.write_slide(&mut zip, options, i + 1, slide, config)?;
        }

        let cursor = zip.finish().map_err(zip_error)?;
        Ok(cursor.into_inner())
    }

    fn write_content_types(&self, zip: &mut Archive, options: FileOptions, count: usize) -> Result<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for i in 1..=count {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                i
            ));
        }
        content.push_str("</Types>");

        put(zip, options, "[Content_Types].xml", &content)
    }

    fn write_root_rels(&self, zip: &mut Archive, options: FileOptions) -> Result<()> {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS
        );

        put(zip, options, "_rels/.rels", &content)
    }

    fn write_doc_props(&self, zip: &mut Archive, options: FileOptions, count: usize) -> Result<()> {
        let app = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>txt2slides</Application>
  <PresentationFormat>On-screen Show (4:3)</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
</Properties>"#,
            count
        );
        put(zip, options, "docProps/app.xml", &app)?;

        let title = self.title.as_deref().unwrap_or("Presentation");
        let core = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>txt2slides</dc:creator>
</cp:coreProperties>"#,
            escape(title)
        );
        put(zip, options, "docProps/core.xml", &core)
    }

    fn write_presentation(&self, zip: &mut Archive, options: FileOptions, count: usize) -> Result<()> {
        // rId1 = master, rId2 = presProps, rId3 = theme, rId4.. = slides
        let mut slide_ids = String::new();
        let mut slide_rels = String::new();
        for i in 1..=count {
            slide_ids.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + i,
                i + 3
            ));
            slide_rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                i + 3,
                REL_TYPE_SLIDE,
                i
            ));
        }

        let presentation = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}" type="screen4x3"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_ids,
            SLIDE_WIDTH_EMU,
            SLIDE_HEIGHT_EMU,
            SLIDE_HEIGHT_EMU,
            SLIDE_WIDTH_EMU
        );
        put(zip, options, "ppt/presentation.xml", &presentation)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="{}" Target="theme/theme1.xml"/>
{}</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS,
            REL_TYPE_SLIDE_MASTER,
            REL_TYPE_PRES_PROPS,
            REL_TYPE_THEME,
            slide_rels
        );
        put(zip, options, "ppt/_rels/presentation.xml.rels", &rels)?;

        let props = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );
        put(zip, options, "ppt/presProps.xml", &props)
    }

    fn write_theme(&self, zip: &mut Archive, options: FileOptions) -> Result<()> {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1F497D"/></a:dk2>
      <a:lt2><a:srgbClr val="EEECE1"/></a:lt2>
      <a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
      <a:accent2><a:srgbClr val="C0504D"/></a:accent2>
      <a:accent3><a:srgbClr val="9BBB59"/></a:accent3>
      <a:accent4><a:srgbClr val="8064A2"/></a:accent4>
      <a:accent5><a:srgbClr val="4BACC6"/></a:accent5>
      <a:accent6><a:srgbClr val="F79646"/></a:accent6>
      <a:hlink><a:srgbClr val="0000FF"/></a:hlink>
      <a:folHlink><a:srgbClr val="800080"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING
        );

        put(zip, options, "ppt/theme/theme1.xml", &content)
    }

    fn write_slide_master(&self, zip: &mut Archive, options: FileOptions) -> Result<()> {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );
        put(zip, options, "ppt/slideMasters/slideMaster1.xml", &content)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
  <Relationship Id="rId2" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
  <Relationship Id="rId3" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS,
            REL_TYPE_SLIDE_LAYOUT,
            TITLE_AND_CONTENT_LAYOUT,
            REL_TYPE_SLIDE_LAYOUT,
            BLANK_LAYOUT,
            REL_TYPE_THEME
        );
        put(zip, options, "ppt/slideMasters/_rels/slideMaster1.xml.rels", &rels)
    }

    fn write_slide_layouts(&self, zip: &mut Archive, options: FileOptions) -> Result<()> {
        let title_and_content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="obj" preserve="1">
  <p:cSld name="Title and Content">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="Title 1"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="title"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm></p:spPr>
        <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Content Placeholder 2"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm></p:spPr>
        <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        let blank = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );

        for (number, content) in [(TITLE_AND_CONTENT_LAYOUT, title_and_content), (BLANK_LAYOUT, blank)] {
            put(
                zip,
                options,
                &format!("ppt/slideLayouts/slideLayout{}.xml", number),
                &content,
            )?;
            put(
                zip,
                options,
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", number),
                &rels,
            )?;
        }

        Ok(())
    }

    fn write_slide(
        &self,
        zip: &mut Archive,
        options: FileOptions,
        number: usize,
        slide: &SlideRecord,
        config: &SegmenterConfig,
    ) -> Result<()> {
        let (background, shapes, layout) = match self.layout {
            PptxLayout::TitleAndContent => (
                String::new(),
                self.title_and_content_shapes(slide, config),
                TITLE_AND_CONTENT_LAYOUT,
            ),
            PptxLayout::TextBox {
                foreground,
                background,
            } => (
                format!(
                    "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>",
                    background.to_hex()
                ),
                self.text_box_shape(slide, config, foreground),
                BLANK_LAYOUT,
            ),
        };

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    {}<p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, background, shapes
        );
        put(zip, options, &format!("ppt/slides/slide{}.xml", number), &content)?;

        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout{}.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, layout
        );
        put(
            zip,
            options,
            &format!("ppt/slides/_rels/slide{}.xml.rels", number),
            &rels,
        )
    }

    /// Title placeholder plus a content placeholder with one paragraph per
    /// output line. Bullets are drawn as text, so placeholder bullets are off.
    fn title_and_content_shapes(&self, slide: &SlideRecord, config: &SegmenterConfig) -> String {
        let title_style = RunStyle {
            size: None,
            color: None,
        };
        let body_style = RunStyle {
            size: Some(self.font_size),
            color: None,
        };
        let plain = "<a:pPr marL=\"0\" indent=\"0\"><a:buNone/></a:pPr>";

        let body: String = body_paragraphs(slide, config)
            .iter()
            .map(|text| body_style.paragraph(text, plain))
            .collect();

        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="Title 1"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph type="title"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="3" name="Content Placeholder 2"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr><p:ph idx="1"/></p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
        <p:txBody><a:bodyPr><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody>
      </p:sp>
"#,
            title_style.paragraph(&slide.title, ""),
            if body.is_empty() {
                body_style.paragraph("", plain)
            } else {
                body
            }
        )
    }

    /// One free text box holding the title followed by the body lines.
    fn text_box_shape(&self, slide: &SlideRecord, config: &SegmenterConfig, foreground: Rgb) -> String {
        let style = RunStyle {
            size: Some(self.font_size),
            color: Some(foreground),
        };

        let mut paragraphs = style.paragraph(&slide.title, "");
        for text in body_paragraphs(slide, config) {
            paragraphs.push_str(&style.paragraph(&text, ""));
        }

        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="2" name="TextBox 1"/>
          <p:cNvSpPr txBox="1"/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
          <a:noFill/>
        </p:spPr>
        <p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody>
      </p:sp>
"#,
            TEXT_BOX_OFFSET_EMU,
            TEXT_BOX_OFFSET_EMU,
            TEXT_BOX_WIDTH_EMU,
            TEXT_BOX_HEIGHT_EMU,
            paragraphs
        )
    }
}

/// Flatten a slide body into one text per presentation paragraph.
///
/// List prefixes are written as text; each break segment is its own
/// paragraph and spacers become empty paragraphs.
pub fn body_paragraphs(slide: &SlideRecord, config: &SegmenterConfig) -> Vec<String> {
    slide
        .body
        .iter()
        .flat_map(|line| line_paragraphs(line, config))
        .collect()
}

fn line_paragraphs(line: &ContentLine, config: &SegmenterConfig) -> Vec<String> {
    let prefix = match &line.kind {
        LineKind::Spacer => return vec![String::new()],
        LineKind::Paragraph => String::new(),
        LineKind::Ordered { marker } => format!("{} ", marker),
        LineKind::Unordered => format!("{} ", config.bullet_glyph),
    };

    line.segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                format!("{}{}", prefix, segment).trim_end().to_string()
            } else {
                segment.clone()
            }
        })
        .collect()
}

/// Character properties applied to every run in a shape.
struct RunStyle {
    /// Points; `None` inherits from the placeholder.
    size: Option<u32>,
    color: Option<Rgb>,
}

impl RunStyle {
    fn properties(&self, tag: &str) -> String {
        let size = self
            .size
            .map(|pt| format!(" sz=\"{}\"", pt * CENTIPOINTS_PER_POINT))
            .unwrap_or_default();

        match self.color {
            Some(color) => format!(
                "<a:{tag} lang=\"en-US\"{size} dirty=\"0\"><a:solidFill><a:srgbClr val=\"{hex}\"/></a:solidFill></a:{tag}>",
                tag = tag,
                size = size,
                hex = color.to_hex()
            ),
            None => format!("<a:{} lang=\"en-US\"{} dirty=\"0\"/>", tag, size),
        }
    }

    fn paragraph(&self, text: &str, paragraph_properties: &str) -> String {
        if text.is_empty() {
            format!(
                "<a:p>{}{}</a:p>",
                paragraph_properties,
                self.properties("endParaRPr")
            )
        } else {
            format!(
                "<a:p>{}<a:r>{}<a:t>{}</a:t></a:r></a:p>",
                paragraph_properties,
                self.properties("rPr"),
                escape(text)
            )
        }
    }
}

/// Add one part to the archive.
fn put(zip: &mut Archive, options: FileOptions, path: &str, content: &str) -> Result<()> {
    zip.start_file(path, options).map_err(zip_error)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

pub(crate) fn zip_error(error: zip::result::ZipError) -> Error {
    Error::ZipError(error.to_string())
}
