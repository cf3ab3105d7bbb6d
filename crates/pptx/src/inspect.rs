//! Read a generated presentation back into per-slide text.
//!
//! Only the parts [`PptxWriter`](crate::PptxWriter) emits are understood.

use crate::constants::REL_TYPE_SLIDE;
use crate::writer::zip_error;
use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Text and styling recovered from one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectedSlide {
    /// 1-based position in the presentation.
    pub number: usize,

    /// Paragraph texts in document order, across all shapes. Empty
    /// paragraphs are kept as empty strings.
    pub paragraphs: Vec<String>,

    /// Solid background colour as upper-case hex, when the slide sets one.
    pub background: Option<String>,

    /// Explicit run font sizes in points, in document order.
    pub font_sizes: Vec<u32>,
}

/// Read every slide of a presentation, in presentation order.
pub fn inspect<R: Read + Seek>(reader: R) -> Result<Vec<InspectedSlide>> {
    let mut archive = ZipArchive::new(reader).map_err(zip_error)?;

    slide_order(&mut archive)?
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let content = read_part(&mut archive, path)?;
            let mut slide = parse_slide(&content);
            slide.number = idx + 1;
            Ok(slide)
        })
        .collect()
}

/// Slide part paths from the presentation relationships, ordered by their
/// `slideN.xml` number.
fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
    let mut slides: Vec<(String, Option<usize>)> = Vec::new();

    let mut reader = Reader::from_str(&rels);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                if rel_type != REL_TYPE_SLIDE {
                    continue;
                }

                let target = attribute(e, b"Target").unwrap_or_default();
                let order = slide_number(&target);
                let path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                slides.push((path, order));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

fn parse_slide(xml: &str) -> InspectedSlide {
    let mut slide = InspectedSlide::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut paragraph: Option<String> = None;
    let mut in_text = false;
    let mut in_background = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = true,
                b"p" => paragraph = Some(String::new()),
                b"t" => in_text = true,
                b"srgbClr" if in_background => slide.background = attribute(e, b"val"),
                b"rPr" => record_font_size(&mut slide, e),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"srgbClr" if in_background => slide.background = attribute(e, b"val"),
                b"rPr" => record_font_size(&mut slide, e),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(text) = paragraph.as_mut() {
                        match e.unescape() {
                            Ok(unescaped) => text.push_str(&unescaped),
                            Err(err) => log::warn!("Skipping undecodable text run: {}", err),
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = false,
                b"t" => in_text = false,
                b"p" => {
                    if let Some(text) = paragraph.take() {
                        slide.paragraphs.push(text);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error in slide (keeping text read so far): {}", e);
                break;
            }
            _ => {}
        }
    }

    slide
}

fn record_font_size(slide: &mut InspectedSlide, element: &BytesStart) {
    if let Some(size) = attribute(element, b"sz").and_then(|sz| sz.parse::<u32>().ok()) {
        slide.font_sizes.push(size / 100);
    }
}

fn attribute(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive.by_name(path).map_err(|e| {
        Error::CorruptedFile(format!("Part not found in archive '{}': {}", path, e))
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Local part of a possibly prefixed element name (`p:sp` -> `sp`).
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Trailing number of a part name such as `slides/slide12.xml`.
fn slide_number(target: &str) -> Option<usize> {
    let stem = target.trim_end_matches(".xml");
    let digits_start = stem
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|pos| pos + 1)
        .unwrap_or(0);
    stem[digits_start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::PptxWriter;
    use deck_core::{PptxLayout, Rgb, Segmenter, SegmenterConfig};
    use std::io::Cursor;

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("slides/slide1.xml"), Some(1));
        assert_eq!(slide_number("slides/slide123.xml"), Some(123));
        assert_eq!(slide_number("/ppt/slides/slide10.xml"), Some(10));
        assert_eq!(slide_number("nodigits.xml"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_inspect_title_and_content() {
        let config = SegmenterConfig::presentation();
        let slides = Segmenter::new(config.clone())
            .segment("Agenda\n1. Intro\n- Demo & Q/A\n\n\nThanks");
        let bytes = PptxWriter::default().generate(&slides, &config).unwrap();

        let inspected = inspect(Cursor::new(bytes)).unwrap();

        assert_eq!(inspected.len(), 2);
        assert_eq!(inspected[0].number, 1);
        assert_eq!(
            inspected[0].paragraphs,
            vec!["Agenda", "1. Intro", "• Demo & Q/A"]
        );
        assert_eq!(inspected[0].font_sizes, vec![18, 18]);
        assert_eq!(inspected[0].background, None);
        assert_eq!(inspected[1].paragraphs, vec!["Thanks", ""]);
    }

    #[test]
    fn test_inspect_text_box() {
        let config = SegmenterConfig::presentation().with_break_token(Some("/N".to_string()));
        let slides = Segmenter::new(config.clone()).segment("Verse 1/NAmazing grace");
        let writer = PptxWriter::new(PptxLayout::TextBox {
            foreground: Rgb::WHITE,
            background: Rgb::new(10, 20, 30),
        });
        let bytes = writer.generate(&slides, &config).unwrap();

        let inspected = inspect(Cursor::new(bytes)).unwrap();

        assert_eq!(inspected.len(), 1);
        assert_eq!(inspected[0].paragraphs, vec!["Verse 1", "Amazing grace"]);
        assert_eq!(inspected[0].background.as_deref(), Some("0A141E"));
        assert_eq!(inspected[0].font_sizes, vec![32, 32]);
    }

    #[test]
    fn test_inspect_orders_many_slides() {
        let config = SegmenterConfig::presentation();
        let outline: Vec<String> = (1..=12).map(|i| format!("Slide {}", i)).collect();
        let slides = Segmenter::new(config.clone()).segment(&outline.join("\n\n\n"));
        let bytes = PptxWriter::default().generate(&slides, &config).unwrap();

        let titles: Vec<String> = inspect(Cursor::new(bytes))
            .unwrap()
            .into_iter()
            .map(|slide| slide.paragraphs[0].clone())
            .collect();

        assert_eq!(titles, outline);
    }

    #[test]
    fn test_parse_slide_tolerates_truncated_xml() {
        let slide = parse_slide("<p:sld><p:txBody><a:p><a:r><a:t>kept</a:t></a:r></a:p><a:p></p:txBody>");
        assert_eq!(slide.paragraphs, vec!["kept"]);
    }

    #[test]
    fn test_inspect_rejects_non_zip() {
        let result = inspect(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
