//! Runs a [`ConvertRequest`] against the filesystem.

use crate::render::MarpRenderer;
use anyhow::{bail, Context, Result};
use deck_core::{ConvertReport, ConvertRequest, MarpFormatter, Segmenter, Target};
use deck_pptx::PptxWriter;
use std::fs;
use std::path::Path;

/// Read the outline, write the requested deck, then run any renderer
/// exports in order. The first failing export aborts the rest; files already
/// written stay on disk.
pub fn run(request: &ConvertRequest, renderer: &MarpRenderer) -> Result<ConvertReport> {
    let text = fs::read_to_string(&request.input)
        .with_context(|| format!("Failed to read {}", request.input.display()))?;

    let segmenter = Segmenter::new(request.segmenter.clone());
    let slides = segmenter.segment(&text);
    log::info!(
        "{}: {} slides",
        request.input.display(),
        slides.len()
    );

    let output = request.output_path();
    if is_same_file(&request.input, &output) {
        bail!(
            "Output {} is the input file; choose another path with --output",
            output.display()
        );
    }
    ensure_parent_dir(&output)?;

    let mut exports = Vec::new();
    match &request.target {
        Target::Marp {
            theme,
            exports: formats,
        } => {
            let markdown = MarpFormatter::new()
                .with_theme(theme.as_str())
                .format(&slides, segmenter.config());
            fs::write(&output, markdown)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            for format in formats {
                let exported = renderer.render(&output, *format).with_context(|| {
                    format!(
                        "Failed to export {} to {} (the Markdown file was kept)",
                        output.display(),
                        format.extension()
                    )
                })?;
                exports.push(exported);
            }
        }
        Target::Pptx { layout, font_size } => {
            let title = request
                .input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Presentation".to_string());

            PptxWriter::new(*layout)
                .with_font_size(*font_size)
                .with_title(title)
                .write_to(&slides, segmenter.config(), &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }

    Ok(ConvertReport {
        input: request.input.clone(),
        output,
        slide_count: slides.len(),
        exports,
    })
}

/// Whether `output` already exists and resolves to the same file as `input`.
fn is_same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ExportFormat, PptxLayout, Rgb};
    use std::fs::File;
    use std::path::PathBuf;

    const OUTLINE: &str = "Welcome\n\nThis is slide one.\n- point A\n- point B\n\n\nThank You\n";

    fn outline(dir: &Path) -> PathBuf {
        let path = dir.join("talk.txt");
        fs::write(&path, OUTLINE).unwrap();
        path
    }

    #[test]
    fn test_marp_conversion_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConvertRequest::marp(outline(dir.path()), "gaia");

        let report = run(&request, &MarpRenderer::new()).unwrap();

        assert_eq!(report.output, dir.path().join("talk.md"));
        assert_eq!(report.slide_count, 2);
        assert!(report.exports.is_empty());

        let markdown = fs::read_to_string(&report.output).unwrap();
        assert!(markdown.starts_with("---\nmarp: true\ntheme: gaia\npaginate: true\n---\n"));
        assert!(markdown.contains("# Welcome\n\nThis is slide one.\n- point A\n- point B\n"));
        assert!(markdown.ends_with("# Thank You\n"));
    }

    #[test]
    fn test_pptx_conversion_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConvertRequest::pptx(
            outline(dir.path()),
            PptxLayout::TextBox {
                foreground: Rgb::BLACK,
                background: Rgb::WHITE,
            },
        )
        .with_output(Some(dir.path().join("nested/out/deck.pptx")));

        let report = run(&request, &MarpRenderer::new()).unwrap();
        assert_eq!(report.slide_count, 2);

        let slides = deck_pptx::inspect(File::open(&report.output).unwrap()).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(
            slides[0].paragraphs,
            vec!["Welcome", "This is slide one.", "• point A", "• point B"]
        );
        assert_eq!(slides[0].background.as_deref(), Some("FFFFFF"));
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConvertRequest::marp(dir.path().join("absent.txt"), "default");

        let error = run(&request, &MarpRenderer::new()).unwrap_err();
        assert!(error.to_string().contains("Failed to read"));
        assert!(!dir.path().join("absent.md").exists());
    }

    #[test]
    fn test_markdown_input_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.md");
        fs::write(&input, OUTLINE).unwrap();

        let error = run(&ConvertRequest::marp(&input, "default"), &MarpRenderer::new()).unwrap_err();
        assert!(error.to_string().contains("is the input file"));
        assert_eq!(fs::read_to_string(&input).unwrap(), OUTLINE);
    }

    #[test]
    fn test_explicit_output_aliasing_input_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let input = outline(dir.path());
        let alias = dir.path().join(".").join("talk.txt");
        let request = ConvertRequest::pptx(&input, PptxLayout::TitleAndContent).with_output(Some(alias));

        assert!(run(&request, &MarpRenderer::new()).is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), OUTLINE);
    }

    #[test]
    fn test_failed_export_keeps_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let request =
            ConvertRequest::marp(outline(dir.path()), "default").with_export(ExportFormat::Pdf);
        let renderer =
            MarpRenderer::new().with_node_path(Some(dir.path().join("missing-node")));

        let error = run(&request, &renderer).unwrap_err();
        assert!(format!("{:#}", error).contains("not found"));
        assert!(dir.path().join("talk.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_exports_are_reported_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let request = ConvertRequest::marp(outline(dir.path()), "default")
            .with_export(ExportFormat::Pdf)
            .with_export(ExportFormat::Pptx);
        let renderer = MarpRenderer::new().with_program("true", Vec::<String>::new());

        let report = run(&request, &renderer).unwrap();
        assert_eq!(
            report.exports,
            vec![dir.path().join("talk.pdf"), dir.path().join("talk.pptx")]
        );
    }
}
