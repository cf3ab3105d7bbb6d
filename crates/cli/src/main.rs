//! CLI tool for turning plain-text outlines into slide decks.

mod convert;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{ConvertReport, ConvertRequest, ExportFormat, PptxLayout, Rgb};
use render::MarpRenderer;
use std::path::PathBuf;

/// Convert a plain-text outline into Marp Markdown or a PowerPoint deck.
///
/// Slides are separated by blank lines; the first line of each slide is its
/// title. Lines starting with `1.` or `-`/`*` become list items.
#[derive(Parser, Debug)]
#[command(name = "txt2slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input outline file (UTF-8 text)
    #[arg(required_unless_present = "gui")]
    input: Option<PathBuf>,

    /// Output file (default: input path with .md or .pptx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Marp)]
    format: Format,

    /// Marp theme (default, gaia, uncover, or a custom theme name)
    #[arg(short, long, default_value = deck_core::marp::DEFAULT_THEME)]
    theme: String,

    /// Also export PDF through the Marp CLI (marp format only)
    #[arg(long)]
    pdf: bool,

    /// Also export PPTX through the Marp CLI (marp format only)
    #[arg(long)]
    pptx: bool,

    /// Node.js executable; npx is taken from the same directory
    #[arg(long)]
    node_path: Option<PathBuf>,

    /// Directory for Marp CLI exports (default: next to the Markdown file)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Consecutive blank lines that start a new slide
    #[arg(long, default_value_t = deck_core::segment::DEFAULT_BLANK_LINE_THRESHOLD)]
    blank_lines: usize,

    /// Keep shorter blank runs inside a slide as a single empty line
    #[arg(long)]
    preserve_blank: bool,

    /// Token that forces a line break within a line (text-box layout: /N)
    #[arg(long)]
    break_token: Option<String>,

    /// Slide layout for the pptx format
    #[arg(long, value_enum, default_value_t = Layout::TitleContent)]
    layout: Layout,

    /// Text colour for the text-box layout, as R,G,B or #RRGGBB
    #[arg(long, default_value = "0,0,0")]
    foreground: Rgb,

    /// Background colour for the text-box layout, as R,G,B or #RRGGBB
    #[arg(long, default_value = "255,255,255")]
    background: Rgb,

    /// Font size in points for the pptx format (default: 18, text-box 32)
    #[arg(long)]
    font_size: Option<u32>,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Graphical mode (not available in this build)
    #[arg(long, hide = true)]
    gui: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Marp,
    Pptx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    TitleContent,
    TextBox,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if args.gui {
        bail!("Graphical mode is not supported; pass an input file and flags instead");
    }

    let request = build_request(&args)?;
    let renderer = MarpRenderer::new()
        .with_node_path(args.node_path.clone())
        .with_output_dir(args.export_dir.clone());

    let report = convert::run(&request, &renderer)?;
    print_report(&report, args.json)?;

    Ok(())
}

/// Map command-line flags to a conversion request.
fn build_request(args: &Args) -> Result<ConvertRequest> {
    let input = args.input.as_ref().context("No input file given")?;
    let request = match args.format {
        Format::Marp => {
            let mut request = ConvertRequest::marp(input, &args.theme);
            if args.pdf {
                request = request.with_export(ExportFormat::Pdf);
            }
            if args.pptx {
                request = request.with_export(ExportFormat::Pptx);
            }
            request
        }
        Format::Pptx => {
            if args.pdf || args.pptx {
                log::warn!("--pdf/--pptx only apply to the marp format; ignoring");
            }
            let layout = match args.layout {
                Layout::TitleContent => PptxLayout::TitleAndContent,
                Layout::TextBox => PptxLayout::TextBox {
                    foreground: args.foreground,
                    background: args.background,
                },
            };
            ConvertRequest::pptx(input, layout).with_font_size(args.font_size)
        }
    };

    let mut segmenter = request
        .segmenter
        .clone()
        .with_blank_line_threshold(args.blank_lines)
        .with_preserve_blank_as_break(args.preserve_blank);
    if let Some(token) = &args.break_token {
        segmenter = segmenter.with_break_token(Some(token.clone()));
    }

    Ok(request
        .with_output(args.output.clone())
        .with_segmenter(segmenter))
}

fn print_report(report: &ConvertReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Created {} ({} slides)",
        report.output.display(),
        report.slide_count
    );
    for export in &report.exports {
        println!("Exported {}", export.display());
    }
    Ok(())
}
