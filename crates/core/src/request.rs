//! Conversion requests and reports.
//!
//! A front end (the CLI, or any GUI) describes one conversion as a
//! [`ConvertRequest`] and receives a [`ConvertReport`] back, so presentation
//! code never has to touch the segmenter or serializers directly.

use crate::color::Rgb;
use crate::segment::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Body font size for the title-and-content layout, in points.
pub const DEFAULT_CONTENT_FONT_SIZE: u32 = 18;

/// Font size for the coloured text-box layout, in points.
pub const DEFAULT_TEXT_BOX_FONT_SIZE: u32 = 32;

/// Break token used by the coloured text-box layout unless overridden.
pub const DEFAULT_TEXT_BOX_BREAK_TOKEN: &str = "/N";

/// Formats the external Marp renderer can export to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Pptx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Pptx => "pptx",
        }
    }

    /// Renderer flag selecting this format.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Pdf => "--pdf",
            Self::Pptx => "--pptx",
        }
    }
}

/// How slides are laid out in a native presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PptxLayout {
    /// Title placeholder plus a content placeholder holding the body.
    TitleAndContent,
    /// A single coloured text box on a solid background.
    TextBox { foreground: Rgb, background: Rgb },
}

impl Default for PptxLayout {
    fn default() -> Self {
        Self::TitleAndContent
    }
}

impl PptxLayout {
    pub fn default_font_size(&self) -> u32 {
        match self {
            Self::TitleAndContent => DEFAULT_CONTENT_FONT_SIZE,
            Self::TextBox { .. } => DEFAULT_TEXT_BOX_FONT_SIZE,
        }
    }
}

/// What a conversion produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Target {
    /// Marp Markdown, optionally exported further by the external renderer.
    Marp {
        theme: String,
        exports: Vec<ExportFormat>,
    },
    /// A native `.pptx` document.
    Pptx {
        layout: PptxLayout,
        font_size: Option<u32>,
    },
}

impl Target {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Marp { .. } => "md",
            Self::Pptx { .. } => "pptx",
        }
    }
}

/// One conversion, as requested by a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub target: Target,
    pub segmenter: SegmenterConfig,
}

impl ConvertRequest {
    /// Request Marp Markdown with the given theme.
    pub fn marp(input: impl Into<PathBuf>, theme: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            target: Target::Marp {
                theme: theme.into(),
                exports: Vec::new(),
            },
            segmenter: SegmenterConfig::default(),
        }
    }

    /// Request a native presentation with the given layout.
    ///
    /// The text-box layout enables the `/N` break token.
    pub fn pptx(input: impl Into<PathBuf>, layout: PptxLayout) -> Self {
        let mut segmenter = SegmenterConfig::presentation();
        if matches!(layout, PptxLayout::TextBox { .. }) {
            segmenter = segmenter.with_break_token(Some(DEFAULT_TEXT_BOX_BREAK_TOKEN.to_string()));
        }

        Self {
            input: input.into(),
            output: None,
            target: Target::Pptx {
                layout,
                font_size: None,
            },
            segmenter,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_segmenter(mut self, segmenter: SegmenterConfig) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Add a renderer export. Ignored for native presentation targets.
    pub fn with_export(mut self, format: ExportFormat) -> Self {
        if let Target::Marp { exports, .. } = &mut self.target {
            if !exports.contains(&format) {
                exports.push(format);
            }
        }
        self
    }

    /// Set the native presentation font size. Ignored for Marp targets.
    pub fn with_font_size(mut self, points: Option<u32>) -> Self {
        if let Target::Pptx { font_size, .. } = &mut self.target {
            *font_size = points;
        }
        self
    }

    /// The explicit output path, or the input path with the target's extension.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, self.target.extension()))
    }
}

/// Replace (or add) the extension of `input`.
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Outcome of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub slide_count: usize,
    /// Files produced by the external renderer, in request order.
    pub exports: Vec<PathBuf>,
}
