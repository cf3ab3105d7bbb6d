//! Domain types for outline-derived slides.

use serde::{Deserialize, Serialize};

/// One slide produced from a blank-line delimited unit of the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Title text with any heading marker removed.
    pub title: String,

    /// Body lines in source order.
    pub body: Vec<ContentLine>,
}

impl SlideRecord {
    /// Create a slide with the given title and no body.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
        }
    }

    /// Append a body line.
    pub fn with_line(mut self, line: ContentLine) -> Self {
        self.body.push(line);
        self
    }

    /// Whether the slide is title-only.
    pub fn is_title_only(&self) -> bool {
        self.body.is_empty()
    }
}

/// Classification of a body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineKind {
    /// Plain text.
    Paragraph,
    /// Numbered item; `marker` is the `<digits>.` prefix as written.
    Ordered { marker: String },
    /// Bulleted item; the source glyph is dropped.
    Unordered,
    /// A blank line kept as visual spacing inside a slide body.
    Spacer,
}

/// A single body line, possibly split into several output lines by the
/// inline break token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLine {
    pub kind: LineKind,

    /// Trimmed text pieces. Empty only for spacers.
    pub segments: Vec<String>,
}

impl ContentLine {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::single(LineKind::Paragraph, text)
    }

    pub fn ordered(marker: impl Into<String>, text: impl Into<String>) -> Self {
        Self::single(
            LineKind::Ordered {
                marker: marker.into(),
            },
            text,
        )
    }

    pub fn unordered(text: impl Into<String>) -> Self {
        Self::single(LineKind::Unordered, text)
    }

    pub fn spacer() -> Self {
        Self {
            kind: LineKind::Spacer,
            segments: Vec::new(),
        }
    }

    fn single(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            segments: vec![text.into()],
        }
    }

    /// Replace the segments, e.g. after splitting on a break token.
    pub fn with_segments(mut self, segments: Vec<String>) -> Self {
        self.segments = segments;
        self
    }

    /// The first text piece, or an empty string for spacers.
    pub fn text(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }

    pub fn is_spacer(&self) -> bool {
        self.kind == LineKind::Spacer
    }
}
