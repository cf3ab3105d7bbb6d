//! Marp Markdown output.
//!
//! Renders slide records as a Marp document: front matter, an embedded
//! stylesheet, then one `# Title` block per slide separated by `---` lines.
//! [`parse`] reads such a document back into slide records.

use crate::segment::{Segmenter, SegmenterConfig};
use crate::types::{ContentLine, LineKind, SlideRecord};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Lines Markdown reads as a thematic break or a setext underline, with any
/// number of escaping backslashes in front.
static RULE_LIKE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\*(?:-{3,}|\*{3,}|_{3,}|=+)$").unwrap());

/// Theme used when none is given.
pub const DEFAULT_THEME: &str = "default";

/// Stylesheet embedded in every generated deck.
pub const DEFAULT_STYLE: &str = r#"
section {
    font-family: 'Arial', sans-serif;
    padding: 40px;
}

h1 {
    color: #2c3e50;
    font-size: 2.5em;
    margin-bottom: 0.5em;
}

h2 {
    color: #3498db;
    font-size: 2em;
    margin-bottom: 0.5em;
}

ul, ol {
    margin-left: 1.5em;
    line-height: 1.6;
}

li {
    margin-bottom: 0.5em;
}

strong {
    color: #e74c3c;
}

em {
    color: #27ae60;
}

code {
    background-color: #f8f8f8;
    border-radius: 3px;
    padding: 0.2em 0.4em;
    font-family: 'Courier New', monospace;
}

blockquote {
    border-left: 5px solid #3498db;
    padding-left: 1em;
    color: #7f8c8d;
    font-style: italic;
}

table {
    border-collapse: collapse;
    width: 100%;
    margin: 1em 0;
}

th, td {
    border: 1px solid #ddd;
    padding: 8px 12px;
    text-align: left;
}

th {
    background-color: #f2f2f2;
    font-weight: bold;
}

img {
    max-width: 100%;
    height: auto;
    display: block;
    margin: 0 auto;
}

footer {
    position: absolute;
    bottom: 20px;
    right: 20px;
    font-size: 0.8em;
    color: #95a5a6;
}
"#;

/// Slide separator line.
const SEPARATOR: &str = "---";

/// Formatter for Marp-compatible Markdown output.
#[derive(Debug, Clone)]
pub struct MarpFormatter {
    theme: String,
    paginate: bool,
    background_color: Option<String>,
    style: Option<String>,
}

impl Default for MarpFormatter {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            paginate: true,
            background_color: None,
            style: Some(DEFAULT_STYLE.to_string()),
        }
    }
}

impl MarpFormatter {
    /// Create a formatter with the default theme, pagination and stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        let theme = theme.into();
        if !theme.trim().is_empty() {
            self.theme = theme.trim().to_string();
        }
        self
    }

    pub fn with_paginate(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    /// Add a `backgroundColor` directive to the front matter.
    pub fn with_background_color(mut self, color: Option<String>) -> Self {
        self.background_color = color;
        self
    }

    /// Replace the embedded stylesheet, or drop it with `None`.
    pub fn with_style(mut self, style: Option<String>) -> Self {
        self.style = style;
        self
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Format slides into a complete Marp document.
    pub fn format(&self, slides: &[SlideRecord], config: &SegmenterConfig) -> String {
        let mut output = self.front_matter();

        if let Some(style) = &self.style {
            output.push_str("<style>\n");
            output.push_str(style.trim());
            output.push_str("\n</style>\n\n");
        }

        let blocks: Vec<String> = slides
            .iter()
            .map(|slide| render_slide(slide, config))
            .collect();
        output.push_str(&blocks.join(&format!("\n{}\n\n", SEPARATOR)));

        output
    }

    fn front_matter(&self) -> String {
        let mut header = format!(
            "{sep}\nmarp: true\ntheme: {}\npaginate: {}\n",
            self.theme,
            self.paginate,
            sep = SEPARATOR
        );
        if let Some(color) = &self.background_color {
            header.push_str(&format!("backgroundColor: {}\n", color));
        }
        header.push_str(SEPARATOR);
        header.push_str("\n\n");
        header
    }
}

/// Render one slide as `<marker> <title>\n\n<body>\n`.
pub fn render_slide(slide: &SlideRecord, config: &SegmenterConfig) -> String {
    let heading = format!("{} {}", config.heading_marker, slide.title);
    let mut block = heading.trim().to_string();
    block.push('\n');

    if !slide.body.is_empty() {
        let body: Vec<String> = slide
            .body
            .iter()
            .map(|line| render_line(line, config))
            .collect();
        block.push('\n');
        block.push_str(&body.join("\n"));
        block.push('\n');
    }

    block
}

/// Render a body line; break segments continue on indented lines.
fn render_line(line: &ContentLine, config: &SegmenterConfig) -> String {
    let prefix = match &line.kind {
        LineKind::Spacer => return String::new(),
        LineKind::Paragraph => String::new(),
        LineKind::Ordered { marker } => format!("{} ", marker),
        LineKind::Unordered => format!("{} ", config.bullet_glyph),
    };
    let indent = " ".repeat(prefix.chars().count());

    line.segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let lead = if i == 0 { &prefix } else { &indent };
            format!("{}{}", lead, escape_rule(segment)).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix a rule-like line with `\` so it stays text inside the slide.
fn escape_rule(text: &str) -> Cow<'_, str> {
    if RULE_LIKE_REGEX.is_match(text) {
        Cow::Owned(format!("\\{}", text))
    } else {
        Cow::Borrowed(text)
    }
}

/// Undo [`escape_rule`] on a line read back from Markdown.
fn unescape_rule(line: &str) -> &str {
    let trimmed = line.trim();
    match trimmed.strip_prefix('\\') {
        Some(rest) if RULE_LIKE_REGEX.is_match(trimmed) => rest,
        _ => line,
    }
}

/// Read a Marp document back into slide records.
///
/// Front matter and `<style>` blocks are skipped; each `---` separated block
/// is segmented as a single unit.
pub fn parse(markdown: &str, config: &SegmenterConfig) -> Vec<SlideRecord> {
    let segmenter = Segmenter::new(config.clone());
    let text = segmenter.normalize(markdown);

    let mut lines = text.lines().peekable();
    if lines.peek().map(|l| l.trim() == SEPARATOR).unwrap_or(false) {
        lines.next();
        for line in lines.by_ref() {
            if line.trim() == SEPARATOR {
                break;
            }
        }
    }

    let mut blocks: Vec<Vec<&str>> = vec![Vec::new()];
    let mut in_style = false;

    for line in lines {
        let trimmed = line.trim();
        if in_style {
            in_style = !trimmed.contains("</style>");
            continue;
        }
        if trimmed.starts_with("<style") {
            in_style = !trimmed.contains("</style>");
            continue;
        }
        if trimmed == SEPARATOR {
            blocks.push(Vec::new());
            continue;
        }
        if let Some(block) = blocks.last_mut() {
            block.push(unescape_rule(line));
        }
    }

    blocks
        .into_iter()
        .filter_map(|block| segmenter.segment_unit(block))
        .collect()
}
