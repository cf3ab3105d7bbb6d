//! Outline segmentation.
//!
//! Splits plain-text outlines into slide units on runs of blank lines, takes
//! the first line of each unit as the slide title and classifies the rest as
//! paragraphs, ordered items or unordered items.

use crate::types::{ContentLine, SlideRecord};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// `3. buy milk` -> marker `3.`, text `buy milk`.
static ORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.)\s+(.*)$").unwrap());

/// `- buy milk` or `* buy milk` -> text `buy milk`.
static UNORDERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(.*)$").unwrap());

/// Default number of consecutive blank lines that separate two slides.
pub const DEFAULT_BLANK_LINE_THRESHOLD: usize = 2;

/// Formatting directives shared by the segmenter and every serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Consecutive blank lines needed to start a new slide (at least 1).
    pub blank_line_threshold: usize,

    /// Keep shorter blank runs inside a body as a single spacer line.
    pub preserve_blank_as_break: bool,

    /// Heading marker re-applied to titles by the Markdown serializer.
    pub heading_marker: String,

    /// Canonical glyph for unordered items.
    pub bullet_glyph: String,

    /// Literal token that forces a line break inside one line.
    pub break_token: Option<String>,

    /// Apply NFC normalization before segmenting.
    pub normalize_unicode: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            blank_line_threshold: DEFAULT_BLANK_LINE_THRESHOLD,
            preserve_blank_as_break: false,
            heading_marker: "#".to_string(),
            bullet_glyph: "-".to_string(),
            break_token: None,
            normalize_unicode: true,
        }
    }
}

impl SegmenterConfig {
    /// Create the Markdown-oriented default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for native presentation output, which shows a real bullet.
    pub fn presentation() -> Self {
        Self::default().with_bullet_glyph("•")
    }

    pub fn with_blank_line_threshold(mut self, threshold: usize) -> Self {
        self.blank_line_threshold = threshold.max(1);
        self
    }

    pub fn with_preserve_blank_as_break(mut self, preserve: bool) -> Self {
        self.preserve_blank_as_break = preserve;
        self
    }

    pub fn with_heading_marker(mut self, marker: impl Into<String>) -> Self {
        self.heading_marker = marker.into();
        self
    }

    pub fn with_bullet_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.bullet_glyph = glyph.into();
        self
    }

    /// Set the inline break token. An empty token disables splitting.
    pub fn with_break_token(mut self, token: Option<String>) -> Self {
        self.break_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

/// Turns outline text into slide records.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment an outline into slides, preserving source order.
    ///
    /// Never fails: lines that do not look like list items become paragraphs
    /// and blank-only units are dropped.
    pub fn segment(&self, text: &str) -> Vec<SlideRecord> {
        let text = self.normalize(text);
        let units = self.split_units(&text);
        let unit_count = units.len();

        let slides: Vec<SlideRecord> = units
            .iter()
            .filter_map(|unit| self.build_slide(unit))
            .collect();

        log::debug!(
            "Segmented outline into {} slides ({} raw units)",
            slides.len(),
            unit_count
        );

        slides
    }

    /// Apply NFC normalization when configured.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.normalize_unicode {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Build a single slide from lines already known to belong together.
    ///
    /// Returns `None` when the lines contain no text.
    pub fn segment_unit<'a, I>(&self, lines: I) -> Option<SlideRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<&str> = lines.into_iter().collect();
        self.build_slide(&lines)
    }

    /// Split text into raw units at blank runs of at least the threshold.
    fn split_units<'a>(&self, text: &'a str) -> Vec<Vec<&'a str>> {
        let threshold = self.config.blank_line_threshold.max(1);
        let mut units = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut blank_run = 0;

        for line in text.lines() {
            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run >= threshold {
                    if !current.is_empty() {
                        units.push(std::mem::take(&mut current));
                    }
                    continue;
                }
            } else {
                blank_run = 0;
            }
            current.push(line);
        }

        if !current.is_empty() {
            units.push(current);
        }

        units
    }

    fn build_slide(&self, unit: &[&str]) -> Option<SlideRecord> {
        let mut lines = unit
            .iter()
            .map(|line| line.trim())
            .skip_while(|line| line.is_empty());

        let title_line = lines.next()?;
        let mut title_pieces = self.split_breaks(strip_heading_marker(title_line, &self.config.heading_marker));
        let title = title_pieces.remove(0);

        let mut slide = SlideRecord::new(title);
        if !title_pieces.is_empty() {
            slide
                .body
                .push(ContentLine::paragraph(String::new()).with_segments(title_pieces));
        }

        let mut pending_spacer = false;
        for line in lines {
            if line.is_empty() {
                if self.config.preserve_blank_as_break && !slide.body.is_empty() {
                    pending_spacer = true;
                }
                continue;
            }

            if pending_spacer {
                slide.body.push(ContentLine::spacer());
                pending_spacer = false;
            }

            slide.body.push(self.classify(line));
        }

        Some(slide)
    }

    /// Classify one trimmed, non-blank body line.
    fn classify(&self, line: &str) -> ContentLine {
        let classified = if let Some(caps) = ORDERED_ITEM_REGEX.captures(line) {
            ContentLine::ordered(&caps[1], &caps[2])
        } else if let Some(caps) = UNORDERED_ITEM_REGEX.captures(line) {
            ContentLine::unordered(&caps[1])
        } else {
            ContentLine::paragraph(line)
        };

        let segments = self.split_breaks(classified.text());
        classified.with_segments(segments)
    }

    /// Split at every occurrence of the break token. Always returns at least
    /// one piece; empty pieces after the last text are dropped.
    fn split_breaks(&self, text: &str) -> Vec<String> {
        let mut pieces: Vec<String> = match self.config.break_token.as_deref() {
            Some(token) if !token.is_empty() && text.contains(token) => text
                .split(token)
                .map(|piece| piece.trim().to_string())
                .collect(),
            _ => vec![text.trim().to_string()],
        };
        while pieces.len() > 1 && pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }
        pieces
    }
}

/// Segment with the default configuration.
pub fn segment(text: &str) -> Vec<SlideRecord> {
    Segmenter::default().segment(text)
}

/// Remove a leading run of `marker` and the whitespace after it.
pub fn strip_heading_marker<'a>(line: &'a str, marker: &str) -> &'a str {
    let line = line.trim();
    if marker.is_empty() {
        return line;
    }
    line.trim_start_matches(marker).trim()
}
