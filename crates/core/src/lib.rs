//! Core domain types, outline segmentation, and Marp Markdown formatting
//! for plain-text slide decks.

pub mod color;
pub mod error;
pub mod marp;
pub mod request;
pub mod segment;
pub mod types;

pub use color::Rgb;
pub use error::{Error, Result};
pub use marp::MarpFormatter;
pub use request::{ConvertReport, ConvertRequest, ExportFormat, PptxLayout, Target};
pub use segment::{segment, Segmenter, SegmenterConfig};
pub use types::{ContentLine, LineKind, SlideRecord};
