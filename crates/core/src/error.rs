//! Error types for slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a slide deck.
///
/// Segmentation itself never fails; these cover the boundaries around it.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the outline or write an output file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A colour value supplied by the user could not be parsed.
    #[error("Invalid colour '{0}': expected 'R,G,B' with components 0-255 or '#RRGGBB'")]
    InvalidColor(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// The file is not a presentation this crate can read back.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}
