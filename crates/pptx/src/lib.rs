//! PPTX (Office Open XML) backend for plain-text slide decks.
//!
//! [`PptxWriter`] packages slide records into a `.pptx` ZIP archive;
//! [`inspect`] reads one back into per-slide paragraph text.

pub mod inspect;
pub mod writer;

pub use inspect::{inspect, InspectedSlide};
pub use writer::PptxWriter;

/// OOXML constants shared by the writer and the inspector.
pub mod constants {
    /// 4:3 slide width (10 inches).
    pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// 4:3 slide height (7.5 inches).
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    pub const EMU_PER_INCH: i64 = 914_400;

    /// DrawingML expresses font sizes in hundredths of a point.
    pub const CENTIPOINTS_PER_POINT: u32 = 100;

    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    pub const REL_TYPE_PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_slide_size_is_four_by_three() {
        assert_eq!(SLIDE_WIDTH_EMU, 10 * EMU_PER_INCH);
        assert_eq!(SLIDE_HEIGHT_EMU * 4, SLIDE_WIDTH_EMU * 3);
    }
}
