//! Mapping from SGR renditions to renderer attribute flags

use crate::TranslateError;
use ansi_cells_parser::Attribute;

bitflags::bitflags! {
    /// Renderer-level attribute flags
    ///
    /// Combine with bitwise OR: `AttrFlags::BOLD | AttrFlags::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u8 {
        /// Plain rendition
        const NORMAL = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
    }
}

/// Whether flags are switched on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

/// Resolve the flags a rendition switches on or off
///
/// # Errors
///
/// [`TranslateError::UnsupportedAttribute`] for renditions the renderer has no flag for.
pub fn map_attribute(attribute: Attribute) -> Result<(AttrFlags, Toggle), TranslateError> {
    use Toggle::{Off, On};

    let mapped = match attribute {
        Attribute::Normal => (AttrFlags::NORMAL, On),
        Attribute::Bold => (AttrFlags::BOLD, On),
        Attribute::Dim => (AttrFlags::DIM, On),
        Attribute::Italic => (AttrFlags::ITALIC, On),
        Attribute::Underline => (AttrFlags::UNDERLINE, On),
        Attribute::Blink => (AttrFlags::BLINK, On),
        Attribute::Reverse => (AttrFlags::REVERSE, On),
        Attribute::Hidden => (AttrFlags::HIDDEN, On),

        // SGR 22 clears both intensities
        Attribute::NeitherBoldNorDim => (AttrFlags::BOLD | AttrFlags::DIM, Off),
        Attribute::NotItalic => (AttrFlags::ITALIC, Off),
        Attribute::NotUnderline => (AttrFlags::UNDERLINE, Off),
        Attribute::NotBlink => (AttrFlags::BLINK, Off),
        Attribute::NotReverse => (AttrFlags::REVERSE, Off),
        Attribute::NotHidden => (AttrFlags::HIDDEN, Off),

        Attribute::RapidBlink
        | Attribute::Strikethrough
        | Attribute::DoubleUnderline
        | Attribute::NotStrikethrough
        | Attribute::Overline
        | Attribute::NotOverline => return Err(TranslateError::UnsupportedAttribute(attribute)),
    };
    Ok(mapped)
}

/// Renditions that also drop the current colors
pub fn resets_colors(attribute: Attribute) -> bool {
    matches!(attribute, Attribute::Normal)
}
