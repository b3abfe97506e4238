//! Typed instructions decoded from an escape-sequence annotated stream

use crate::color::Color;

/// SGR renditions recognised by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Normal,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    RapidBlink,
    Reverse,
    Hidden,
    Strikethrough,
    DoubleUnderline,
    NeitherBoldNorDim,
    NotItalic,
    NotUnderline,
    NotBlink,
    NotReverse,
    NotHidden,
    NotStrikethrough,
    Overline,
    NotOverline,
}

impl Attribute {
    /// Map an SGR parameter to its rendition
    pub fn from_sgr(code: u16) -> Option<Self> {
        let attribute = match code {
            0 => Self::Normal,
            1 => Self::Bold,
            2 => Self::Dim,
            3 => Self::Italic,
            4 => Self::Underline,
            5 => Self::Blink,
            6 => Self::RapidBlink,
            7 => Self::Reverse,
            8 => Self::Hidden,
            9 => Self::Strikethrough,
            21 => Self::DoubleUnderline,
            22 => Self::NeitherBoldNorDim,
            23 => Self::NotItalic,
            24 => Self::NotUnderline,
            25 => Self::NotBlink,
            27 => Self::NotReverse,
            28 => Self::NotHidden,
            29 => Self::NotStrikethrough,
            53 => Self::Overline,
            55 => Self::NotOverline,
            _ => return None,
        };
        Some(attribute)
    }
}

/// Which side of the current pair a color instruction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Foreground,
    Background,
    /// SGR 58/59 underline color
    Underline,
}

/// Region targeted by an erase instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearRegion {
    Screen,
    ScreenAfterCursor,
    ScreenBeforeCursor,
    Scrollback,
    Line,
    LineAfterCursor,
    LineBeforeCursor,
}

/// Cursor placement, 0-based rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMove {
    Absolute { row: u16, col: u16 },
    Relative { rows: i32, cols: i32 },
}

impl CursorMove {
    /// Resolve the target position given the current one
    pub fn resolve(self, (row, col): (u16, u16)) -> (u16, u16) {
        match self {
            Self::Absolute { row, col } => (row, col),
            Self::Relative { rows, cols } => (offset(row, rows), offset(col, cols)),
        }
    }
}

fn offset(base: u16, delta: i32) -> u16 {
    let target = i64::from(base) + i64::from(delta);
    target.clamp(0, i64::from(u16::MAX)) as u16
}

/// One decoded unit of an annotated text stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Literal text, control characters like `\n` included
    Text(String),
    SetAttribute(Attribute),
    SetColor {
        role: ColorRole,
        color: Option<Color>,
    },
    SetClear(ClearRegion),
    SetCursor(CursorMove),
    /// An escape sequence with no typed meaning, kept in raw form
    Unrecognized(String),
}

impl Instruction {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn foreground(color: impl Into<Option<Color>>) -> Self {
        Self::SetColor {
            role: ColorRole::Foreground,
            color: color.into(),
        }
    }

    pub fn background(color: impl Into<Option<Color>>) -> Self {
        Self::SetColor {
            role: ColorRole::Background,
            color: color.into(),
        }
    }
}
