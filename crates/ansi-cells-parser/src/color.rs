//! Color values carried by instructions
//!
//! Colors compare and hash by their RGB components, so any two spellings of
//! the same color (palette index, hex string, named constant) are the same key.

use crate::ParseError;
use std::fmt;
use std::str::FromStr;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Intensity steps of the xterm 6x6x6 color cube
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The 16 system colors of the xterm palette
const SYSTEM_COLORS: [Color; 16] = [
    Color::BLACK,
    Color::RED,
    Color::GREEN,
    Color::YELLOW,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
    Color::WHITE,
    Color::BRIGHT_BLACK,
    Color::BRIGHT_RED,
    Color::BRIGHT_GREEN,
    Color::BRIGHT_YELLOW,
    Color::BRIGHT_BLUE,
    Color::BRIGHT_MAGENTA,
    Color::BRIGHT_CYAN,
    Color::BRIGHT_WHITE,
];

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const RED: Color = Color::new(0xcd, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xcd, 0x00);
    pub const YELLOW: Color = Color::new(0xcd, 0xcd, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xee);
    pub const MAGENTA: Color = Color::new(0xcd, 0x00, 0xcd);
    pub const CYAN: Color = Color::new(0x00, 0xcd, 0xcd);
    pub const WHITE: Color = Color::new(0xe5, 0xe5, 0xe5);
    pub const BRIGHT_BLACK: Color = Color::new(0x7f, 0x7f, 0x7f);
    pub const BRIGHT_RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const BRIGHT_GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const BRIGHT_YELLOW: Color = Color::new(0xff, 0xff, 0x00);
    pub const BRIGHT_BLUE: Color = Color::new(0x5c, 0x5c, 0xff);
    pub const BRIGHT_MAGENTA: Color = Color::new(0xff, 0x00, 0xff);
    pub const BRIGHT_CYAN: Color = Color::new(0x00, 0xff, 0xff);
    pub const BRIGHT_WHITE: Color = Color::new(0xff, 0xff, 0xff);

    /// Create a color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve an entry of the xterm 256-color palette
    pub fn from_ansi256(index: u8) -> Self {
        match index {
            0..=15 => SYSTEM_COLORS[index as usize],
            16..=231 => {
                let n = index - 16;
                Self::new(
                    CUBE_LEVELS[(n / 36) as usize],
                    CUBE_LEVELS[((n / 6) % 6) as usize],
                    CUBE_LEVELS[(n % 6) as usize],
                )
            }
            232..=255 => {
                let level = 8 + 10 * (index - 232);
                Self::new(level, level, level)
            }
        }
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidHexColor(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let component = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, i) in rgb.iter_mut().zip(0..3) {
                    let nibble = component(&digits[i..=i])?;
                    *slot = nibble * 0x11;
                }
                Ok(Self::new(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(Self::new(
                component(&digits[0..2])?,
                component(&digits[2..4])?,
                component(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Components scaled to the 0..=1000 range cell renderers use for color definitions
    pub fn to_curses_rgb(self) -> (u16, u16, u16) {
        let scale = |c: u8| ((u32::from(c) * 1000 + 127) / 255) as u16;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A foreground/background combination; `None` on either side means the terminal default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorPair {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl ColorPair {
    pub const fn new(foreground: Option<Color>, background: Option<Color>) -> Self {
        Self {
            foreground,
            background,
        }
    }

    /// Both sides unset
    pub fn is_default(&self) -> bool {
        self.foreground.is_none() && self.background.is_none()
    }

    pub fn with_foreground(self, foreground: Option<Color>) -> Self {
        Self { foreground, ..self }
    }

    pub fn with_background(self, background: Option<Color>) -> Self {
        Self { background, ..self }
    }
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |c: Option<Color>| c.map_or_else(|| "default".to_string(), |c| c.to_string());
        write!(f, "{} on {}", side(self.foreground), side(self.background))
    }
}
