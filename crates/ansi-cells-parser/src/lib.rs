//! ANSI instruction stream for ansi-cells
//!
//! Decodes text carrying VT100/xterm escape sequences into a lazy stream of
//! typed [`Instruction`]s that a cell renderer can apply one at a time.

pub mod color;
pub mod instruction;
pub mod parser;

pub use color::{Color, ColorPair};
pub use instruction::{Attribute, ClearRegion, ColorRole, CursorMove, Instruction};
pub use parser::{parse, Instructions, Parser};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHexColor(String),
}
