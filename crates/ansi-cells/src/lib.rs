//! Translate ANSI escape sequences into calls on a cell renderer
//!
//! Text carrying SGR, cursor and erase sequences is decoded into
//! instructions, and each instruction is applied to a [`Renderer`] that only
//! understands attribute flags, indexed color pairs and cursor moves. Colors
//! are registered lazily in a [`ColorTable`] the first time they appear.

pub mod attributes;
pub mod renderer;
pub mod table;
pub mod translator;

pub use ansi_cells_parser::{
    parse, Attribute, ClearRegion, Color, ColorPair, ColorRole, CursorMove, Instruction, Parser,
};
pub use attributes::{map_attribute, AttrFlags, Toggle};
pub use renderer::Renderer;
pub use table::{ColorIndex, ColorTable, PairIndex, TableEntry, TableHooks, UNSET_INDEX};
pub use translator::{Translator, TranslatorConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Cannot redefine color pair {0}")]
    ReservedIndex(PairIndex),

    #[error("Not registered: {0}")]
    NotRegistered(String),

    #[error("Unsupported attribute: {0:?}")]
    UnsupportedAttribute(Attribute),

    #[error("Unknown color role: {0:?}")]
    UnknownRole(ColorRole),

    #[error("Unsupported clear region: {0:?}")]
    UnsupportedClearRegion(ClearRegion),

    #[error("Unrecognized instruction: {0:?}")]
    UnrecognizedInstruction(String),

    #[error("Renderer error: {0}")]
    Render(#[from] std::io::Error),
}
