//! The rendering surface driven by the translator

use crate::attributes::AttrFlags;
use crate::table::{ColorIndex, PairIndex};
use ansi_cells_parser::Color;
use std::io;

/// A text-cell display that knows nothing about escape sequences
///
/// Positions are `(row, col)`, 0-based. A color or pair handle of `-1`
/// means the terminal default.
pub trait Renderer {
    /// Write text at the cursor using the active attributes and pair
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Switch flags on; enabling [`AttrFlags::NORMAL`] resets to plain rendition
    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()>;

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()>;

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()>;

    fn erase_screen(&mut self) -> io::Result<()>;

    /// Erase from the cursor to the end of the screen
    fn erase_to_screen_end(&mut self) -> io::Result<()>;

    /// Erase from the cursor to the end of the line
    fn erase_to_line_end(&mut self) -> io::Result<()>;

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()>;

    fn cursor_position(&self) -> (u16, u16);

    /// Enable color support
    fn start_color(&mut self) -> io::Result<()>;

    /// Bind a color handle to its RGB value
    fn define_color(&mut self, index: ColorIndex, color: Color) -> io::Result<()>;

    /// Bind a pair handle to two color handles
    fn define_pair(
        &mut self,
        index: PairIndex,
        foreground: ColorIndex,
        background: ColorIndex,
    ) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()> {
        (**self).attribute_on(flags)
    }

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()> {
        (**self).attribute_off(flags)
    }

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        (**self).activate_color_pair(pair)
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        (**self).erase_screen()
    }

    fn erase_to_screen_end(&mut self) -> io::Result<()> {
        (**self).erase_to_screen_end()
    }

    fn erase_to_line_end(&mut self) -> io::Result<()> {
        (**self).erase_to_line_end()
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        (**self).move_cursor(row, col)
    }

    fn cursor_position(&self) -> (u16, u16) {
        (**self).cursor_position()
    }

    fn start_color(&mut self) -> io::Result<()> {
        (**self).start_color()
    }

    fn define_color(&mut self, index: ColorIndex, color: Color) -> io::Result<()> {
        (**self).define_color(index, color)
    }

    fn define_pair(
        &mut self,
        index: PairIndex,
        foreground: ColorIndex,
        background: ColorIndex,
    ) -> io::Result<()> {
        (**self).define_pair(index, foreground, background)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        (**self).write(text)
    }

    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()> {
        (**self).attribute_on(flags)
    }

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()> {
        (**self).attribute_off(flags)
    }

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        (**self).activate_color_pair(pair)
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        (**self).erase_screen()
    }

    fn erase_to_screen_end(&mut self) -> io::Result<()> {
        (**self).erase_to_screen_end()
    }

    fn erase_to_line_end(&mut self) -> io::Result<()> {
        (**self).erase_to_line_end()
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        (**self).move_cursor(row, col)
    }

    fn cursor_position(&self) -> (u16, u16) {
        (**self).cursor_position()
    }

    fn start_color(&mut self) -> io::Result<()> {
        (**self).start_color()
    }

    fn define_color(&mut self, index: ColorIndex, color: Color) -> io::Result<()> {
        (**self).define_color(index, color)
    }

    fn define_pair(
        &mut self,
        index: PairIndex,
        foreground: ColorIndex,
        background: ColorIndex,
    ) -> io::Result<()> {
        (**self).define_pair(index, foreground, background)
    }
}
