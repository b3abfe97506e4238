//! Renderer that re-emits through crossterm
//!
//! Pair and color handles are resolved locally; the terminal only ever sees
//! true-color escape sequences.

use crate::framebuffer::next_tab_stop;
use ansi_cells::{AttrFlags, Color, ColorIndex, PairIndex, Renderer};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::collections::HashMap;
use std::io::{self, Write};
use tracing::trace;

/// Writes crossterm commands into any [`Write`] sink
#[derive(Debug)]
pub struct CrosstermRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Best guess at the cursor, tracked from what was written
    cursor: (u16, u16),
    colors: HashMap<ColorIndex, Color>,
    pairs: HashMap<PairIndex, (ColorIndex, ColorIndex)>,
}

impl<W: Write> CrosstermRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            cursor: (0, 0),
            colors: HashMap::new(),
            pairs: HashMap::new(),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn advance_cursor(&mut self, text: &str) {
        let (mut row, mut col) = self.cursor;
        for c in text.chars() {
            match c {
                '\n' => {
                    row = row.saturating_add(1);
                    col = 0;
                }
                '\r' => col = 0,
                '\t' => col = next_tab_stop(col, self.cols),
                '\x08' => col = col.saturating_sub(1),
                _ => {
                    col = col.saturating_add(1);
                    if col >= self.cols {
                        row = row.saturating_add(1);
                        col = 0;
                    }
                }
            }
        }
        self.cursor = (row.min(self.rows.saturating_sub(1)), col);
    }

    fn terminal_color(&self, index: ColorIndex) -> style::Color {
        match self.colors.get(&index) {
            Some(color) => style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            },
            None => style::Color::Reset,
        }
    }
}

const ATTRIBUTES: [(AttrFlags, Attribute, Attribute); 7] = [
    (AttrFlags::BOLD, Attribute::Bold, Attribute::NormalIntensity),
    (AttrFlags::DIM, Attribute::Dim, Attribute::NormalIntensity),
    (AttrFlags::ITALIC, Attribute::Italic, Attribute::NoItalic),
    (AttrFlags::UNDERLINE, Attribute::Underlined, Attribute::NoUnderline),
    (AttrFlags::BLINK, Attribute::SlowBlink, Attribute::NoBlink),
    (AttrFlags::REVERSE, Attribute::Reverse, Attribute::NoReverse),
    (AttrFlags::HIDDEN, Attribute::Hidden, Attribute::NoHidden),
];

fn attribute_for(flag: AttrFlags, on: bool) -> Option<Attribute> {
    ATTRIBUTES
        .iter()
        .find(|(candidate, _, _)| *candidate == flag)
        .map(|&(_, enable, disable)| if on { enable } else { disable })
}

impl<W: Write> Renderer for CrosstermRenderer<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))?;
        self.advance_cursor(text);
        Ok(())
    }

    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()> {
        if flags.is_empty() {
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            return Ok(());
        }

        for flag in flags.iter() {
            if let Some(attribute) = attribute_for(flag, true) {
                queue!(self.out, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()> {
        // One SGR 22 covers both intensities
        let intensity = flags & (AttrFlags::BOLD | AttrFlags::DIM);
        if !intensity.is_empty() {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }

        for flag in flags.difference(intensity).iter() {
            if let Some(attribute) = attribute_for(flag, false) {
                queue!(self.out, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        let Some(&(fg, bg)) = self.pairs.get(&pair) else {
            trace!("Pair {} is not defined, using terminal defaults", pair);
            queue!(self.out, ResetColor)?;
            return Ok(());
        };

        let (fg, bg) = (self.terminal_color(fg), self.terminal_color(bg));
        queue!(self.out, SetForegroundColor(fg), SetBackgroundColor(bg))
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn erase_to_screen_end(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::FromCursorDown))
    }

    fn erase_to_line_end(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        self.cursor = (row, col);
        Ok(())
    }

    fn cursor_position(&self) -> (u16, u16) {
        self.cursor
    }

    fn start_color(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn define_color(&mut self, index: ColorIndex, color: Color) -> io::Result<()> {
        self.colors.insert(index, color);
        Ok(())
    }

    fn define_pair(
        &mut self,
        index: PairIndex,
        foreground: ColorIndex,
        background: ColorIndex,
    ) -> io::Result<()> {
        self.pairs.insert(index, (foreground, background));
        Ok(())
    }
}
