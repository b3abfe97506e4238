//! In-memory cell grid renderer
//!
//! Keeps a 2D grid of cells plus the color and pair definitions pushed into
//! it, so the result of a translation can be inspected cell by cell.

use ansi_cells::{AttrFlags, Color, ColorIndex, PairIndex, Renderer, UNSET_INDEX};
use std::collections::{HashMap, VecDeque};
use std::io;

/// Tab stops every 8 columns
const TAB_WIDTH: u16 = 8;

/// Column of the next tab stop, held inside a grid `width` columns wide
pub(crate) fn next_tab_stop(col: u16, width: u16) -> u16 {
    let next_stop = (col / TAB_WIDTH).saturating_add(1).saturating_mul(TAB_WIDTH);
    next_stop.min(width.saturating_sub(1))
}

/// A single cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character in this cell
    pub c: char,

    /// Color pair active when the cell was written
    pub pair: PairIndex,

    /// Text attributes
    pub attrs: AttrFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            c: ' ',
            pair: UNSET_INDEX,
            attrs: AttrFlags::NORMAL,
        }
    }
}

/// Frame buffer containing rendered content
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    /// Width of the grid
    width: u16,

    /// Height of the grid
    height: u16,

    /// Cells in row-major order
    cells: Vec<Cell>,

    /// Cursor X position (0-based)
    cursor_x: u16,

    /// Cursor Y position (0-based)
    cursor_y: u16,

    /// Attributes applied to new characters
    current_attrs: AttrFlags,

    /// Pair applied to new characters
    current_pair: PairIndex,

    /// Set once `start_color` has been called
    colors_enabled: bool,

    /// Defined colors by handle
    colors: HashMap<ColorIndex, Color>,

    /// Defined pairs as (foreground, background) color handles
    pairs: HashMap<PairIndex, (ColorIndex, ColorIndex)>,

    /// Lines scrolled off the top
    scrollback: VecDeque<Vec<Cell>>,

    /// Maximum scrollback lines
    max_scrollback: usize,
}

impl FrameBuffer {
    /// Create a new frame buffer
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];

        Self {
            width,
            height,
            cells,
            cursor_x: 0,
            cursor_y: 0,
            current_attrs: AttrFlags::NORMAL,
            current_pair: UNSET_INDEX,
            colors_enabled: false,
            colors: HashMap::new(),
            pairs: HashMap::new(),
            scrollback: VecDeque::new(),
            max_scrollback: 10000,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    pub fn current_attrs(&self) -> AttrFlags {
        self.current_attrs
    }

    pub fn current_pair(&self) -> PairIndex {
        self.current_pair
    }

    /// Get cell at position
    pub fn cell_at(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).and_then(|index| self.cells.get(index))
    }

    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Characters of one row, trailing blanks included
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell_at(x, y).map(|cell| cell.c))
            .collect()
    }

    /// Colors of a cell resolved through the defined pairs; `None` is the terminal default
    pub fn cell_colors(&self, x: u16, y: u16) -> Option<(Option<Color>, Option<Color>)> {
        self.cell_at(x, y).map(|cell| self.pair_colors(cell.pair))
    }

    /// Colors bound to a pair handle
    pub fn pair_colors(&self, pair: PairIndex) -> (Option<Color>, Option<Color>) {
        match self.pairs.get(&pair) {
            Some(&(fg, bg)) => (self.color(fg), self.color(bg)),
            None => (None, None),
        }
    }

    /// Color bound to a color handle
    pub fn color(&self, index: ColorIndex) -> Option<Color> {
        self.colors.get(&index).copied()
    }

    /// Write a character at current cursor position
    pub fn write_char(&mut self, c: char) {
        match c {
            '\n' => return self.newline(),
            '\r' => return self.carriage_return(),
            '\t' => {
                self.cursor_x = next_tab_stop(self.cursor_x, self.width);
                return;
            }
            '\x08' => {
                self.cursor_x = self.cursor_x.saturating_sub(1);
                return;
            }
            _ => {}
        }

        let cell = Cell {
            c,
            pair: self.current_pair,
            attrs: self.current_attrs,
        };
        let Some(index) = self.index_of(self.cursor_x, self.cursor_y) else {
            return;
        };
        self.cells[index] = cell;

        // Advance cursor
        self.cursor_x += 1;
        if self.cursor_x >= self.width {
            self.newline();
        }
    }

    /// Move cursor to next line
    pub fn newline(&mut self) {
        self.cursor_x = 0;
        self.cursor_y += 1;
        if self.cursor_y >= self.height {
            self.scroll_up(1);
            self.cursor_y = self.height.saturating_sub(1);
        }
    }

    /// Carriage return (move to start of line)
    pub fn carriage_return(&mut self) {
        self.cursor_x = 0;
    }

    /// Clear the whole grid; the cursor stays put
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Clear from cursor to end of screen
    pub fn clear_to_end(&mut self) {
        if let Some(start) = self.index_of(self.cursor_x, self.cursor_y) {
            self.cells[start..].fill(Cell::default());
        }
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) {
        if let Some(start) = self.index_of(self.cursor_x, self.cursor_y) {
            let row_end = (self.cursor_y as usize + 1) * (self.width as usize);
            self.cells[start..row_end].fill(Cell::default());
        }
    }

    /// Scroll screen up by n lines
    pub fn scroll_up(&mut self, n: u16) {
        if n == 0 || n > self.height {
            return;
        }

        // Save scrolled lines to scrollback
        for i in 0..n {
            let row_start = (i as usize) * (self.width as usize);
            let row_end = row_start + (self.width as usize);
            let row = self.cells[row_start..row_end].to_vec();
            self.scrollback.push_back(row);

            // Limit scrollback size
            if self.scrollback.len() > self.max_scrollback {
                self.scrollback.pop_front();
            }
        }

        // Shift cells up
        let shift = (n as usize) * (self.width as usize);
        self.cells.rotate_left(shift);

        // Clear new lines at bottom
        let clear_start = ((self.height - n) as usize) * (self.width as usize);
        self.cells[clear_start..].fill(Cell::default());
    }

    /// Get scrollback buffer
    pub fn scrollback(&self) -> &VecDeque<Vec<Cell>> {
        &self.scrollback
    }
}

impl Renderer for FrameBuffer {
    fn write(&mut self, text: &str) -> io::Result<()> {
        for c in text.chars() {
            self.write_char(c);
        }
        Ok(())
    }

    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()> {
        if flags.is_empty() {
            self.current_attrs = AttrFlags::NORMAL;
            self.current_pair = UNSET_INDEX;
        } else {
            self.current_attrs.insert(flags);
        }
        Ok(())
    }

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()> {
        self.current_attrs.remove(flags);
        Ok(())
    }

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        self.current_pair = pair;
        Ok(())
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        self.clear();
        Ok(())
    }

    fn erase_to_screen_end(&mut self) -> io::Result<()> {
        self.clear_to_end();
        Ok(())
    }

    fn erase_to_line_end(&mut self) -> io::Result<()> {
        self.clear_to_eol();
        Ok(())
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.cursor_x = col.min(self.width.saturating_sub(1));
        self.cursor_y = row.min(self.height.saturating_sub(1));
        Ok(())
    }

    fn cursor_position(&self) -> (u16, u16) {
        (self.cursor_y, self.cursor_x)
    }

    fn start_color(&mut self) -> io::Result<()> {
        self.colors_enabled = true;
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
