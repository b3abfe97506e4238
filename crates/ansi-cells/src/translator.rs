//! Instruction dispatcher
//!
//! Applies decoded instructions to a [`Renderer`], registering colors in the
//! translator's own [`ColorTable`] as they show up.

use crate::attributes::{self, Toggle};
use crate::renderer::Renderer;
use crate::table::{ColorTable, TableHooks};
use crate::TranslateError;
use ansi_cells_parser::{
    Attribute, ClearRegion, Color, ColorPair, ColorRole, CursorMove, Instruction, Parser,
};
use std::io;
use tracing::{debug, trace, warn};

/// Translator settings
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Call [`Renderer::start_color`] on construction
    pub start_color: bool,
    /// Pair registered into the reserved slot 0 on construction
    pub base_pair: Option<ColorPair>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            start_color: true,
            base_pair: Some(ColorPair::new(Some(Color::WHITE), Some(Color::BLACK))),
        }
    }
}

/// Feeds ANSI-annotated text into a renderer
#[derive(Debug)]
pub struct Translator<R: Renderer> {
    /// The surface being drawn on
    renderer: R,

    /// Colors and pairs seen so far, plus the current pair
    table: ColorTable,

    /// Lexer state carried between `add_str` calls
    parser: Parser,
}

impl<R: Renderer> Translator<R> {
    /// Create a translator with the default configuration
    pub fn new(renderer: R) -> Result<Self, TranslateError> {
        Self::with_config(renderer, TranslatorConfig::default())
    }

    pub fn with_config(mut renderer: R, config: TranslatorConfig) -> Result<Self, TranslateError> {
        if config.start_color {
            renderer.start_color()?;
        }

        let mut table = ColorTable::new();
        if let Some(base_pair) = config.base_pair {
            let mut hooks = RendererHooks::new(&mut renderer);
            let index = table.add_pair_with(base_pair, true, &mut hooks)?;
            hooks.finish()?;
            debug!("Base color pair {} holds slot {}", base_pair, index);
        }

        Ok(Self {
            renderer,
            table,
            parser: Parser::new(),
        })
    }

    /// Decode and apply annotated text
    pub fn add_str(&mut self, text: &str) -> Result<(), TranslateError> {
        self.add_bytes(text.as_bytes())
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<(), TranslateError> {
        let mut parser = std::mem::take(&mut self.parser);
        let result = self.process(parser.instructions(bytes));
        if result.is_err() {
            // The rest of a failed sequence must not leak into the next call
            parser.discard_pending();
        }
        self.parser = parser;
        result
    }

    /// Apply instructions in order, stopping at the first failure
    ///
    /// Whatever reached the renderer before the failing instruction stays there.
    pub fn process<I>(&mut self, instructions: I) -> Result<(), TranslateError>
    where
        I: IntoIterator<Item = Instruction>,
    {
        for instruction in instructions {
            if let Err(e) = self.apply(instruction) {
                warn!("Stopped processing: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Apply a single instruction
    pub fn apply(&mut self, instruction: Instruction) -> Result<(), TranslateError> {
        trace!("Applying {:?}", instruction);
        match instruction {
            Instruction::Text(text) => self.renderer.write(&text)?,
            Instruction::SetAttribute(attribute) => self.set_attribute(attribute)?,
            Instruction::SetColor { role, color } => self.set_color(role, color)?,
            Instruction::SetClear(region) => self.clear(region)?,
            Instruction::SetCursor(movement) => self.move_cursor(movement)?,
            Instruction::Unrecognized(raw) => {
                return Err(TranslateError::UnrecognizedInstruction(raw));
            }
        }
        Ok(())
    }

    fn set_attribute(&mut self, attribute: Attribute) -> Result<(), TranslateError> {
        let (flags, toggle) = attributes::map_attribute(attribute)?;
        match toggle {
            Toggle::On => self.renderer.attribute_on(flags)?,
            Toggle::Off => self.renderer.attribute_off(flags)?,
        }

        if attributes::resets_colors(attribute) {
            self.table.reset_current_pair();
        }
        Ok(())
    }

    fn set_color(&mut self, role: ColorRole, color: Option<Color>) -> Result<(), TranslateError> {
        let mut hooks = RendererHooks::new(&mut self.renderer);
        let index = match role {
            ColorRole::Foreground => self.table.set_foreground_with(color, &mut hooks)?,
            ColorRole::Background => self.table.set_background_with(color, &mut hooks)?,
            ColorRole::Underline => return Err(TranslateError::UnknownRole(role)),
        };
        hooks.finish()?;

        debug!(
            "Activating color pair {} ({})",
            index,
            self.table.current_pair()
        );
        self.renderer.activate_color_pair(index)?;
        Ok(())
    }

    fn clear(&mut self, region: ClearRegion) -> Result<(), TranslateError> {
        match region {
            ClearRegion::Screen => self.renderer.erase_screen()?,
            ClearRegion::ScreenAfterCursor => self.renderer.erase_to_screen_end()?,
            ClearRegion::Line => {
                // No whole-line primitive: go to column 0 and erase the rest
                let (row, _) = self.renderer.cursor_position();
                self.renderer.move_cursor(row, 0)?;
                self.renderer.erase_to_line_end()?;
            }
            ClearRegion::LineAfterCursor => self.renderer.erase_to_line_end()?,
            ClearRegion::ScreenBeforeCursor
            | ClearRegion::Scrollback
            | ClearRegion::LineBeforeCursor => {
                return Err(TranslateError::UnsupportedClearRegion(region));
            }
        }
        Ok(())
    }

    fn move_cursor(&mut self, movement: CursorMove) -> Result<(), TranslateError> {
        let (row, col) = match movement {
            CursorMove::Absolute { row, col } => (row, col),
            CursorMove::Relative { .. } => movement.resolve(self.renderer.cursor_position()),
        };
        self.renderer.move_cursor(row, col)?;
        Ok(())
    }

    /// Forget a color; pairs that use it keep their handles
    pub fn discard_color(&mut self, color: Option<Color>) {
        self.table.discard_color(color);
    }

    pub fn discard_pair(&mut self, pair: ColorPair) {
        self.table.discard_pair(pair);
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Direct access for renderer calls the translator does not cover
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Run `f` against the renderer, e.g. to refresh or read input
    pub fn with_renderer<T>(&mut self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.renderer)
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Pushes new table entries into the renderer's color tables
struct RendererHooks<'a, R: ?Sized> {
    renderer: &'a mut R,
    /// First renderer failure; hooks cannot return errors themselves
    error: Option<io::Error>,
}

impl<'a, R: Renderer + ?Sized> RendererHooks<'a, R> {
    fn new(renderer: &'a mut R) -> Self {
        Self {
            renderer,
            error: None,
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl<R: Renderer + ?Sized> TableHooks for RendererHooks<'_, R> {
    fn on_add_color(&mut self, color: &Color, table: &ColorTable) {
        if let Ok(index) = table.get_index(*color) {
            let result = self.renderer.define_color(index, *color);
            self.record(result);
        }
    }

    fn on_add_pair(&mut self, pair: &ColorPair, table: &ColorTable) {
        let (Ok(index), Ok(fg), Ok(bg)) = (
            table.get_index(*pair),
            table.get_index(pair.foreground),
            table.get_index(pair.background),
        ) else {
            return;
        };

        // Pair 0 is fixed by the renderer
        if index == 0 {
            return;
        }
        let result = self.renderer.define_pair(index, fg, bg);
        self.record(result);
    }
}
