use ansi_cells::{AttrFlags, Color, ColorIndex, PairIndex, Renderer};
use std::fmt;
use std::io;

/// One call made on a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererCall {
    Write(String),
    AttributeOn(AttrFlags),
    AttributeOff(AttrFlags),
    ActivateColorPair(PairIndex),
    EraseScreen,
    EraseToScreenEnd,
    EraseToLineEnd,
    MoveCursor(u16, u16),
    StartColor,
    DefineColor(ColorIndex, Color),
    DefinePair(PairIndex, ColorIndex, ColorIndex),
}

impl fmt::Display for RendererCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(text) => write!(f, "write({text:?})"),
            Self::AttributeOn(flags) => write!(f, "attribute_on({flags:?})"),
            Self::AttributeOff(flags) => write!(f, "attribute_off({flags:?})"),
            Self::ActivateColorPair(pair) => write!(f, "activate_color_pair({pair})"),
            Self::EraseScreen => write!(f, "erase_screen()"),
            Self::EraseToScreenEnd => write!(f, "erase_to_screen_end()"),
            Self::EraseToLineEnd => write!(f, "erase_to_line_end()"),
            Self::MoveCursor(row, col) => write!(f, "move_cursor({row}, {col})"),
            Self::StartColor => write!(f, "start_color()"),
            Self::DefineColor(index, color) => write!(f, "define_color({index}, {color})"),
            Self::DefinePair(index, fg, bg) => write!(f, "define_pair({index}, {fg}, {bg})"),
        }
    }
}

/// Renderer that records every call and tracks only the cursor
///
/// Writes do not move the cursor; tests position it with [`RecordingRenderer::set_cursor`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Vec<RendererCall>,
    cursor: (u16, u16),
    fail_writes: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the cursor without recording a call
    pub fn set_cursor(&mut self, row: u16, col: u16) {
        self.cursor = (row, col);
    }

    /// Make every subsequent `write` fail with a broken pipe
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    /// Return the calls so far and start a fresh log
    pub fn take_calls(&mut self) -> Vec<RendererCall> {
        std::mem::take(&mut self.calls)
    }

    /// Calls other than the color/pair definitions
    pub fn drawing_calls(&self) -> Vec<RendererCall> {
        self.calls
            .iter()
            .filter(|call| {
                !matches!(
                    call,
                    RendererCall::StartColor
                        | RendererCall::DefineColor(..)
                        | RendererCall::DefinePair(..)
                )
            })
            .cloned()
            .collect()
    }

    fn record(&mut self, call: RendererCall) -> io::Result<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn write(&mut self, text: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "writes disabled"));
        }
        self.record(RendererCall::Write(text.to_string()))
    }

    fn attribute_on(&mut self, flags: AttrFlags) -> io::Result<()> {
        self.record(RendererCall::AttributeOn(flags))
    }

    fn attribute_off(&mut self, flags: AttrFlags) -> io::Result<()> {
        self.record(RendererCall::AttributeOff(flags))
    }

    fn activate_color_pair(&mut self, pair: PairIndex) -> io::Result<()> {
        self.record(RendererCall::ActivateColorPair(pair))
    }

    fn erase_screen(&mut self) -> io::Result<()> {
        self.record(RendererCall::EraseScreen)
    }

    fn erase_to_screen_end(&mut self) -> io::Result<()> {
        self.record(RendererCall::EraseToScreenEnd)
    }

    fn erase_to_line_end(&mut self) -> io::Result<()> {
        self.record(RendererCall::EraseToLineEnd)
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.cursor = (row, col);
        self.record(RendererCall::MoveCursor(row, col))
    }

    fn cursor_position(&self) -> (u16, u16) {
        self.cursor
    }

    fn start_color(&mut self) -> io::Result<()> {
        self.record(RendererCall::StartColor)
    }

    fn define_color(&mut self, index: ColorIndex, color: Color) -> io::Result<()> {
        self.record(RendererCall::DefineColor(index, color))
    }

    fn define_pair(
        &mut self,
        index: PairIndex,
        foreground: ColorIndex,
        background: ColorIndex,
    ) -> io::Result<()> {
        self.record(RendererCall::DefinePair(index, foreground, background))
    }
}
