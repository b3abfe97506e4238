//! Escape sequence lexer
//!
//! Uses the vte crate to split VT100/xterm input into [`Instruction`]s

use crate::color::Color;
use crate::instruction::{Attribute, ClearRegion, ColorRole, CursorMove, Instruction};
use std::collections::VecDeque;
use tracing::trace;
use vte::{Params, Perform};

/// Parser for annotated text
///
/// State survives between calls, so a sequence split across two chunks
/// still decodes as one instruction.
pub struct Parser {
    /// The underlying vte parser
    vte_parser: vte::Parser,

    /// Receives vte callbacks and buffers finished instructions
    collector: Collector,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("pending", &self.collector.ready.len())
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            vte_parser: vte::Parser::new(),
            collector: Collector::default(),
        }
    }

    /// Drop decoded instructions and buffered text that have not been handed out yet
    pub fn discard_pending(&mut self) {
        self.collector.ready.clear();
        self.collector.text.clear();
    }

    /// Lazily decode `bytes`; input is consumed only as far as needed for the next instruction
    pub fn instructions<'a>(&'a mut self, bytes: &'a [u8]) -> Instructions<'a> {
        Instructions {
            parser: self,
            bytes: bytes.iter(),
        }
    }
}

/// Decode a whole string at once
pub fn parse(text: &str) -> Vec<Instruction> {
    let mut parser = Parser::new();
    parser.instructions(text.as_bytes()).collect()
}

/// Lazy instruction stream over one chunk of input
pub struct Instructions<'a> {
    parser: &'a mut Parser,
    bytes: std::slice::Iter<'a, u8>,
}

impl Iterator for Instructions<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let parser = &mut *self.parser;
        loop {
            if let Some(instruction) = parser.collector.ready.pop_front() {
                return Some(instruction);
            }

            match self.bytes.next() {
                Some(&byte) => parser.vte_parser.advance(&mut parser.collector, byte),
                None => {
                    // Text at the end of a chunk is complete as far as this chunk goes
                    parser.collector.flush_text();
                    return parser.collector.ready.pop_front();
                }
            }
        }
    }
}

/// vte performer that turns callbacks into instructions
#[derive(Debug, Default)]
struct Collector {
    /// Printable run not yet emitted
    text: String,

    /// Finished instructions, oldest first
    ready: VecDeque<Instruction>,

    /// Raw bytes of a DCS string between hook and unhook
    dcs: Option<String>,
}

impl Collector {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.ready.push_back(Instruction::Text(text));
        }
    }

    fn push(&mut self, instruction: Instruction) {
        self.flush_text();
        self.ready.push_back(instruction);
    }

    fn unrecognized(&mut self, raw: String) {
        trace!("Unrecognized escape sequence {:?}", raw);
        self.push(Instruction::Unrecognized(raw));
    }
}

impl Perform for Collector {
    fn print(&mut self, c: char) {
        self.text.push(c);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            // Backspace, tab, line feed, carriage return
            0x08 | 0x09 | 0x0A | 0x0D => self.text.push(byte as char),

            _ => trace!("Dropping control byte {:#04x}", byte),
        }
    }

    fn hook(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, c: char) {
        self.flush_text();
        self.dcs = Some(format!(
            "\x1bP{}{}{}",
            String::from_utf8_lossy(intermediates),
            params_to_string(params),
            c
        ));
    }

    fn put(&mut self, byte: u8) {
        if let Some(dcs) = self.dcs.as_mut() {
            dcs.push(byte as char);
        }
    }

    fn unhook(&mut self) {
        if let Some(mut raw) = self.dcs.take() {
            raw.push_str("\x1b\\");
            self.unrecognized(raw);
        }
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
        let body = params
            .iter()
            .map(|p| String::from_utf8_lossy(p))
            .collect::<Vec<_>>()
            .join(";");
        let terminator = if bell_terminated { "\x07" } else { "\x1b\\" };
        self.unrecognized(format!("\x1b]{body}{terminator}"));
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, c: char) {
        if ignore || !intermediates.is_empty() {
            self.unrecognized(csi_to_string(params, intermediates, c));
            return;
        }

        match c {
            // Cursor movement
            'A' => self.push(relative(-count(params), 0)),
            'B' => self.push(relative(count(params), 0)),
            'C' => self.push(relative(0, count(params))),
            'D' => self.push(relative(0, -count(params))),

            'H' | 'f' => {
                // Cursor position, 1-based on the wire
                let mut params_iter = params.iter();
                let row = params_iter
                    .next()
                    .and_then(|p| p.first().copied())
                    .unwrap_or(1)
                    .saturating_sub(1);
                let col = params_iter
                    .next()
                    .and_then(|p| p.first().copied())
                    .unwrap_or(1)
                    .saturating_sub(1);
                self.push(Instruction::SetCursor(CursorMove::Absolute { row, col }));
            }

            // Erase display
            'J' => match first_param(params) {
                0 => self.push(Instruction::SetClear(ClearRegion::ScreenAfterCursor)),
                1 => self.push(Instruction::SetClear(ClearRegion::ScreenBeforeCursor)),
                2 => self.push(Instruction::SetClear(ClearRegion::Screen)),
                3 => self.push(Instruction::SetClear(ClearRegion::Scrollback)),
                _ => self.unrecognized(csi_to_string(params, intermediates, c)),
            },

            // Erase line
            'K' => match first_param(params) {
                0 => self.push(Instruction::SetClear(ClearRegion::LineAfterCursor)),
                1 => self.push(Instruction::SetClear(ClearRegion::LineBeforeCursor)),
                2 => self.push(Instruction::SetClear(ClearRegion::Line)),
                _ => self.unrecognized(csi_to_string(params, intermediates, c)),
            },

            // SGR (Select Graphic Rendition)
            'm' => {
                self.flush_text();
                if params.is_empty() {
                    self.ready
                        .push_back(Instruction::SetAttribute(Attribute::Normal));
                } else {
                    let mut iter = params.iter();
                    while let Some(param) = iter.next() {
                        let code = param.first().copied().unwrap_or(0);
                        let instruction = handle_sgr(code, param, &mut iter);
                        if let Instruction::Unrecognized(raw) = &instruction {
                            trace!("Unrecognized SGR parameter {:?}", raw);
                        }
                        self.ready.push_back(instruction);
                    }
                }
            }

            _ => self.unrecognized(csi_to_string(params, intermediates, c)),
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], _ignore: bool, byte: u8) {
        self.unrecognized(format!(
            "\x1b{}{}",
            String::from_utf8_lossy(intermediates),
            byte as char
        ));
    }
}

fn relative(rows: i32, cols: i32) -> Instruction {
    Instruction::SetCursor(CursorMove::Relative { rows, cols })
}

fn first_param(params: &Params) -> u16 {
    params.iter().next().and_then(|p| p.first().copied()).unwrap_or(0)
}

/// Repeat count of a cursor movement; 0 and missing both mean 1
fn count(params: &Params) -> i32 {
    i32::from(first_param(params).max(1))
}

/// Decode one SGR code, pulling extra parameters for extended colors
fn handle_sgr<'a, I>(code: u16, param: &[u16], params: &mut I) -> Instruction
where
    I: Iterator<Item = &'a [u16]>,
{
    let set = |role, color| Instruction::SetColor { role, color };
    match code {
        // Foreground colors
        30..=37 => set(ColorRole::Foreground, Some(palette(code - 30))),
        39 => set(ColorRole::Foreground, None),
        90..=97 => set(ColorRole::Foreground, Some(palette(code - 90 + 8))),

        // Background colors
        40..=47 => set(ColorRole::Background, Some(palette(code - 40))),
        49 => set(ColorRole::Background, None),
        100..=107 => set(ColorRole::Background, Some(palette(code - 100 + 8))),

        // Underline color
        59 => set(ColorRole::Underline, None),

        38 | 48 | 58 => {
            let role = match code {
                38 => ColorRole::Foreground,
                48 => ColorRole::Background,
                _ => ColorRole::Underline,
            };
            match extended_color(param, params) {
                Some(color) => set(role, Some(color)),
                None => Instruction::Unrecognized(format!("\x1b[{code}m")),
            }
        }

        _ => match Attribute::from_sgr(code) {
            Some(attribute) => Instruction::SetAttribute(attribute),
            None => Instruction::Unrecognized(format!("\x1b[{code}m")),
        },
    }
}

/// Parse `5;n` / `2;r;g;b`, either as following parameters or colon sub-parameters
fn extended_color<'a, I>(param: &[u16], params: &mut I) -> Option<Color>
where
    I: Iterator<Item = &'a [u16]>,
{
    if param.len() > 1 {
        return match param[1] {
            5 => param.get(2).map(|&n| Color::from_ansi256(clamp(n))),
            2 => {
                // An optional color space id may precede the components
                let rgb = &param[2..];
                let rgb = if rgb.len() >= 4 { &rgb[1..] } else { rgb };
                match rgb {
                    [r, g, b, ..] => Some(Color::new(clamp(*r), clamp(*g), clamp(*b))),
                    _ => None,
                }
            }
            _ => None,
        };
    }

    let mut next = || params.next().and_then(|p| p.first().copied());
    match next()? {
        5 => next().map(|n| Color::from_ansi256(clamp(n))),
        2 => {
            let r = next()?;
            let g = next()?;
            let b = next()?;
            Some(Color::new(clamp(r), clamp(g), clamp(b)))
        }
        _ => None,
    }
}

fn palette(index: u16) -> Color {
    Color::from_ansi256(clamp(index))
}

fn clamp(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn params_to_string(params: &Params) -> String {
    params
        .iter()
        .map(|p| {
            p.iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(":")
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn csi_to_string(params: &Params, intermediates: &[u8], c: char) -> String {
    format!(
        "\x1b[{}{}{}",
        String::from_utf8_lossy(intermediates),
        params_to_string(params),
        c
    )
}
