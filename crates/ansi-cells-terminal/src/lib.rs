//! Concrete renderers for ansi-cells
//!
//! [`FrameBuffer`] keeps an inspectable cell grid in memory, and
//! [`CrosstermRenderer`] writes to a real terminal (or any byte sink).

pub mod crossterm_renderer;
pub mod framebuffer;

pub use crossterm_renderer::CrosstermRenderer;
pub use framebuffer::{Cell, FrameBuffer};
