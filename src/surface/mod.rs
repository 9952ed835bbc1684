//! Grid surfaces the drawing layer paints onto.
//!
//! The layout and drawing code only ever sees `&mut dyn Surface`. Concrete
//! targets are the in-memory [`GridBuffer`] and the crossterm-backed
//! [`TerminalSurface`], which buffers a whole frame and flushes it in one go.

mod buffer;
mod terminal;

pub use buffer::{GridBuffer, GridCell};
pub use terminal::TerminalSurface;

use crate::appearance::Appearance;
use crate::error::Result;

/// Addressable character-cell drawing target.
pub trait Surface {
    /// Paint one cell. Coordinates outside the surface are ignored.
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, appearance: Appearance);

    /// Surface size as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Make everything painted so far visible.
    fn show(&mut self) -> Result<()>;
}
