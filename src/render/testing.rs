//! Surface double that keeps every `set_cell` call in order.

use crate::appearance::Appearance;
use crate::error::Result;
use crate::surface::{GridBuffer, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    pub x: u16,
    pub y: u16,
    pub glyph: char,
    pub appearance: Appearance,
}

pub struct RecordingSurface {
    pub writes: Vec<CellWrite>,
    pub frame: GridBuffer,
    pub shows: usize,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            writes: Vec::new(),
            frame: GridBuffer::new(width, height),
            shows: 0,
        }
    }

    /// Whether any write landed on `(x, y)`.
    pub fn touched(&self, x: u16, y: u16) -> bool {
        self.writes.iter().any(|write| write.x == x && write.y == y)
    }

    pub fn writes_with(&self, appearance: Appearance) -> impl Iterator<Item = &CellWrite> {
        self.writes
            .iter()
            .filter(move |write| write.appearance == appearance)
    }
}

impl Surface for RecordingSurface {
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, appearance: Appearance) {
        self.writes.push(CellWrite {
            x,
            y,
            glyph,
            appearance,
        });
        self.frame.set_cell(x, y, glyph, appearance);
    }

    fn size(&self) -> (u16, u16) {
        self.frame.size()
    }

    fn show(&mut self) -> Result<()> {
        self.shows += 1;
        Ok(())
    }
}
