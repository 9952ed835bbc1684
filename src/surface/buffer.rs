use std::hash::{Hash, Hasher};

use crate::appearance::Appearance;
use crate::error::Result;
use crate::geometry::Size;

use super::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub glyph: char,
    pub appearance: Appearance,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            appearance: Appearance::new(),
        }
    }
}

/// Row-major in-memory frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBuffer {
    size: Size,
    cells: Vec<GridCell>,
}

impl GridBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            cells: vec![GridCell::default(); width as usize * height as usize],
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&GridCell> {
        self.idx(x, y).and_then(|idx| self.cells.get(idx))
    }

    /// Glyphs of one row as a string, or `None` past the last row.
    pub fn row_text(&self, y: u16) -> Option<String> {
        if y >= self.size.height {
            return None;
        }
        let start = y as usize * self.size.width as usize;
        let end = start + self.size.width as usize;
        Some(self.cells[start..end].iter().map(|cell| cell.glyph).collect())
    }

    pub fn clear(&mut self) {
        self.cells.fill(GridCell::default());
    }

    /// Resize and blank the frame.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Size::new(width, height);
        self.cells = vec![GridCell::default(); width as usize * height as usize];
    }

    /// Content hash of the frame, used to skip re-emitting identical frames.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = FrameHasher(blake3::Hasher::new());
        self.size.width.hash(&mut hasher);
        self.size.height.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.0.finalize()
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

impl Surface for GridBuffer {
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, appearance: Appearance) {
        if let Some(idx) = self.idx(x, y) {
            self.cells[idx] = GridCell { glyph, appearance };
        }
    }

    fn size(&self) -> (u16, u16) {
        (self.size.width, self.size.height)
    }

    fn show(&mut self) -> Result<()> {
        Ok(())
    }
}

struct FrameHasher(blake3::Hasher);

impl Hasher for FrameHasher {
    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }
}
