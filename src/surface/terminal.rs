use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetStyle};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use crate::appearance::Appearance;
use crate::error::Result;

use super::{GridBuffer, Surface};

/// Crossterm-backed surface.
///
/// Drawing only touches the in-memory frame; `show` writes the complete frame
/// to the terminal handle and flushes once, so the terminal never observes a
/// half-finished draw walk.
pub struct TerminalSurface<W: Write> {
    writer: W,
    frame: GridBuffer,
    last_shown: Option<blake3::Hash>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            frame: GridBuffer::new(width, height),
            last_shown: None,
        }
    }

    pub fn frame(&self) -> &GridBuffer {
        &self.frame
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Adopt a new terminal size. The next `show` repaints everything.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.frame.resize(width, height);
        self.last_shown = None;
        queue!(self.writer, Clear(ClearType::All))?;
        Ok(())
    }

    /// Blank the in-memory frame before a fresh draw walk.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    fn emit_frame(&mut self) -> Result<()> {
        let mut current: Option<Appearance> = None;
        for (y, row) in self.frame.rows().enumerate() {
            queue!(self.writer, MoveTo(0, y as u16))?;
            let mut skip = 0usize;
            for cell in row {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                if current != Some(cell.appearance) {
                    queue!(
                        self.writer,
                        ResetColor,
                        SetAttribute(Attribute::Reset),
                        SetStyle(cell.appearance.content_style())
                    )?;
                    current = Some(cell.appearance);
                }
                queue!(self.writer, Print(cell.glyph))?;
                skip = cell.glyph.width().unwrap_or(1).saturating_sub(1);
            }
        }
        queue!(self.writer, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_cell(&mut self, x: u16, y: u16, glyph: char, appearance: Appearance) {
        self.frame.set_cell(x, y, glyph, appearance);
    }

    fn size(&self) -> (u16, u16) {
        self.frame.size()
    }

    fn show(&mut self) -> Result<()> {
        let fingerprint = self.frame.fingerprint();
        if self.last_shown == Some(fingerprint) {
            return Ok(());
        }
        self.emit_frame()?;
        self.writer.flush()?;
        self.last_shown = Some(fingerprint);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_written_before_show() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, 2);
        surface.set_cell(1, 1, 'x', Appearance::new());
        assert!(surface.writer_mut().is_empty());
        surface.show().unwrap();
        let output = String::from_utf8(surface.into_writer()).unwrap();
        assert!(output.contains('x'));
        assert!(output.contains("\u{1b}[2;1H"));
    }

    #[test]
    fn identical_frames_are_emitted_once() {
        let mut surface = TerminalSurface::new(Vec::new(), 3, 1);
        surface.set_cell(0, 0, 'a', Appearance::new());
        surface.show().unwrap();
        let first_len = surface.writer_mut().len();
        surface.show().unwrap();
        assert_eq!(surface.writer_mut().len(), first_len);

        surface.set_cell(1, 0, 'b', Appearance::new());
        surface.show().unwrap();
        assert!(surface.writer_mut().len() > first_len);
    }

    #[test]
    fn text_after_a_wide_glyph_reaches_the_terminal() {
        let mut surface = TerminalSurface::new(Vec::new(), 6, 1);
        crate::render::write_text(&mut surface, 0, 0, "火ok", Appearance::new());
        surface.show().unwrap();
        let output = String::from_utf8(surface.into_writer()).unwrap();
        assert!(output.contains("火ok"));
    }

    #[test]
    fn resize_forces_a_repaint() {
        let mut surface = TerminalSurface::new(Vec::new(), 3, 1);
        surface.show().unwrap();
        surface.resize(5, 2).unwrap();
        assert_eq!(surface.size(), (5, 2));
        let before = surface.writer_mut().len();
        surface.show().unwrap();
        assert!(surface.writer_mut().len() > before);
    }
}
