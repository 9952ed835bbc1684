use crate::appearance::Appearance;
use crate::error::Result;
use crate::render::{draw_hline, write_text};
use crate::surface::Surface;
use crate::width::{cell_count, strip_ansi};

/// One-line message strip.
///
/// Messages that leave room for the margin are right-aligned between a
/// leader line and a trailing segment of `margin` cells. Anything longer is
/// written from the left edge, clipped, without decoration.
#[derive(Debug, Clone)]
pub struct StatusBar {
    row: u16,
    col: u16,
    width: u16,
    margin: u16,
    appearance: Appearance,
    last: Option<(String, Appearance)>,
}

impl StatusBar {
    pub fn new(row: u16, col: u16, width: u16, margin: u16, appearance: Appearance) -> Self {
        Self {
            row,
            col,
            width,
            margin,
            appearance,
            last: None,
        }
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Last message written, without escapes.
    pub fn message(&self) -> Option<&str> {
        self.last.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn reposition(&mut self, row: u16, col: u16, width: u16) {
        self.row = row;
        self.col = col;
        self.width = width;
    }

    /// Draw `text` now and remember it for later redraws.
    pub fn write(
        &mut self,
        surface: &mut dyn Surface,
        text: &str,
        appearance: Option<Appearance>,
    ) -> Result<()> {
        let appearance = appearance.unwrap_or(self.appearance);
        let clean = strip_ansi(text);
        self.render(surface, &clean, appearance)?;
        self.last = Some((clean, appearance));
        Ok(())
    }

    /// Repaint the last message, if any.
    pub fn redraw(&self, surface: &mut dyn Surface) -> Result<()> {
        match &self.last {
            Some((text, appearance)) => self.render(surface, text, *appearance),
            None => Ok(()),
        }
    }

    fn render(&self, surface: &mut dyn Surface, text: &str, appearance: Appearance) -> Result<()> {
        if self.width == 0 {
            return Ok(());
        }
        let width = usize::from(self.width);
        let margin = usize::from(self.margin);
        let len = cell_count(text);

        if len + margin > width {
            let clipped: String = text.chars().take(width).collect();
            write_text(surface, self.col, self.row, &clipped, appearance);
            return Ok(());
        }

        // len + margin <= width <= u16::MAX, so these stay in range.
        let text_start = (width - margin - len) as u16;
        if text_start > 0 {
            draw_hline(
                surface,
                self.row,
                self.col,
                self.col + text_start - 1,
                appearance,
                None,
            )?;
        }
        write_text(surface, self.col + text_start, self.row, text, appearance);
        if self.margin > 0 {
            draw_hline(
                surface,
                self.row,
                self.col + self.width - self.margin,
                self.col + self.width - 1,
                appearance,
                None,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;
    use crossterm::style::Color;

    fn debug() -> Appearance {
        Appearance::new().with_background(Color::Blue)
    }

    #[test]
    fn short_message_is_framed_by_leader_and_trailer() {
        let mut surface = RecordingSurface::new(20, 3);
        let mut bar = StatusBar::new(1, 0, 20, 5, debug());
        bar.write(&mut surface, "go", None).unwrap();

        assert_eq!(surface.frame.row_text(1).unwrap(), "             go     ");
        // every cell of the row is painted exactly once
        assert_eq!(surface.writes.len(), 20);
        assert!(surface.writes.iter().all(|w| w.y == 1 && w.appearance == debug()));
    }

    #[test]
    fn message_filling_the_width_exactly_has_no_leader() {
        let mut surface = RecordingSurface::new(10, 1);
        let mut bar = StatusBar::new(0, 0, 10, 5, debug());
        bar.write(&mut surface, "abcde", None).unwrap();
        assert_eq!(surface.frame.row_text(0).unwrap(), "abcde     ");
        assert_eq!(surface.writes.len(), 10);
    }

    #[test]
    fn long_message_skips_decoration_and_clips() {
        let mut surface = RecordingSurface::new(8, 1);
        let mut bar = StatusBar::new(0, 0, 8, 5, debug());
        bar.write(&mut surface, "staging complete", None).unwrap();
        assert_eq!(surface.frame.row_text(0).unwrap(), "staging ");
        assert_eq!(surface.writes.len(), 8);
    }

    #[test]
    fn escapes_are_stripped_before_measuring() {
        let mut surface = RecordingSurface::new(12, 1);
        let mut bar = StatusBar::new(0, 0, 12, 5, debug());
        bar.write(&mut surface, "\u{1b}[31mok\u{1b}[0m", None).unwrap();
        assert_eq!(bar.message(), Some("ok"));
        assert_eq!(surface.frame.row_text(0).unwrap(), "     ok     ");
    }

    #[test]
    fn explicit_appearance_overrides_default_and_is_kept() {
        let warning = Appearance::new().with_background(Color::Red);
        let mut surface = RecordingSurface::new(12, 1);
        let mut bar = StatusBar::new(0, 0, 12, 5, debug());
        bar.write(&mut surface, "hot", Some(warning)).unwrap();

        let mut again = RecordingSurface::new(12, 1);
        bar.redraw(&mut again).unwrap();
        assert!(again.writes.iter().all(|w| w.appearance == warning));
        assert_eq!(again.frame.row_text(0), surface.frame.row_text(0));
    }

    #[test]
    fn zero_width_bar_draws_nothing() {
        let mut surface = RecordingSurface::new(4, 1);
        let mut bar = StatusBar::new(0, 0, 0, 5, debug());
        bar.write(&mut surface, "x", None).unwrap();
        assert!(surface.writes.is_empty());
    }
}
