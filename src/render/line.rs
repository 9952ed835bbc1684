use crate::appearance::Appearance;
use crate::error::{LayoutError, Result};
use crate::geometry::Cell;
use crate::surface::Surface;
use unicode_width::UnicodeWidthChar;

/// Draw an axis-aligned segment, both endpoints included.
///
/// With `debug_text`, cell `i` along the line shows the `i`-th character of
/// the text and a space once the text runs out; without it every cell is a
/// space painted with `appearance`.
pub fn draw_line(
    surface: &mut dyn Surface,
    start: Cell,
    end: Cell,
    appearance: Appearance,
    debug_text: Option<&str>,
) -> Result<()> {
    let mut glyphs = debug_text
        .unwrap_or_default()
        .chars()
        .chain(std::iter::repeat(' '));

    if start.x == end.x {
        let (from, to) = ordered(start.y, end.y);
        for y in from..=to {
            surface.set_cell(start.x, y, glyphs.next().unwrap_or(' '), appearance);
        }
    } else if start.y == end.y {
        let (from, to) = ordered(start.x, end.x);
        for x in from..=to {
            surface.set_cell(x, start.y, glyphs.next().unwrap_or(' '), appearance);
        }
    } else {
        return Err(LayoutError::InvalidLineGeometry { start, end });
    }
    Ok(())
}

/// Horizontal segment on row `y`.
pub fn draw_hline(
    surface: &mut dyn Surface,
    y: u16,
    start_x: u16,
    end_x: u16,
    appearance: Appearance,
    debug_text: Option<&str>,
) -> Result<()> {
    draw_line(
        surface,
        Cell::new(start_x, y),
        Cell::new(end_x, y),
        appearance,
        debug_text,
    )
}

/// Vertical segment on column `x`.
pub fn draw_vline(
    surface: &mut dyn Surface,
    x: u16,
    start_y: u16,
    end_y: u16,
    appearance: Appearance,
    debug_text: Option<&str>,
) -> Result<()> {
    draw_line(
        surface,
        Cell::new(x, start_y),
        Cell::new(x, end_y),
        appearance,
        debug_text,
    )
}

/// Write `text` left to right from `(x, y)`, one character per cell.
/// Wide glyphs also claim the cells they cover, so the next character lands
/// after them. No wrapping; characters past the last addressable column are
/// dropped.
pub fn write_text(surface: &mut dyn Surface, x: u16, y: u16, text: &str, appearance: Appearance) {
    let mut col = Some(x);
    for glyph in text.chars() {
        let Some(current) = col else {
            break;
        };
        surface.set_cell(current, y, glyph, appearance);
        let advance = glyph.width().unwrap_or(1).max(1);
        col = u16::try_from(advance)
            .ok()
            .and_then(|advance| current.checked_add(advance));
    }
}

fn ordered(a: u16, b: u16) -> (u16, u16) {
    if a > b { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;

    #[test]
    fn vertical_line_covers_both_endpoints() {
        let mut surface = RecordingSurface::new(40, 40);
        draw_line(
            &mut surface,
            Cell::new(10, 10),
            Cell::new(10, 32),
            Appearance::new(),
            None,
        )
        .unwrap();
        assert_eq!(surface.writes.len(), 23);
        assert!(surface.writes.iter().all(|write| write.x == 10));
        assert_eq!(surface.writes.first().unwrap().y, 10);
        assert_eq!(surface.writes.last().unwrap().y, 32);
    }

    #[test]
    fn reversed_endpoints_draw_the_same_cells() {
        let mut forward = RecordingSurface::new(20, 5);
        let mut backward = RecordingSurface::new(20, 5);
        draw_hline(&mut forward, 2, 3, 9, Appearance::new(), None).unwrap();
        draw_hline(&mut backward, 2, 9, 3, Appearance::new(), None).unwrap();
        assert_eq!(forward.writes, backward.writes);
        assert_eq!(forward.writes.len(), 7);
    }

    #[test]
    fn degenerate_segment_draws_one_cell() {
        let mut surface = RecordingSurface::new(5, 5);
        draw_line(
            &mut surface,
            Cell::new(2, 2),
            Cell::new(2, 2),
            Appearance::new(),
            None,
        )
        .unwrap();
        assert_eq!(surface.writes.len(), 1);
    }

    #[test]
    fn diagonal_line_is_rejected() {
        let mut surface = RecordingSurface::new(5, 5);
        let err = draw_line(
            &mut surface,
            Cell::new(0, 0),
            Cell::new(3, 3),
            Appearance::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidLineGeometry { .. }));
        assert!(surface.writes.is_empty());
    }

    #[test]
    fn debug_text_stamps_cells_then_pads_with_spaces() {
        let mut surface = RecordingSurface::new(10, 10);
        draw_vline(&mut surface, 1, 0, 5, Appearance::new(), Some("abc")).unwrap();
        let glyphs: String = surface.writes.iter().map(|write| write.glyph).collect();
        assert_eq!(glyphs, "abc   ");
    }

    #[test]
    fn write_text_places_one_cell_per_char() {
        let mut surface = RecordingSurface::new(10, 2);
        write_text(&mut surface, 3, 1, "héllo", Appearance::new());
        assert_eq!(surface.writes.len(), 5);
        assert_eq!(surface.writes[1].x, 4);
        assert_eq!(surface.writes[1].glyph, 'é');
    }

    #[test]
    fn write_text_steps_over_wide_glyphs() {
        let mut surface = RecordingSurface::new(10, 1);
        write_text(&mut surface, 1, 0, "火x箭", Appearance::new());
        let placed: Vec<(u16, char)> = surface.writes.iter().map(|w| (w.x, w.glyph)).collect();
        assert_eq!(placed, vec![(1, '火'), (3, 'x'), (4, '箭')]);
    }
}
