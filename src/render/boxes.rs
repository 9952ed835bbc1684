use crate::appearance::Appearance;
use crate::error::{LayoutError, Result};
use crate::geometry::{BorderStyle, BorderWidths, Rectangle};
use crate::surface::Surface;

use super::line::{draw_hline, draw_vline, write_text};

/// Optional border and title for [`draw_box`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxOptions {
    pub title: Option<String>,
    pub border: Option<BorderStyle>,
}

impl BoxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_border_style(mut self, border: BorderStyle) -> Self {
        self.border = Some(border);
        self
    }

    /// Repaint the border with `appearance`, adding a single-cell border if
    /// none was configured yet.
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        let border = self
            .border
            .map(|border| BorderStyle {
                appearance,
                ..border
            })
            .unwrap_or_else(|| BorderStyle::new(appearance));
        self.border = Some(border);
        self
    }
}

/// Fill `rect` minus `insets`, one horizontal run per row.
pub fn fill_rect(
    surface: &mut dyn Surface,
    rect: Rectangle,
    appearance: Appearance,
    insets: &BorderWidths,
) -> Result<()> {
    if insets.horizontal() > rect.width() || insets.vertical() > rect.height() {
        return Err(LayoutError::geometry(format!(
            "fill insets {insets:?} exceed {rect:?}"
        )));
    }
    if insets.horizontal() == rect.width() || insets.vertical() == rect.height() {
        return Ok(());
    }

    let left = rect.left() + insets.left;
    let right = rect.right() - insets.right;
    for y in (rect.top() + insets.top)..=(rect.bottom() - insets.bottom) {
        draw_hline(surface, y, left, right, appearance, None)?;
    }
    Ok(())
}

/// Shorten `title` to `max_len` cells with a trailing `..`.
///
/// Characters are kept while `index + 2 < max_len - 1`. Titles that already
/// fit, and any title when `max_len` is negative, come back unchanged.
pub fn truncate_title(title: &str, max_len: i32) -> String {
    if max_len < 0 || title.chars().count() as i64 <= i64::from(max_len) {
        return title.to_string();
    }
    let limit = i64::from(max_len) - 1;
    let mut truncated: String = title
        .chars()
        .enumerate()
        .take_while(|(idx, _)| *idx as i64 + 2 < limit)
        .map(|(_, glyph)| glyph)
        .collect();
    truncated.push_str("..");
    truncated
}

/// Working edges of a border as it shrinks inward, signed so a collapsed
/// rectangle is representable.
#[derive(Debug, Clone, Copy)]
struct Edges {
    top: i32,
    right: i32,
    bottom: i32,
    left: i32,
}

impl Edges {
    fn of(rect: Rectangle) -> Self {
        Self {
            top: i32::from(rect.top()),
            right: i32::from(rect.right()),
            bottom: i32::from(rect.bottom()),
            left: i32::from(rect.left()),
        }
    }

    fn ensure_drawable(&self, rect: Rectangle, pass: u16) -> Result<()> {
        if self.top > self.bottom || self.left > self.right {
            return Err(LayoutError::geometry(format!(
                "border of {rect:?} collapses on pass {pass}"
            )));
        }
        Ok(())
    }

    // Callers check `ensure_drawable` first, so every edge is within the
    // original rectangle and fits in u16.
    fn top(&self) -> u16 {
        self.top as u16
    }

    fn right(&self) -> u16 {
        self.right as u16
    }

    fn bottom(&self) -> u16 {
        self.bottom as u16
    }

    fn left(&self) -> u16 {
        self.left as u16
    }
}

/// Draw a border in concentric passes with independent per-side thickness,
/// then overlay the optional title on the inset top edge.
///
/// Each pass visits top, bottom, right, then left. A side whose width exceeds
/// the pass index draws along its current edge and then moves that edge
/// inward by one; the other edges stay put, so mismatched widths leave an
/// asymmetric inset.
pub fn draw_nested_border(
    surface: &mut dyn Surface,
    rect: Rectangle,
    border: &BorderStyle,
    title: Option<&str>,
) -> Result<()> {
    let widths = border.widths;
    let appearance = border.appearance;
    let mut edges = Edges::of(rect);

    for pass in 0..widths.max() {
        if widths.top > pass {
            edges.ensure_drawable(rect, pass)?;
            draw_hline(surface, edges.top(), edges.left(), edges.right(), appearance, None)?;
            edges.top += 1;
        }
        if widths.bottom > pass {
            edges.ensure_drawable(rect, pass)?;
            draw_hline(surface, edges.bottom(), edges.left(), edges.right(), appearance, None)?;
            edges.bottom -= 1;
        }
        if widths.right > pass {
            edges.ensure_drawable(rect, pass)?;
            draw_vline(surface, edges.right(), edges.top(), edges.bottom(), appearance, None)?;
            edges.right -= 1;
        }
        if widths.left > pass {
            edges.ensure_drawable(rect, pass)?;
            draw_vline(surface, edges.left(), edges.top(), edges.bottom(), appearance, None)?;
            edges.left += 1;
        }
    }

    let Some(title) = title.filter(|title| !title.is_empty()) else {
        return Ok(());
    };

    let span = i64::from(rect.width()) - i64::from(widths.horizontal()) - 2;
    if span <= 0 {
        return Ok(());
    }
    edges.ensure_drawable(rect, widths.max())?;

    // span < width <= 65536
    let span = i32::try_from(span).unwrap_or(i32::MAX);
    let shown = truncate_title(title, span);
    let clipped: String = shown.chars().take(span as usize).collect();
    write_text(surface, edges.left() + 1, edges.top(), &clipped, appearance);
    Ok(())
}

/// Fill a box and, when `options` carries a border, draw it on top.
///
/// The fill is inset by the border widths so border and interior never
/// overlap. A title without a border is ignored.
pub fn draw_box(
    surface: &mut dyn Surface,
    rect: Rectangle,
    fill: Appearance,
    options: Option<&BoxOptions>,
) -> Result<()> {
    let border = options.and_then(|options| options.border.as_ref());
    let insets = border.map(|border| border.widths).unwrap_or_default();

    fill_rect(surface, rect, fill, &insets)?;

    if let Some(border) = border {
        let title = options.and_then(|options| options.title.as_deref());
        draw_nested_border(surface, rect, border, title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;
    use crossterm::style::Color;

    fn border_appearance() -> Appearance {
        Appearance::new().with_background(Color::Blue)
    }

    fn fill_appearance() -> Appearance {
        Appearance::new().with_background(Color::White)
    }

    #[test]
    fn truncation_rules() {
        assert_eq!(truncate_title("abcdefgh", 5), "ab..");
        assert_eq!(truncate_title("ab", 5), "ab");
        assert_eq!(truncate_title("abcdefgh", -1), "abcdefgh");
        assert_eq!(truncate_title("abcde", 5), "abcde");
    }

    #[test]
    fn oversized_border_widths_are_a_geometry_error() {
        let rect = Rectangle::new(0, 9, 5, 0).unwrap();
        let options = BoxOptions::new().with_border_style(
            BorderStyle::new(border_appearance()).with_widths(BorderWidths::uniform(40000)),
        );
        let mut surface = RecordingSurface::new(20, 10);
        let err = draw_box(&mut surface, rect, fill_appearance(), Some(&options)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
        assert!(surface.writes.is_empty());

        let err = fill_rect(
            &mut surface,
            rect,
            fill_appearance(),
            &BorderWidths::new(0, u16::MAX, 0, u16::MAX),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
    }

    #[test]
    fn plain_box_fills_exactly_the_rectangle() {
        let mut surface = RecordingSurface::new(40, 40);
        let rect = Rectangle::new(5, 25, 25, 5).unwrap();
        draw_box(&mut surface, rect, fill_appearance(), None).unwrap();

        assert_eq!(surface.writes.len(), 21 * 21);
        assert!(surface.writes.iter().all(|write| {
            (5..=25).contains(&write.x)
                && (5..=25).contains(&write.y)
                && write.appearance == fill_appearance()
        }));
    }

    #[test]
    fn title_without_border_has_no_effect() {
        let mut plain = RecordingSurface::new(20, 20);
        let mut titled = RecordingSurface::new(20, 20);
        let rect = Rectangle::new(0, 9, 9, 0).unwrap();
        draw_box(&mut plain, rect, fill_appearance(), None).unwrap();
        draw_box(
            &mut titled,
            rect,
            fill_appearance(),
            Some(&BoxOptions::new().with_title("ignored")),
        )
        .unwrap();
        assert_eq!(plain.writes, titled.writes);
    }

    #[test]
    fn mismatched_widths_shrink_only_their_own_side() {
        let mut surface = RecordingSurface::new(30, 20);
        let rect = Rectangle::new(0, 19, 9, 0).unwrap();
        let border = BorderStyle::new(border_appearance()).with_widths(BorderWidths::new(2, 1, 3, 1));
        draw_nested_border(&mut surface, rect, &border, None).unwrap();

        for y in 0..=9u16 {
            for x in 0..=19u16 {
                let expected = y <= 1 || y >= 7 || x == 0 || x == 19;
                assert_eq!(surface.touched(x, y), expected, "cell ({x}, {y})");
            }
        }

        // Rows 0 and 9 are full first-pass lines; rows 1, 7 and 8 are later
        // passes spanning 18 cells between the two first-pass verticals.
        let row_writes: Vec<usize> = [0u16, 1, 7, 8, 9]
            .iter()
            .map(|row| surface.writes.iter().filter(|w| w.y == *row).count())
            .collect();
        assert_eq!(row_writes, vec![20, 20, 20, 20, 20]);

        // One write per cell: no side ever repaints another side's cells.
        assert_eq!(surface.writes.len(), 20 * 5 + 2 * 5);
    }

    #[test]
    fn border_fails_once_the_rectangle_collapses() {
        let mut surface = RecordingSurface::new(10, 10);
        let rect = Rectangle::new(0, 1, 1, 0).unwrap();
        let border = BorderStyle::new(border_appearance());
        let err = draw_nested_border(&mut surface, rect, &border, None).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
    }

    #[test]
    fn title_sits_one_cell_inside_the_inset_top_edge() {
        let mut surface = RecordingSurface::new(30, 10);
        let rect = Rectangle::new(0, 19, 5, 0).unwrap();
        let options = BoxOptions::new()
            .with_border_style(BorderStyle::new(border_appearance()))
            .with_title("Orbit");
        draw_box(&mut surface, rect, fill_appearance(), Some(&options)).unwrap();

        let row = surface.frame.row_text(1).unwrap();
        assert_eq!(&row[2..7], "Orbit");
    }

    #[test]
    fn long_title_is_truncated_to_the_span() {
        let mut surface = RecordingSurface::new(30, 10);
        // width 10, widths 1 => span 6 => "abc.." (5 cells)
        let rect = Rectangle::new(0, 9, 5, 0).unwrap();
        let options = BoxOptions::new()
            .with_border_style(BorderStyle::new(border_appearance()))
            .with_title("abcdefghij");
        draw_box(&mut surface, rect, fill_appearance(), Some(&options)).unwrap();

        let row = surface.frame.row_text(1).unwrap();
        assert_eq!(&row[2..7], "abc..");
        assert_eq!(&row[7..10], "   ");
    }

    #[test]
    fn bordered_box_fill_stays_inside_the_border() {
        let mut surface = RecordingSurface::new(20, 20);
        let rect = Rectangle::new(2, 11, 11, 2).unwrap();
        let options = BoxOptions::new()
            .with_border_style(BorderStyle::new(border_appearance()).with_widths(BorderWidths::uniform(2)));
        draw_box(&mut surface, rect, fill_appearance(), Some(&options)).unwrap();

        let fills: Vec<_> = surface.writes_with(fill_appearance()).collect();
        assert_eq!(fills.len(), 6 * 6);
        assert!(fills.iter().all(|w| (4..=9).contains(&w.x) && (4..=9).contains(&w.y)));
        assert_eq!(surface.frame.cell(2, 2).unwrap().appearance, border_appearance());
        assert_eq!(surface.frame.cell(4, 4).unwrap().appearance, fill_appearance());
    }

    #[test]
    fn fill_rejects_oversized_insets() {
        let mut surface = RecordingSurface::new(10, 10);
        let rect = Rectangle::new(0, 2, 2, 0).unwrap();
        let err = fill_rect(&mut surface, rect, fill_appearance(), &BorderWidths::uniform(2)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry { .. }));
    }

    #[test]
    fn with_appearance_adds_a_default_border() {
        let options = BoxOptions::new().with_appearance(border_appearance());
        assert_eq!(options.border, Some(BorderStyle::new(border_appearance())));
    }
}
