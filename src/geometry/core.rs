use crate::appearance::Appearance;
use crate::error::{LayoutError, Result};

/// Integer size measured in terminal character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A single addressable grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle spanning `top_left..=bottom_right`.
///
/// Fields are private so every value in circulation satisfies
/// `top_left <= bottom_right` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    top_left: Cell,
    bottom_right: Cell,
}

impl Rectangle {
    /// Build a rectangle from its four edge coordinates.
    pub fn new(top: u16, right: u16, bottom: u16, left: u16) -> Result<Self> {
        Self::from_cells(Cell::new(left, top), Cell::new(right, bottom))
    }

    pub fn from_cells(top_left: Cell, bottom_right: Cell) -> Result<Self> {
        if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(LayoutError::geometry(format!(
                "top-left {top_left:?} lies past bottom-right {bottom_right:?}"
            )));
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    pub fn top_left(&self) -> Cell {
        self.top_left
    }

    pub fn bottom_right(&self) -> Cell {
        self.bottom_right
    }

    pub fn top(&self) -> u16 {
        self.top_left.y
    }

    pub fn right(&self) -> u16 {
        self.bottom_right.x
    }

    pub fn bottom(&self) -> u16 {
        self.bottom_right.y
    }

    pub fn left(&self) -> u16 {
        self.top_left.x
    }

    /// Number of columns covered, edges included. A rectangle spanning the
    /// whole `u16` range covers one more column than `u16` can hold.
    pub fn width(&self) -> u32 {
        u32::from(self.bottom_right.x - self.top_left.x) + 1
    }

    /// Number of rows covered, edges included.
    pub fn height(&self) -> u32 {
        u32::from(self.bottom_right.y - self.top_left.y) + 1
    }

    /// Shrink every side by the matching border width.
    ///
    /// Fails when the insets consume the whole rectangle.
    pub fn inset(&self, widths: &BorderWidths) -> Result<Self> {
        if widths.horizontal() >= self.width() || widths.vertical() >= self.height() {
            return Err(LayoutError::geometry(format!(
                "insets {widths:?} leave nothing of {self:?}"
            )));
        }
        Self::new(
            self.top() + widths.top,
            self.right() - widths.right,
            self.bottom() - widths.bottom,
            self.left() + widths.left,
        )
    }
}

/// Per-edge border thickness in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderWidths {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl BorderWidths {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(width: u16) -> Self {
        Self::new(width, width, width, width)
    }

    /// Accepts one value (all sides) or four values in top, right, bottom,
    /// left order. Any other count fails; the error carries a uniform-1
    /// fallback for callers that prefer to carry on.
    pub fn from_values(values: &[u16]) -> Result<Self> {
        match *values {
            [width] => Ok(Self::uniform(width)),
            [top, right, bottom, left] => Ok(Self::new(top, right, bottom, left)),
            _ => Err(LayoutError::InvalidArgumentCount {
                context: "BorderWidths::from_values",
                expected: "1 or 4",
                found: values.len(),
                fallback: Some(Self::uniform(1)),
            }),
        }
    }

    /// Like [`BorderWidths::from_values`], but always yields usable widths.
    pub fn from_values_or_fallback(values: &[u16]) -> (Self, Option<LayoutError>) {
        match Self::from_values(values) {
            Ok(widths) => (widths, None),
            Err(err) => (err.fallback_widths().unwrap_or(Self::uniform(1)), Some(err)),
        }
    }

    /// Combined left and right thickness.
    pub fn horizontal(&self) -> u32 {
        u32::from(self.left) + u32::from(self.right)
    }

    /// Combined top and bottom thickness.
    pub fn vertical(&self) -> u32 {
        u32::from(self.top) + u32::from(self.bottom)
    }

    pub fn max(&self) -> u16 {
        self.top.max(self.right).max(self.bottom).max(self.left)
    }

    pub fn min(&self) -> u16 {
        self.top.min(self.right).min(self.bottom).min(self.left)
    }
}

/// Border thickness plus the appearance its cells are painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    pub widths: BorderWidths,
    pub appearance: Appearance,
}

impl BorderStyle {
    /// Uniform single-cell border.
    pub const fn new(appearance: Appearance) -> Self {
        Self {
            widths: BorderWidths::uniform(1),
            appearance,
        }
    }

    pub const fn with_widths(mut self, widths: BorderWidths) -> Self {
        self.widths = widths;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_accepts_ordered_corners() {
        let rect = Rectangle::new(5, 25, 25, 5).unwrap();
        assert_eq!(rect.top_left(), Cell::new(5, 5));
        assert_eq!(rect.bottom_right(), Cell::new(25, 25));
        assert_eq!(rect.width(), 21);
        assert_eq!(rect.height(), 21);
    }

    #[test]
    fn single_cell_rectangle_is_valid() {
        let rect = Rectangle::new(3, 3, 3, 3).unwrap();
        assert_eq!((rect.width(), rect.height()), (1, 1));
    }

    #[test]
    fn rectangle_rejects_inverted_axes() {
        assert!(matches!(
            Rectangle::new(10, 5, 12, 6),
            Err(LayoutError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            Rectangle::new(10, 8, 9, 6),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn inset_shrinks_each_side_independently() {
        let rect = Rectangle::new(0, 19, 9, 0).unwrap();
        let inner = rect.inset(&BorderWidths::new(2, 1, 3, 1)).unwrap();
        assert_eq!(inner, Rectangle::new(2, 18, 6, 1).unwrap());
    }

    #[test]
    fn huge_insets_are_rejected_not_wrapped() {
        let rect = Rectangle::new(0, 65535, 65535, 0).unwrap();
        assert_eq!(rect.width(), 65536);
        let widths = BorderWidths::uniform(40000);
        assert_eq!(widths.horizontal(), 80000);
        assert!(matches!(
            rect.inset(&widths),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn inset_fails_when_nothing_is_left() {
        let rect = Rectangle::new(0, 1, 1, 0).unwrap();
        assert!(matches!(
            rect.inset(&BorderWidths::uniform(1)),
            Err(LayoutError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn border_widths_accept_one_or_four_values() {
        assert_eq!(
            BorderWidths::from_values(&[2]).unwrap(),
            BorderWidths::uniform(2)
        );
        assert_eq!(
            BorderWidths::from_values(&[1, 2, 3, 4]).unwrap(),
            BorderWidths::new(1, 2, 3, 4)
        );
    }

    #[test]
    fn border_widths_wrong_arity_carries_fallback() {
        for values in [&[][..], &[1, 2][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..]] {
            let err = BorderWidths::from_values(values).unwrap_err();
            match &err {
                LayoutError::InvalidArgumentCount { found, .. } => assert_eq!(*found, values.len()),
                other => panic!("unexpected error {other:?}"),
            }
            assert_eq!(err.fallback_widths(), Some(BorderWidths::uniform(1)));

            let (widths, err) = BorderWidths::from_values_or_fallback(values);
            assert_eq!(widths, BorderWidths::uniform(1));
            assert!(err.is_some());
        }
    }

    #[test]
    fn border_widths_reductions() {
        let widths = BorderWidths::new(2, 1, 3, 1);
        assert_eq!(widths.max(), 3);
        assert_eq!(widths.min(), 1);
    }
}
