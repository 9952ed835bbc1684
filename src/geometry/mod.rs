//! Geometry primitives shared by the drawing and layout layers.

mod core;

pub use self::core::{BorderStyle, BorderWidths, Cell, Rectangle, Size};
