//! Line, text and box drawing on top of a [`Surface`](crate::surface::Surface).

mod boxes;
mod line;
#[cfg(test)]
pub(crate) mod testing;

pub use boxes::{BoxOptions, draw_box, draw_nested_border, fill_rect, truncate_title};
pub use line::{draw_hline, draw_line, draw_vline, write_text};
