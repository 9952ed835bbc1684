use crate::appearance::Appearance;
use crate::error::{LayoutError, Result};
use crate::geometry::{BorderStyle, Rectangle};
use crate::layout::{Pane, PaneConstraints, Renderer, ViewPane};
use crate::render::{BoxOptions, draw_box, write_text};
use crate::surface::Surface;

/// Leaf renderer drawing a bordered, titled box over its whole pane, with
/// optional body lines written inside the border.
#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    fill: Appearance,
    border: BorderStyle,
    lines: Vec<String>,
}

impl Panel {
    pub fn new(title: impl Into<String>, fill: Appearance, border: BorderStyle) -> Self {
        Self {
            title: title.into(),
            fill,
            border,
            lines: Vec::new(),
        }
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }
}

/// Unconstrained leaf pane showing the panel.
impl From<Panel> for Pane {
    fn from(panel: Panel) -> Self {
        Pane::View(ViewPane::new(panel, PaneConstraints::default()))
    }
}

impl Renderer for Panel {
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        row: u16,
        col: u16,
        height: u16,
        width: u16,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (Some(right), Some(bottom)) = (col.checked_add(width - 1), row.checked_add(height - 1))
        else {
            return Err(LayoutError::geometry(format!(
                "panel at ({row}, {col}) sized {width}x{height} runs off the grid"
            )));
        };
        let rect = Rectangle::new(row, right, bottom, col)?;
        let options = BoxOptions::new()
            .with_border_style(self.border)
            .with_title(self.title.clone());
        draw_box(surface, rect, self.fill, Some(&options))?;

        // draw_box succeeded, so the border widths fit inside the rectangle.
        let widths = self.border.widths;
        let inner_width = u32::from(width).saturating_sub(widths.horizontal() + 2) as usize;
        // Leave the first interior row to the title.
        let first_row = row.saturating_add(widths.top).saturating_add(1);
        let text_col = col.saturating_add(widths.left).saturating_add(1);
        let last_row = row.saturating_add(height).saturating_sub(widths.bottom);
        for (line, y) in self.lines.iter().zip(first_row..last_row) {
            let clipped: String = line.chars().take(inner_width).collect();
            write_text(surface, text_col, y, &clipped, self.fill);
        }
        Ok(())
    }
}
