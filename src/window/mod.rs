//! Composition root: a framed window holding the pane tree and a status line.

mod panel;
mod status;

pub use panel::Panel;
pub use status::StatusBar;

use crate::appearance::Appearance;
use crate::config::{Palette, UiConfig};
use crate::error::{LayoutError, Result};
use crate::geometry::{BorderStyle, Rectangle, Size};
use crate::layout::{BspPane, Division, Pane};
use crate::render::{BoxOptions, draw_box};
use crate::surface::Surface;

/// Area handed to the root pane, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaneArea {
    row: u16,
    col: u16,
    width: u16,
    height: u16,
}

/// Framed window owning the root pane.
#[derive(Debug)]
pub struct Window {
    root: Pane,
    border: BorderStyle,
    fill: Appearance,
    title: Option<String>,
    status: StatusBar,
    status_offset: u16,
    size: Size,
    area: PaneArea,
}

impl Window {
    /// Build a window of `size` and lay the root pane out inside its frame.
    pub fn new(size: Size, root: impl Into<Pane>, config: &UiConfig) -> Result<Self> {
        let mut window = Self {
            root: root.into(),
            border: config.window_border_style(),
            fill: config.palette.default,
            title: None,
            status: StatusBar::new(0, 0, 0, config.status_margin, config.palette.debug),
            status_offset: config.status_offset,
            size,
            area: PaneArea {
                row: 0,
                col: 0,
                width: 0,
                height: 0,
            },
        };
        window.resize(size)?;
        Ok(window)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Swap the frame style and lay the tree out again.
    pub fn set_border(&mut self, border: BorderStyle) -> Result<()> {
        self.border = border;
        self.resize(self.size)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn root(&self) -> &Pane {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Pane {
        &mut self.root
    }

    pub fn status_bar(&self) -> &StatusBar {
        &self.status
    }

    /// Fit the root pane to the frame interior above the status row, then
    /// redistribute the whole tree.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        let (area, status_row) = self.layout(size)?;

        self.root.set_width(area.width)?;
        self.root.set_height(area.height)?;
        self.root.recalc()?;

        self.status.reposition(status_row, area.col, area.width);
        self.size = size;
        self.area = area;
        Ok(())
    }

    /// One full draw walk: frame, pane tree, then the status line.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let frame = Rectangle::new(
            0,
            self.size.width.saturating_sub(1),
            self.size.height.saturating_sub(1),
            0,
        )?;
        let mut options = BoxOptions::new().with_border_style(self.border);
        if let Some(title) = &self.title {
            options = options.with_title(title.clone());
        }
        draw_box(surface, frame, self.fill, Some(&options))?;
        self.root.draw(surface, self.area.row, self.area.col)?;
        self.status.redraw(surface)
    }

    pub fn write_status(
        &mut self,
        surface: &mut dyn Surface,
        text: &str,
        appearance: Option<Appearance>,
    ) -> Result<()> {
        self.status.write(surface, text, appearance)
    }

    /// Root pane area plus the status row for a window of `size`.
    ///
    /// The status row sits `status_offset` rows above the bottom edge,
    /// clamped to the interior rows; the pane area ends above it.
    fn layout(&self, size: Size) -> Result<(PaneArea, u16)> {
        let widths = self.border.widths;
        let too_small = || {
            LayoutError::geometry(format!(
                "window {}x{} leaves no room inside border {widths:?}",
                size.width, size.height
            ))
        };

        let width = u32::from(size.width)
            .checked_sub(widths.horizontal())
            .filter(|width| *width > 0)
            .ok_or_else(too_small)?;
        // Exclusive end of the interior rows.
        let inner_end = u32::from(size.height)
            .checked_sub(u32::from(widths.bottom))
            .filter(|end| *end > u32::from(widths.top))
            .ok_or_else(too_small)?;

        let top = u32::from(widths.top);
        let status_row = u32::from(size.height)
            .saturating_sub(u32::from(self.status_offset))
            .clamp(top, inner_end - 1);
        let height = status_row
            .min(inner_end)
            .checked_sub(top)
            .filter(|height| *height > 0)
            .ok_or_else(too_small)?;

        // Every value is bounded by a u16 window dimension.
        Ok((
            PaneArea {
                row: widths.top,
                col: widths.left,
                width: width as u16,
                height: height as u16,
            },
            status_row as u16,
        ))
    }
}

/// Window whose root is an automatically dividing split pane.
#[derive(Debug)]
pub struct MissionControl {
    window: Window,
    palette: Palette,
}

impl MissionControl {
    pub fn new(size: Size, division: Division, config: &UiConfig) -> Result<Self> {
        let root = BspPane::new(division, None);
        Ok(Self {
            window: Window::new(size, root, config)?,
            palette: config.palette,
        })
    }

    /// Attach a top-level pane. Returns the new child count.
    pub fn add_pane(&mut self, pane: impl Into<Pane>) -> Result<usize> {
        let Some(root) = self.window.root_mut().as_split_mut() else {
            return Err(LayoutError::geometry("mission control root is not a split pane"));
        };
        root.add_child(pane)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.window.draw(surface)
    }

    /// Status message in the palette's debug appearance.
    pub fn status_debug(&mut self, surface: &mut dyn Surface, message: &str) -> Result<()> {
        let debug = self.palette.debug;
        self.window.write_status(surface, message, Some(debug))
    }
}
