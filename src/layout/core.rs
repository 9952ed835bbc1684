use crate::error::{Dimension, LayoutError, Result};
use crate::surface::Surface;

/// How a split pane divides its area among children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    /// Children sit side by side; width is shared.
    Horizontal,
    /// Children are stacked; height is shared.
    Vertical,
    /// Vertical when the pane is taller than wide, otherwise horizontal.
    Auto,
}

/// Concrete axis a split pane distributes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Division {
    pub fn resolve(self, width: u16, height: u16) -> Axis {
        match self {
            Division::Horizontal => Axis::Horizontal,
            Division::Vertical => Axis::Vertical,
            Division::Auto if height > width => Axis::Vertical,
            Division::Auto => Axis::Horizontal,
        }
    }
}

/// Size bounds for a pane. `None` maxima are unbounded; minima never drop
/// below one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneConstraints {
    pub min_width: u16,
    pub max_width: Option<u16>,
    pub min_height: u16,
    pub max_height: Option<u16>,
}

impl Default for PaneConstraints {
    fn default() -> Self {
        Self {
            min_width: 1,
            max_width: None,
            min_height: 1,
            max_height: None,
        }
    }
}

impl PaneConstraints {
    pub fn new(
        max_width: Option<u16>,
        max_height: Option<u16>,
        min_width: u16,
        min_height: u16,
    ) -> Self {
        Self {
            min_width: min_width.max(1),
            max_width,
            min_height: min_height.max(1),
            max_height,
        }
    }

    pub fn with_min(mut self, width: u16, height: u16) -> Self {
        self.min_width = width.max(1);
        self.min_height = height.max(1);
        self
    }

    pub fn with_max(mut self, width: Option<u16>, height: Option<u16>) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }
}

/// Current size of a pane plus its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneDimensions {
    width: u16,
    height: u16,
    constraints: PaneConstraints,
}

impl PaneDimensions {
    /// Zero-sized until a parent or the window assigns a size.
    pub fn new(constraints: PaneConstraints) -> Self {
        Self {
            width: 0,
            height: 0,
            constraints,
        }
    }

    pub fn dims(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn min_dims(&self) -> (u16, u16) {
        (
            self.constraints.min_width.max(1),
            self.constraints.min_height.max(1),
        )
    }

    pub fn max_dims(&self) -> (Option<u16>, Option<u16>) {
        (self.constraints.max_width, self.constraints.max_height)
    }

    pub fn constraints(&self) -> PaneConstraints {
        self.constraints
    }

    pub fn set_width(&mut self, width: u16) -> Result<()> {
        let (min, _) = self.min_dims();
        check_bounds(Dimension::Width, width, min, self.constraints.max_width)?;
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: u16) -> Result<()> {
        let (_, min) = self.min_dims();
        check_bounds(Dimension::Height, height, min, self.constraints.max_height)?;
        self.height = height;
        Ok(())
    }

    /// Set both dimensions, or neither if either is out of bounds.
    pub fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        let (min_width, min_height) = self.min_dims();
        check_bounds(Dimension::Width, width, min_width, self.constraints.max_width)?;
        check_bounds(Dimension::Height, height, min_height, self.constraints.max_height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl PaneDimensions {
    /// Verify a prospective size without storing it. `None` skips that
    /// dimension.
    fn check(&self, width: Option<u16>, height: Option<u16>) -> Result<()> {
        let (min_width, min_height) = self.min_dims();
        if let Some(width) = width {
            check_bounds(Dimension::Width, width, min_width, self.constraints.max_width)?;
        }
        if let Some(height) = height {
            check_bounds(Dimension::Height, height, min_height, self.constraints.max_height)?;
        }
        Ok(())
    }
}

fn check_bounds(dimension: Dimension, value: u16, min: u16, max: Option<u16>) -> Result<()> {
    if value < min || max.is_some_and(|max| value > max) {
        return Err(LayoutError::SizeOutOfBounds {
            dimension,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Content provider bound to a leaf pane.
pub trait Renderer {
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        row: u16,
        col: u16,
        height: u16,
        width: u16,
    ) -> Result<()>;
}

impl<F> Renderer for F
where
    F: FnMut(&mut dyn Surface, u16, u16, u16, u16) -> Result<()>,
{
    fn render(
        &mut self,
        surface: &mut dyn Surface,
        row: u16,
        col: u16,
        height: u16,
        width: u16,
    ) -> Result<()> {
        self(surface, row, col, height, width)
    }
}

/// Leaf pane: hands its area to a [`Renderer`].
pub struct ViewPane {
    renderer: Box<dyn Renderer>,
    dims: PaneDimensions,
}

impl ViewPane {
    pub fn new(renderer: impl Renderer + 'static, constraints: PaneConstraints) -> Self {
        Self {
            renderer: Box::new(renderer),
            dims: PaneDimensions::new(constraints),
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface, row: u16, col: u16) -> Result<()> {
        let (width, height) = self.dims.dims();
        self.renderer.render(surface, row, col, height, width)
    }

    pub fn dimensions(&self) -> &PaneDimensions {
        &self.dims
    }

    pub fn dimensions_mut(&mut self) -> &mut PaneDimensions {
        &mut self.dims
    }
}

impl std::fmt::Debug for ViewPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPane").field("dims", &self.dims).finish()
    }
}

#[derive(Debug)]
struct Child {
    pane: Pane,
    offset: u16,
}

/// Internal pane splitting its area among an ordered list of children.
#[derive(Debug)]
pub struct BspPane {
    children: Vec<Child>,
    division: Division,
    axis: Option<Axis>,
    dims: PaneDimensions,
}

impl BspPane {
    /// Empty split pane. Without explicit constraints it is unbounded above
    /// and at least 1x1.
    pub fn new(division: Division, constraints: Option<PaneConstraints>) -> Self {
        Self {
            children: Vec::new(),
            division,
            axis: None,
            dims: PaneDimensions::new(constraints.unwrap_or_default()),
        }
    }

    pub fn division(&self) -> Division {
        self.division
    }

    /// Axis chosen by the last `recalc`, or the one the current size implies.
    pub fn axis(&self) -> Axis {
        let (width, height) = self.dims.dims();
        self.axis
            .unwrap_or_else(|| self.division.resolve(width, height))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, idx: usize) -> Option<&Pane> {
        self.children.get(idx).map(|child| &child.pane)
    }

    pub fn child_mut(&mut self, idx: usize) -> Option<&mut Pane> {
        self.children.get_mut(idx).map(|child| &mut child.pane)
    }

    /// Offset of child `idx` along the split axis.
    pub fn child_offset(&self, idx: usize) -> Option<u16> {
        self.children.get(idx).map(|child| child.offset)
    }

    pub fn children(&self) -> impl Iterator<Item = &Pane> {
        self.children.iter().map(|child| &child.pane)
    }

    /// Append a child and redistribute. Returns the new child count.
    ///
    /// If redistribution fails the child stays attached; resize this pane
    /// and call [`BspPane::recalc`] again.
    pub fn add_child(&mut self, pane: impl Into<Pane>) -> Result<usize> {
        self.children.push(Child {
            pane: pane.into(),
            offset: 0,
        });
        self.recalc()?;
        Ok(self.children.len())
    }

    /// Share this pane's size among its children and recurse.
    ///
    /// The split axis is divided as `size / n`, with the first `size % n`
    /// children (in insertion order) taking one extra cell. Every child
    /// spans the full cross axis. A pane with no size yet on the split axis
    /// leaves its children untouched.
    ///
    /// Every size in the subtree is checked against its pane's bounds before
    /// any is stored; on `SizeOutOfBounds` the tree keeps its previous layout.
    pub fn recalc(&mut self) -> Result<()> {
        let (width, height) = self.dims.dims();
        self.check_layout(width, height)?;
        self.apply_layout(width, height)
    }

    fn check_layout(&self, width: u16, height: u16) -> Result<()> {
        let axis = self.division.resolve(width, height);
        for (child, (child_width, child_height)) in
            self.children.iter().zip(self.shares(axis, width, height))
        {
            child.pane.dimensions().check(child_width, child_height)?;
            if let Pane::Split(split) = &child.pane {
                let (current_width, current_height) = split.dims.dims();
                split.check_layout(
                    child_width.unwrap_or(current_width),
                    child_height.unwrap_or(current_height),
                )?;
            }
        }
        Ok(())
    }

    fn apply_layout(&mut self, width: u16, height: u16) -> Result<()> {
        let axis = self.division.resolve(width, height);
        self.axis = Some(axis);

        let shares = self.shares(axis, width, height);
        let mut offset = 0u16;
        for (child, (child_width, child_height)) in self.children.iter_mut().zip(shares) {
            child.offset = offset;
            if let Some(child_width) = child_width {
                child.pane.set_width(child_width)?;
            }
            if let Some(child_height) = child_height {
                child.pane.set_height(child_height)?;
            }
            if let Pane::Split(split) = &mut child.pane {
                let (split_width, split_height) = split.dims.dims();
                split.apply_layout(split_width, split_height)?;
            }
            let along = match axis {
                Axis::Horizontal => child_width,
                Axis::Vertical => child_height,
            };
            offset = offset.saturating_add(along.unwrap_or(0));
        }
        Ok(())
    }

    /// `(width, height)` each child receives from this pane's size; `None`
    /// leaves that dimension alone. Empty when there is nothing to share.
    fn shares(&self, axis: Axis, width: u16, height: u16) -> Vec<(Option<u16>, Option<u16>)> {
        let (along, across) = match axis {
            Axis::Horizontal => (width, height),
            Axis::Vertical => (height, width),
        };
        if along == 0 || self.children.is_empty() {
            return Vec::new();
        }
        let across = (across > 0).then_some(across);
        distribute(along, self.children.len())
            .into_iter()
            .map(|share| match axis {
                Axis::Horizontal => (Some(share), across),
                Axis::Vertical => (across, Some(share)),
            })
            .collect()
    }

    /// Draw children in order, each at its offset along the split axis.
    /// The first failing child stops the walk.
    pub fn draw(&mut self, surface: &mut dyn Surface, row: u16, col: u16) -> Result<()> {
        let axis = self.axis();
        for child in &mut self.children {
            let (child_row, child_col) = match axis {
                Axis::Horizontal => (row, col.saturating_add(child.offset)),
                Axis::Vertical => (row.saturating_add(child.offset), col),
            };
            child.pane.draw(surface, child_row, child_col)?;
        }
        Ok(())
    }

    pub fn dimensions(&self) -> &PaneDimensions {
        &self.dims
    }

    pub fn dimensions_mut(&mut self) -> &mut PaneDimensions {
        &mut self.dims
    }
}

/// Any node of the pane tree.
#[derive(Debug)]
pub enum Pane {
    View(ViewPane),
    Split(BspPane),
}

impl Pane {
    pub fn draw(&mut self, surface: &mut dyn Surface, row: u16, col: u16) -> Result<()> {
        match self {
            Pane::View(view) => view.draw(surface, row, col),
            Pane::Split(split) => split.draw(surface, row, col),
        }
    }

    /// Store a new width. Split panes do not redistribute until
    /// [`Pane::recalc`] is called.
    pub fn set_width(&mut self, width: u16) -> Result<()> {
        self.dimensions_mut().set_width(width)
    }

    /// Store a new height. Split panes do not redistribute until
    /// [`Pane::recalc`] is called.
    pub fn set_height(&mut self, height: u16) -> Result<()> {
        self.dimensions_mut().set_height(height)
    }

    pub fn dims(&self) -> (u16, u16) {
        self.dimensions().dims()
    }

    pub fn min_dims(&self) -> (u16, u16) {
        self.dimensions().min_dims()
    }

    pub fn max_dims(&self) -> (Option<u16>, Option<u16>) {
        self.dimensions().max_dims()
    }

    /// Redistribute sizes below this pane. Leaves have nothing to do.
    pub fn recalc(&mut self) -> Result<()> {
        match self {
            Pane::View(_) => Ok(()),
            Pane::Split(split) => split.recalc(),
        }
    }

    pub fn as_split(&self) -> Option<&BspPane> {
        match self {
            Pane::Split(split) => Some(split),
            Pane::View(_) => None,
        }
    }

    pub fn as_split_mut(&mut self) -> Option<&mut BspPane> {
        match self {
            Pane::Split(split) => Some(split),
            Pane::View(_) => None,
        }
    }

    fn dimensions(&self) -> &PaneDimensions {
        match self {
            Pane::View(view) => view.dimensions(),
            Pane::Split(split) => split.dimensions(),
        }
    }

    fn dimensions_mut(&mut self) -> &mut PaneDimensions {
        match self {
            Pane::View(view) => view.dimensions_mut(),
            Pane::Split(split) => split.dimensions_mut(),
        }
    }
}

impl From<ViewPane> for Pane {
    fn from(view: ViewPane) -> Self {
        Pane::View(view)
    }
}

impl From<BspPane> for Pane {
    fn from(split: BspPane) -> Self {
        Pane::Split(split)
    }
}

/// Split `size` cells over `count` slots; the first `size % count` slots get
/// one more cell than the rest.
pub fn distribute(size: u16, count: usize) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let size = usize::from(size);
    let base = size / count;
    let remainder = size % count;
    (0..count)
        .map(|idx| {
            let share = if idx < remainder { base + 1 } else { base };
            // share <= size, which came from a u16
            share as u16
        })
        .collect()
}
