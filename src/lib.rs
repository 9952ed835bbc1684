//! Terminal pane layout for mission-control style dashboards.
//!
//! A window holds a binary-space-partitioning pane tree. Split panes share
//! their size between children with a remainder-fair distribution, and leaf
//! panes hand their area to a renderer. Renderers draw through the line and
//! box primitives onto a [`Surface`], either an in-memory [`GridBuffer`] or a
//! crossterm [`TerminalSurface`].

pub mod appearance;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod script;
pub mod surface;
pub mod width;
pub mod window;

pub use appearance::Appearance;
pub use config::{Palette, UiConfig};
pub use driver::{CliDriver, CliDriverError, DriverResult, LoopControl, play_script};
pub use error::{Dimension, LayoutError, Result};
pub use geometry::{BorderStyle, BorderWidths, Cell, Rectangle, Size};
pub use layout::{
    Axis, BspPane, Division, Pane, PaneConstraints, PaneDimensions, Renderer, ViewPane, distribute,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{MetricSnapshot, RenderMetrics};
pub use render::{BoxOptions, draw_box, draw_line, truncate_title};
pub use script::{DrawingScript, NoPacer, Pacer, ScriptPlayer, ThreadPacer};
pub use surface::{GridBuffer, GridCell, Surface, TerminalSurface};
pub use width::{cell_count, strip_ansi};
pub use window::{MissionControl, Panel, StatusBar, Window};
