//! Pane tree layout engine.
//!
//! Downstream code imports pane types from here while the implementation
//! details live in the private `core` module.

mod core;

pub use self::core::{
    Axis, BspPane, Division, Pane, PaneConstraints, PaneDimensions, Renderer, ViewPane, distribute,
};
