use thiserror::Error;

use crate::geometry::{BorderWidths, Cell};

/// Unified result type for the poyekhali crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Which pane dimension a size check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

/// Errors surfaced by the layout and drawing engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
    #[error("{context} expects {expected} argument(s), got {found}")]
    InvalidArgumentCount {
        context: &'static str,
        expected: &'static str,
        found: usize,
        fallback: Option<BorderWidths>,
    },
    #[error("lines must be horizontal or vertical, got {start:?} -> {end:?}")]
    InvalidLineGeometry { start: Cell, end: Cell },
    #[error("{dimension} {value} outside bounds [{min}, {}]", max.map(|m| m.to_string()).unwrap_or_else(|| "unbounded".to_string()))]
    SizeOutOfBounds {
        dimension: Dimension,
        value: u16,
        min: u16,
        max: Option<u16>,
    },
    #[error("renderer failure: {0}")]
    Renderer(String),
    #[error("drawing script error: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    /// Fallback border widths attached to an arity failure, if any.
    pub fn fallback_widths(&self) -> Option<BorderWidths> {
        match self {
            Self::InvalidArgumentCount { fallback, .. } => *fallback,
            _ => None,
        }
    }
}
