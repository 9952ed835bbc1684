mod types;

pub use types::{Dimension, LayoutError, Result};
