mod utils;

pub use utils::{cell_count, strip_ansi};
