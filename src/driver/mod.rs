//! Terminal drivers that own raw mode and the alternate screen.

mod cli;

pub use cli::{CliDriver, CliDriverError, DriverResult, LoopControl, play_script};
