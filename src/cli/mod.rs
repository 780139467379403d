//! Command line interface

pub mod args;
pub mod output;

pub use args::{Args, Mode, VerbosityLevel};
pub use output::{create_progress_callback, OutputFormatter};
