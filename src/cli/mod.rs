//! Command line interface for release bookkeeping.
//!
//! Parses flags (with CI environment fallbacks), runs the selected step and
//! reports progress with colored output.

mod args;
pub mod commands;
mod output;

pub use args::{
    Args, Command, CreatePageArgs, CreateReleaseArgs, RetryArgs, RuntimeConfig, SinkArgs,
};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
