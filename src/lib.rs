//! Command Runner - Shell command building and execution with reporting
//!
//! This crate provides safe shell command construction and execution with:
//! - Per-fragment escaping at append time (injection protection)
//! - Fluent builder for sub-commands, options, flags, and arguments
//! - Blocking execution through the platform shell
//! - Fire-and-report failure logging instead of raised errors
//! - Swappable execution and logging seams for tests

pub mod command;
pub mod escape;
pub mod exec;
pub mod report;

pub use command::{Command, CommandError, RunRecord};
pub use escape::{escape_argument, escape_command};
pub use exec::{ShellExecutor, ShellOutput, SystemShell};
pub use report::{MemorySink, ReportSink, TracingSink};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
