//! Fluent shell command builder and runner
//!
//! A [`Command`] assembles an escaped command line from typed fragments
//! (sub-commands, options, arguments), runs it through a [`ShellExecutor`],
//! and reports failures to a [`ReportSink`] instead of raising them.

use crate::escape::{escape_argument, escape_command};
use crate::exec::{ShellExecutor, SystemShell};
use crate::report::{render_report, ReportSink, TracingSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Builder errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid fragment: {0}")]
    InvalidFragment(String),
}

/// Snapshot of the most recent run, suitable for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Rendered command line that was executed
    pub command: String,

    /// Process exit code
    pub exit_code: i32,

    /// Captured output lines
    pub output: Vec<String>,

    /// Execution duration (milliseconds)
    pub duration_ms: u64,

    /// Whether the exit code was zero
    pub success: bool,
}

/// Shell command assembled from escaped fragments.
///
/// Fragments are escaped when appended and never reordered or removed, so the
/// rendered string is safe regardless of append order. Running never raises
/// on a non-zero exit: the outcome lands in [`last_exit_code`] and
/// [`last_output`] and, when warranted, in the report sink.
///
/// Single-owner mutable state; not intended for concurrent mutation.
///
/// [`last_exit_code`]: Command::last_exit_code
/// [`last_output`]: Command::last_output
pub struct Command {
    base: String,
    parts: Vec<String>,
    always_log: bool,
    last_command: Option<String>,
    last_exit_code: Option<i32>,
    last_output: Vec<String>,
    last_duration_ms: Option<u64>,
    executor: Box<dyn ShellExecutor>,
    sink: Arc<dyn ReportSink>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("base", &self.base)
            .field("parts", &self.parts)
            .field("always_log", &self.always_log)
            .field("last_exit_code", &self.last_exit_code)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Create a builder for the given executable name or path.
    pub fn new(base: impl AsRef<str>) -> Self {
        Self {
            base: escape_command(base.as_ref()),
            parts: Vec::new(),
            always_log: false,
            last_command: None,
            last_exit_code: None,
            last_output: Vec::new(),
            last_duration_ms: None,
            executor: Box::new(SystemShell::new()),
            sink: Arc::new(TracingSink::new()),
        }
    }

    /// Report every run to the sink, not just failures.
    pub fn with_always_log(mut self, always_log: bool) -> Self {
        self.always_log = always_log;
        self
    }

    /// Substitute the process-execution strategy.
    pub fn with_executor(mut self, executor: impl ShellExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Substitute the report sink.
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Append a sub-command token (the `add` in `git add`).
    ///
    /// Escaped for command position; unsafe input is neutralized, never
    /// rejected.
    pub fn sub_command(&mut self, name: &str) -> &mut Self {
        self.parts.push(escape_command(name));
        self
    }

    /// Append a long flag: `--name`.
    pub fn long_option(&mut self, name: &str) -> Result<&mut Self, CommandError> {
        validate_option_name(name)?;
        self.parts.push(format!("--{}", escape_command(name)));
        Ok(self)
    }

    /// Append a long option with a value: `--name` followed by the escaped
    /// value as its own fragment.
    pub fn long_option_value(&mut self, name: &str, value: &str) -> Result<&mut Self, CommandError> {
        self.long_option(name)?;
        self.parts.push(escape_argument(value));
        Ok(self)
    }

    /// Append a short flag: `-flag`, or the flag literally when it already
    /// carries a `+` or `-` prefix (some tools use `+`-prefixed flags).
    pub fn option(&mut self, flag: &str) -> Result<&mut Self, CommandError> {
        validate_option_name(flag)?;
        if flag.starts_with('+') || flag.starts_with('-') {
            self.parts.push(escape_command(flag));
        } else {
            self.parts.push(format!("-{}", escape_command(flag)));
        }
        Ok(self)
    }

    /// Append a short flag with a value.
    pub fn option_value(&mut self, flag: &str, value: &str) -> Result<&mut Self, CommandError> {
        self.option(flag)?;
        self.parts.push(escape_argument(value));
        Ok(self)
    }

    /// Append one positional argument, escaped as opaque data.
    pub fn argument(&mut self, value: &str) -> &mut Self {
        self.parts.push(escape_argument(value));
        self
    }

    /// Append the trailing `2>&1` redirection so captured output carries
    /// stderr merged into stdout, in order.
    pub fn redirect_stderr_to_stdout(&mut self) -> &mut Self {
        self.parts.push("2>&1".to_string());
        self
    }

    /// Render the command line: base and fragments, space-separated, in
    /// append order. Pure; does not execute anything.
    pub fn to_command_string(&self) -> String {
        let mut rendered = self.base.clone();
        for part in &self.parts {
            rendered.push(' ');
            rendered.push_str(part);
        }
        rendered
    }

    /// Execute the assembled command, reporting only on failure (unless the
    /// instance-level always-log flag is set).
    pub fn run(&mut self) -> &mut Self {
        self.run_logged(false)
    }

    /// Execute the assembled command.
    ///
    /// Blocks until the process exits. Overwrites [`last_exit_code`] and
    /// [`last_output`] with this run's outcome, then writes a report to the
    /// sink when the exit code is non-zero or when `always_log` (parameter
    /// or instance flag) is set. Returns `&mut Self` for chained inspection.
    ///
    /// [`last_exit_code`]: Command::last_exit_code
    /// [`last_output`]: Command::last_output
    pub fn run_logged(&mut self, always_log: bool) -> &mut Self {
        let command_line = self.to_command_string();

        debug!("Running shell command: {}", command_line);

        let started = Instant::now();
        let output = self.executor.execute(&command_line);
        let duration_ms = started.elapsed().as_millis() as u64;

        debug!(
            "Command exited with code {} after {} ms",
            output.exit_code, duration_ms
        );

        self.last_exit_code = Some(output.exit_code);
        self.last_output = output.lines;
        self.last_duration_ms = Some(duration_ms);

        if output.exit_code != 0 || always_log || self.always_log {
            let report = render_report(&command_line, output.exit_code, &self.last_output);
            self.sink.log(&report);
        }

        self.last_command = Some(command_line);

        self
    }

    /// Exit code of the most recent run; `None` before any run.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code
    }

    /// Captured output lines of the most recent run.
    pub fn last_output(&self) -> &[String] {
        &self.last_output
    }

    /// Whether the most recent run exited zero. `false` before any run.
    pub fn succeeded(&self) -> bool {
        self.last_exit_code == Some(0)
    }

    /// Serializable snapshot of the most recent run; `None` before any run.
    pub fn record(&self) -> Option<RunRecord> {
        let exit_code = self.last_exit_code?;
        Some(RunRecord {
            command: self.last_command.clone()?,
            exit_code,
            output: self.last_output.clone(),
            duration_ms: self.last_duration_ms.unwrap_or(0),
            success: exit_code == 0,
        })
    }
}

fn validate_option_name(name: &str) -> Result<(), CommandError> {
    if name.is_empty() {
        return Err(CommandError::InvalidFragment(
            "option name must not be empty".to_string(),
        ));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(CommandError::InvalidFragment(format!(
            "option name must not contain whitespace: {:?}",
            name
        )));
    }

    Ok(())
}
