//! Shell execution boundary
//!
//! The builder hands a fully rendered command line to a [`ShellExecutor`]
//! and gets back output lines plus an exit code. The trait exists so tests
//! and embedders can substitute the process strategy.

use std::process::Command as ProcessCommand;

/// Result of executing one command line through the shell.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// Captured output lines, stdout first then stderr. Use the `2>&1`
    /// redirection fragment for a single ordered stream.
    pub lines: Vec<String>,

    /// Process exit code, 0 means success.
    pub exit_code: i32,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes a rendered command line and reports its outcome.
///
/// Implementations never raise for a failing command: environment errors
/// (missing binary, permission denied) surface uniformly as a non-zero exit
/// code with descriptive output lines.
pub trait ShellExecutor: Send + Sync {
    fn execute(&self, command_line: &str) -> ShellOutput;
}

/// Default executor: runs the command line through the platform shell,
/// blocking until the process exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl SystemShell {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command_line: &str) -> ProcessCommand {
        if cfg!(windows) {
            let mut command = ProcessCommand::new("cmd");
            command.args(["/C", command_line]);
            command
        } else {
            let mut command = ProcessCommand::new("/bin/sh");
            command.args(["-c", command_line]);
            command
        }
    }
}

impl ShellExecutor for SystemShell {
    fn execute(&self, command_line: &str) -> ShellOutput {
        match Self::shell_command(command_line).output() {
            Ok(output) => {
                let mut lines: Vec<String> = Vec::new();
                collect_lines(&output.stdout, &mut lines);
                collect_lines(&output.stderr, &mut lines);

                ShellOutput {
                    lines,
                    // Killed by signal on Unix leaves no code.
                    exit_code: output.status.code().unwrap_or(-1),
                }
            }
            // The shell itself failed to spawn. 127 is the shell's own
            // "command not found" code, so callers see one uniform failure shape.
            Err(err) => ShellOutput {
                lines: vec![format!("failed to spawn shell: {}", err)],
                exit_code: 127,
            },
        }
    }
}

fn collect_lines(bytes: &[u8], lines: &mut Vec<String>) {
    let text = String::from_utf8_lossy(bytes);
    lines.extend(text.lines().map(str::to_string));
}
