//! Failure reporting sink
//!
//! Execution failures are reported, not raised. The sink is a fire-and-forget
//! collaborator that accepts one formatted message per run worth reporting.

use std::sync::Mutex;
use tracing::error;

/// Accepts a single formatted report message.
///
/// No levels, rotation, or destinations are defined here; the host
/// environment owns those concerns.
pub trait ReportSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Default sink: forwards every report to the tracing error log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for TracingSink {
    fn log(&self, message: &str) {
        error!("{}", message);
    }
}

/// In-memory sink that records messages for later inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }
}

impl ReportSink for MemorySink {
    fn log(&self, message: &str) {
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push(message.to_string());
    }
}

/// Format the report for one run.
///
/// Contains the failure marker (when the exit code is non-zero), the rendered
/// command string, and the captured output joined by newlines when present.
pub fn render_report(command_line: &str, exit_code: i32, lines: &[String]) -> String {
    let failed = if exit_code == 0 { "" } else { " failed" };
    let mut report = format!("Command{}: {}", failed, command_line);

    if !lines.is_empty() {
        report.push_str("\nOutput:\n");
        report.push_str(&lines.join("\n"));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_on_failure_names_command() {
        let report = render_report("git status", 1, &[]);
        assert_eq!(report, "Command failed: git status");
    }

    #[test]
    fn test_report_on_success_has_no_failure_marker() {
        let report = render_report("git status", 0, &[]);
        assert_eq!(report, "Command: git status");
    }

    #[test]
    fn test_report_includes_output_when_present() {
        let lines = vec!["line one".to_string(), "line two".to_string()];
        let report = render_report("ls /missing", 2, &lines);
        assert_eq!(
            report,
            "Command failed: ls /missing\nOutput:\nline one\nline two"
        );
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.log("first");
        sink.log("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }
}
