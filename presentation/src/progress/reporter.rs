//! Progress reporting for tool calls
//!
//! Everything here writes to stderr so stdout carries only the result.

use colored::Colorize;
use devops_application::ports::progress::DispatchProgress;
use devops_domain::{InvocationState, SafetyFinding, SafetyLevel};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while a call is validated and run
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Create with verbose output (echoes the command line)
    pub fn verbose() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn state_message(state: InvocationState) -> &'static str {
        match state {
            InvocationState::Received => "received",
            InvocationState::Validated => "arguments ok",
            InvocationState::Executing => "running",
            InvocationState::Generating => "rendering",
            InvocationState::Completed => "done",
            InvocationState::Failed => "failed",
        }
    }

    fn start(&self, tool_name: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(tool_name.to_string());
        pb.set_message(Self::state_message(InvocationState::Received));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(pb) = slot.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchProgress for ProgressReporter {
    fn on_state(&self, tool_name: &str, state: InvocationState) {
        match state {
            InvocationState::Received => self.start(tool_name),
            InvocationState::Completed | InvocationState::Failed => self.finish(),
            _ => self.with_spinner(|pb| pb.set_message(Self::state_message(state))),
        }
    }

    fn on_command(&self, _tool_name: &str, command: &str) {
        let verbose = self.verbose;
        self.with_spinner(|pb| {
            pb.set_message(format!("running {}", truncate(command, 60)));
            if verbose {
                pb.println(format!("  {} {}", "$".dimmed(), command));
            }
        });
    }

    fn on_finding(&self, _tool_name: &str, finding: &SafetyFinding) {
        let line = format_finding(finding);
        self.with_spinner(|pb| pb.println(&line));
    }
}

/// Line-based progress for terminals without spinner support
pub struct SimpleProgress;

impl DispatchProgress for SimpleProgress {
    fn on_state(&self, tool_name: &str, state: InvocationState) {
        match state {
            InvocationState::Completed => eprintln!("{} {}", "v".green(), tool_name),
            InvocationState::Failed => eprintln!("{} {}", "x".red(), tool_name),
            InvocationState::Executing | InvocationState::Generating => eprintln!(
                "{} {} {}",
                "->".cyan(),
                tool_name.bold(),
                ProgressReporter::state_message(state)
            ),
            _ => {}
        }
    }

    fn on_command(&self, _tool_name: &str, command: &str) {
        eprintln!("  {} {}", "$".dimmed(), command);
    }

    fn on_finding(&self, _tool_name: &str, finding: &SafetyFinding) {
        eprintln!("{}", format_finding(finding));
    }
}

fn format_finding(finding: &SafetyFinding) -> String {
    let label = format!("[{}]", finding.level);
    let label = match finding.level {
        SafetyLevel::High => label.red().bold(),
        SafetyLevel::Medium => label.yellow(),
        SafetyLevel::Low => label.dimmed(),
    };
    format!("  {} {} {}", "!".yellow(), label, finding.message)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
