//! Console output formatter for tool results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use devops_domain::devops::redact::redact_argv;
use devops_domain::{
    InvocationResult, RiskLevel, SafetyFinding, SafetyLevel, ToolCatalog, ToolError,
    ToolResponse,
};
use serde_json::Value;

/// Formats tool results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the outcome of one call
    pub fn format(response: &ToolResponse) -> String {
        match response {
            ToolResponse::Completed { result } => Self::format_result(result),
            ToolResponse::Failed {
                code,
                retryable,
                error,
                ..
            } => Self::format_error(code, *retryable, error),
        }
    }

    fn format_result(result: &InvocationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} {}\n",
            "✓".green().bold(),
            result.tool_name.bold(),
            format!("({}ms)", result.duration_ms).dimmed()
        ));

        if let Some(command) = &result.command {
            output.push_str(&format!(
                "{} {}\n",
                "$".dimmed(),
                redact_argv(command).join(" ").cyan()
            ));
        }

        output.push_str(&Self::format_warnings(&result.warnings));

        if let Some(artifact) = &result.generated_artifact {
            output.push_str(&Self::section_header("Generated"));
            output.push_str(artifact);
            if !artifact.ends_with('\n') {
                output.push('\n');
            }
        }

        if !result.stdout.trim().is_empty() {
            output.push_str(&Self::section_header("stdout"));
            output.push_str(&Self::indent(result.stdout.trim_end(), "  "));
            output.push('\n');
        }
        if !result.stderr.trim().is_empty() {
            output.push_str(&Self::section_header("stderr"));
            output.push_str(&Self::indent(result.stderr.trim_end(), "  ").dimmed().to_string());
            output.push('\n');
        }

        output
    }

    fn format_error(code: &str, retryable: bool, error: &ToolError) -> String {
        let mut output = format!(
            "{} {}\n  {}\n",
            "✗".red().bold(),
            format!("[{}]", code).red().bold(),
            error
        );

        if let ToolError::ExternalProcessFailure { stdout, stderr, .. } = error {
            if !stdout.trim().is_empty() {
                output.push_str(&Self::section_header("stdout"));
                output.push_str(&Self::indent(stdout.trim_end(), "  "));
                output.push('\n');
            }
            if !stderr.trim().is_empty() {
                output.push_str(&Self::section_header("stderr"));
                output.push_str(&Self::indent(stderr.trim_end(), "  "));
                output.push('\n');
            }
        }

        if retryable {
            output.push_str(&format!(
                "  {}\n",
                "Fix the arguments and call again.".yellow()
            ));
        }
        output
    }

    fn format_warnings(warnings: &[SafetyFinding]) -> String {
        let mut output = String::new();
        for finding in warnings {
            let level = format!("[{}]", finding.level);
            let level = match finding.level {
                SafetyLevel::High => level.red().bold(),
                SafetyLevel::Medium => level.yellow().bold(),
                SafetyLevel::Low => level.dimmed(),
            };
            output.push_str(&format!(
                "  {} {} {}: {}\n",
                "!".yellow(),
                level,
                finding.rule,
                finding.message
            ));
        }
        output
    }

    /// Format the catalog as a table of tools and their parameters
    pub fn format_tools(catalog: &ToolCatalog) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Tools:".cyan().bold(),
            catalog.len()
        ));

        for tool in catalog.list() {
            let risk = match tool.risk_level {
                RiskLevel::High => "high risk".red(),
                RiskLevel::Low => "low risk".green(),
            };
            output.push_str(&format!(
                "\n  {} {} {}\n    {}\n",
                tool.name.bold(),
                format!("({})", tool.kind).dimmed(),
                risk,
                tool.description
            ));

            for param in &tool.parameters {
                let marker = if param.required { "*" } else { " " };
                let mut line = format!(
                    "    {}{:<14} {:<8} {}",
                    marker.yellow(),
                    param.name,
                    param.param_type.as_str(),
                    param.description
                );
                if let Some(allowed) = &param.allowed_values {
                    line.push_str(&format!(" [{}]", allowed.join("|")).dimmed().to_string());
                }
                output.push_str(&line);
                output.push('\n');
            }
        }

        output.push_str(&format!("\n{}\n", "* required".dimmed()));
        output
    }

    fn section_header(title: &str) -> String {
        format!("{}\n", format!("── {} ──", title).yellow())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &ToolResponse) -> String {
        Self::format(response)
    }

    fn format_tools(&self, catalog: &ToolCatalog) -> String {
        Self::format_tools(catalog)
    }

    /// Schemas are JSON whatever the format
    fn format_schemas(&self, schemas: &[Value]) -> String {
        serde_json::to_string_pretty(schemas).unwrap_or_else(|_| "[]".to_string())
    }
}
