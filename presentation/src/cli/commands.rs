//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text
    Text,
    /// One JSON document per result
    Json,
}

impl From<devops_domain::OutputFormat> for OutputFormat {
    fn from(format: devops_domain::OutputFormat) -> Self {
        match format {
            devops_domain::OutputFormat::Text => OutputFormat::Text,
            devops_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for victor-devops
#[derive(Parser, Debug)]
#[command(name = "victor-devops")]
#[command(author, version, about = "DevOps tool catalog for agent frameworks")]
#[command(long_about = r#"
victor-devops exposes Docker, Kubernetes, Terraform and GitHub Actions as a
small catalog of named tools. Each call is validated against the tool's
parameters, run exactly once, and reported as a structured result.

Configuration files are loaded from (in priority order):
1. VICTOR_DEVOPS_* environment variables
2. --config <path>     Explicit config file
3. ./devops.toml       Project-level config
4. ~/.config/victor-devops/config.toml   Global config

Example:
  victor-devops list
  victor-devops call docker_build --arg path=./app --arg tag=app:v1
  victor-devops call k8s_apply --arg manifest=deploy.yaml --namespace staging --dry-run
  victor-devops call github_workflow --arg language=rust --save-artifact .github/workflows/ci.yml
  victor-devops serve-json < calls.jsonl
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (default: from config, else text)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Default Kubernetes namespace for this run
    #[arg(long, global = true, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Default Docker registry for this run
    #[arg(long, global = true, value_name = "HOST")]
    pub registry: Option<String>,

    /// Default cloud provider for this run
    #[arg(long, global = true, value_name = "PROVIDER")]
    pub cloud_provider: Option<String>,

    /// Append one JSON line per tool call to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the tools in the catalog
    List {
        /// Print JSON Schema for each tool instead of a summary
        #[arg(long)]
        schema: bool,

        /// With --schema, leave out high-risk tools
        #[arg(long, requires = "schema")]
        low_risk: bool,
    },

    /// Invoke one tool
    Call {
        /// Tool name (see `list`)
        tool: String,

        /// Argument as KEY=VALUE; lists and maps are comma separated
        #[arg(short, long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// Arguments as a JSON object (merged under --arg)
        #[arg(long, value_name = "JSON")]
        args_json: Option<String>,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Write a generated document to this path
        #[arg(long, value_name = "PATH")]
        save_artifact: Option<PathBuf>,
    },

    /// Read one tool call JSON per stdin line, answer one response per line
    ServeJson,

    /// Check which external CLIs are installed
    Doctor,

    /// Show configuration sources and effective values
    ShowConfig,
}
