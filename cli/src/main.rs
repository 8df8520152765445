//! CLI entrypoint for victor-devops
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod report;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use devops_application::ports::tool_schema::ToolSchemaPort;
use devops_application::{CommandDispatcher, DispatchProgress, NoDispatchProgress};
use devops_domain::{ConfigOverrides, ToolCatalog, ToolResponse, default_catalog};
use devops_infrastructure::{
    ConfigLoader, DryRunExecutor, FileConfig, JsonSchemaToolConverter, JsonlInvocationLogger,
    ProcessExecutor, TeraWorkflowRenderer, discover_binaries,
};
use devops_presentation::{
    Cli, Command, ConsoleFormatter, JsonFormatter, JsonLineServer, OutputFormat, OutputFormatter,
    ProgressReporter, build_tool_call,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting victor-devops");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("failed to load configuration: {}", e))?;

    for issue in file_config.validate() {
        warn!("Config: {}", issue);
    }

    let format = cli
        .output
        .unwrap_or_else(|| OutputFormat::from(file_config.output.format));
    if !file_config.output.color || format == OutputFormat::Json {
        colored::control::set_override(false);
    }
    let formatter: Box<dyn OutputFormatter> = match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let catalog = Arc::new(default_catalog()?);

    match &cli.command {
        Command::List { schema, low_risk } => {
            let output = if *schema {
                let schemas = if *low_risk {
                    JsonSchemaToolConverter.low_risk_tools_schema(&catalog)
                } else {
                    JsonSchemaToolConverter.all_tools_schema(&catalog)
                };
                formatter.format_schemas(&schemas)
            } else {
                formatter.format_tools(&catalog)
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }

        Command::Call {
            tool,
            args,
            args_json,
            dry_run,
            save_artifact,
        } => {
            let call = build_tool_call(&catalog, tool, args, args_json.as_deref())?;

            let progress: Arc<dyn DispatchProgress> = if cli.quiet || format == OutputFormat::Json
            {
                Arc::new(NoDispatchProgress)
            } else if cli.verbose > 0 {
                Arc::new(ProgressReporter::verbose())
            } else {
                Arc::new(ProgressReporter::new())
            };

            let dispatcher = build_dispatcher(&cli, &file_config, catalog, *dry_run)?
                .with_progress(progress);
            let response = dispatcher.dispatch_response(&call).await;

            if let Some(path) = save_artifact {
                save_generated(&response, path)?;
            }

            println!("{}", formatter.format_response(&response).trim_end());

            Ok(if response.is_completed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::ServeJson => {
            let dispatcher = build_dispatcher(&cli, &file_config, catalog, false)?;
            let server = JsonLineServer::new(dispatcher, Arc::new(JsonSchemaToolConverter));
            server
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .context("serve-json I/O failed")?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Doctor => {
            let discovery = discover_binaries(&file_config.devops);
            println!("{}", report::doctor(&discovery, format));
            Ok(if discovery.all_available() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::ShowConfig => {
            let sources = ConfigLoader::sources(cli.config.as_ref());
            let resolved = file_config.devops.resolve(&cli_overrides(&cli));
            println!(
                "{}",
                report::show_config(&sources, &file_config, &resolved, format)
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// `--namespace`, `--registry` and `--cloud-provider` as defaults for every call
fn cli_overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        cloud_provider: cli.cloud_provider.clone(),
        k8s_namespace: cli.namespace.clone(),
        docker_registry: cli.registry.clone(),
    }
}

// === Dependency Injection ===
fn build_dispatcher(
    cli: &Cli,
    config: &FileConfig,
    catalog: Arc<ToolCatalog>,
    dry_run: bool,
) -> Result<CommandDispatcher> {
    let executor: Arc<dyn devops_application::CommandExecutor> = if dry_run {
        Arc::new(DryRunExecutor)
    } else {
        Arc::new(ProcessExecutor::new())
    };
    let renderer = Arc::new(TeraWorkflowRenderer::new()?);

    let mut dispatcher = CommandDispatcher::new(
        catalog,
        Arc::new(config.devops.clone()),
        executor,
        renderer,
    )
    .with_default_overrides(cli_overrides(cli));

    let audit_path = cli.audit_log.as_ref().or(config.audit.path.as_ref());
    if let Some(path) = audit_path {
        match JsonlInvocationLogger::open(path) {
            Some(logger) => {
                info!("Audit log: {}", logger.path().display());
                dispatcher = dispatcher.with_invocation_logger(Arc::new(logger));
            }
            None => warn!("Audit logging disabled"),
        }
    }

    Ok(dispatcher)
}

/// Write a generated document to `path`. Process results have nothing to save.
fn save_generated(response: &ToolResponse, path: &Path) -> Result<()> {
    let ToolResponse::Completed { result } = response else {
        return Ok(());
    };
    let Some(artifact) = &result.generated_artifact else {
        warn!(
            "{} does not generate a document; --save-artifact ignored",
            result.tool_name
        );
        return Ok(());
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, artifact)
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Saved {} to {}", result.tool_name, path.display());
    Ok(())
}
