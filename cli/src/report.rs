//! `doctor` and `show-config` output

use colored::Colorize;
use devops_domain::{ResolvedConfig, Scope, known_keys};
use devops_infrastructure::{ConfigSource, DiscoveryResult, FileConfig};
use devops_presentation::OutputFormat;
use serde_json::json;

pub fn doctor(discovery: &DiscoveryResult, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(discovery).unwrap_or_default();
    }

    let mut output = format!("{}\n", "External CLIs:".cyan().bold());
    for binary in &discovery.binaries {
        let (mark, location) = match &binary.path {
            Some(path) => ("✓".green(), path.display().to_string()),
            None => ("✗".red(), "not found".to_string()),
        };
        output.push_str(&format!(
            "  {} {:<10} {:<28} {}\n",
            mark,
            binary.command,
            location,
            binary.tools.join(", ").dimmed()
        ));
        if let Some(alternative) = &binary.alternative {
            output.push_str(&format!(
                "      {} {} is installed; set devops.{} = \"{}\"\n",
                "→".yellow(),
                alternative,
                binary.config_key,
                alternative
            ));
        }
    }

    if discovery.all_available() {
        output.push_str(&format!("\n{}", "All tools can run.".green()));
    } else {
        let missing: Vec<&str> = discovery
            .missing()
            .flat_map(|b| b.tools.iter().copied())
            .collect();
        output.push_str(&format!(
            "\n{} {}",
            "Unavailable tools:".yellow(),
            missing.join(", ")
        ));
    }
    output
}

pub fn show_config(
    sources: &[ConfigSource],
    config: &FileConfig,
    resolved: &ResolvedConfig,
    format: OutputFormat,
) -> String {
    let issues: Vec<String> = config.validate().iter().map(ToString::to_string).collect();

    if format == OutputFormat::Json {
        let sources: Vec<_> = sources
            .iter()
            .map(|s| json!({"label": s.label, "location": s.location, "found": s.found}))
            .collect();
        return serde_json::to_string_pretty(&json!({
            "sources": sources,
            "config": config,
            "resolved": resolved,
            "issues": issues,
        }))
        .unwrap_or_default();
    }

    let mut output = format!("{}\n", "Configuration sources (in priority order):".cyan().bold());
    for source in sources {
        let marker = if source.found { "[FOUND]" } else { "[     ]" };
        output.push_str(&format!(
            "  {} {:<9} {}\n",
            marker,
            format!("{}:", source.label),
            source.location
        ));
    }

    output.push_str(&format!("\n{}\n", "Effective values:".cyan().bold()));
    let registry = resolved.docker_registry.as_deref().unwrap_or("-");
    let protected = config.devops.protected_namespaces.join(", ");
    let values = [
        ("cloud_provider", resolved.cloud_provider.as_str()),
        ("k8s_namespace", resolved.k8s_namespace.as_str()),
        ("docker_registry", registry),
        ("container_runtime", resolved.container_runtime.binary()),
        ("kubectl_binary", resolved.kubectl_binary.as_str()),
        ("terraform_binary", resolved.terraform_binary.as_str()),
        ("protected_namespaces", protected.as_str()),
    ];
    for (key, value) in values {
        let info = known_keys().iter().find(|k| k.key == key);
        let scope = match info.map(|k| k.scope) {
            Some(Scope::PerCall) => "per-call",
            _ => "startup",
        };
        output.push_str(&format!(
            "  {:<21} {:<24} {}\n",
            key,
            value,
            format!("({}, {})", scope, info.map(|k| k.env_var).unwrap_or("-")).dimmed()
        ));
    }

    if !issues.is_empty() {
        output.push_str(&format!("\n{}\n", "Issues:".yellow().bold()));
        for issue in &issues {
            output.push_str(&format!("  ! {}\n", issue));
        }
    }

    output.trim_end().to_string()
}
