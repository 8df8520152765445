//! `docker_build` and `docker_run`.

use super::command::CommandLine;
use super::{DOCKER_BUILD, DOCKER_RUN, required};
use crate::config::ResolvedConfig;
use crate::tool::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolKind, ToolParameter};

pub fn docker_build_definition() -> ToolDefinition {
    ToolDefinition::new(
        DOCKER_BUILD,
        "Build a container image from a build context using the configured container runtime.",
        ToolKind::SpawnProcess,
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("path", "Build context directory", true).with_type(ParamType::Path),
    )
    .with_parameter(ToolParameter::new(
        "tag",
        "Image tag (e.g., app:v1). Prefixed with the registry when it has no registry host",
        true,
    ))
    .with_parameter(
        ToolParameter::new("dockerfile", "Path to the Dockerfile", false).with_type(ParamType::Path),
    )
    .with_parameter(
        ToolParameter::new("build_args", "Build-time variables (KEY=VALUE)", false)
            .with_type(ParamType::StringMap),
    )
    .with_parameter(
        ToolParameter::new("no_cache", "Do not use the build cache", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(ToolParameter::new(
        "platform",
        "Target platform (e.g., linux/amd64)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "registry",
        "Registry override for this call",
        false,
    ))
}

pub fn docker_run_definition() -> ToolDefinition {
    ToolDefinition::new(
        DOCKER_RUN,
        "Run a container from an image using the configured container runtime.",
        ToolKind::SpawnProcess,
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new("image", "Image reference to run", true))
    .with_parameter(ToolParameter::new("name", "Container name", false))
    .with_parameter(
        ToolParameter::new("ports", "Port mappings (host:container)", false)
            .with_type(ParamType::StringList),
    )
    .with_parameter(
        ToolParameter::new("env", "Environment variables (KEY=VALUE)", false)
            .with_type(ParamType::StringMap),
    )
    .with_parameter(
        ToolParameter::new("detach", "Run in the background (default: true)", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(
        ToolParameter::new("remove", "Remove the container when it exits", false)
            .with_type(ParamType::Boolean),
    )
    .with_parameter(
        ToolParameter::new("command", "Command and arguments to run inside the container", false)
            .with_type(ParamType::StringList)
            .allow_leading_dash(),
    )
    .with_parameter(ToolParameter::new(
        "registry",
        "Registry override for this call",
        false,
    ))
}

/// `<runtime> build -t <tag> [-f F] [--build-arg K=V]… [--no-cache] [--platform P] <path>`
pub fn build_docker_build(call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
    let path = required(call, "path")?;
    let tag = qualify_image(required(call, "tag")?, resolved.docker_registry.as_deref());

    let mut cmd = CommandLine::new(resolved.container_runtime.binary())
        .arg("build")
        .arg("-t")
        .arg(tag)
        .opt("-f", call.get_non_empty("dockerfile"));
    for (key, value) in call.get_string_map("build_args") {
        cmd = cmd.arg("--build-arg").arg(format!("{}={}", key, value));
    }
    Ok(cmd
        .flag("--no-cache", call.get_bool("no_cache").unwrap_or(false))
        .opt("--platform", call.get_non_empty("platform"))
        .arg(path))
}

/// `<runtime> run [-d] [--rm] [--name N] [-p P]… [-e K=V]… <image> [command…]`
pub fn build_docker_run(call: &ToolCall, resolved: &ResolvedConfig) -> Result<CommandLine, ToolError> {
    let image = qualify_image(required(call, "image")?, resolved.docker_registry.as_deref());

    let mut cmd = CommandLine::new(resolved.container_runtime.binary())
        .arg("run")
        .flag("-d", call.get_bool("detach").unwrap_or(true))
        .flag("--rm", call.get_bool("remove").unwrap_or(false))
        .opt("--name", call.get_non_empty("name"));
    for port in call.get_string_list("ports") {
        cmd = cmd.arg("-p").arg(port);
    }
    for (key, value) in call.get_string_map("env") {
        cmd = cmd.arg("-e").arg(format!("{}={}", key, value));
    }
    Ok(cmd.arg(image).args(call.get_string_list("command")))
}

/// Prefix `reference` with `registry/` unless it already names a registry host.
///
/// The first path segment is a host when it contains `.` or `:` or is
/// `localhost`; a reference without `/` never carries a host.
pub fn qualify_image(reference: &str, registry: Option<&str>) -> String {
    let reference = reference.trim();
    match registry {
        Some(registry) if !has_registry_host(reference) => format!("{}/{}", registry, reference),
        _ => reference.to_string(),
    }
}

pub fn has_registry_host(reference: &str) -> bool {
    reference.split_once('/').is_some_and(|(first, _)| {
        first.contains('.') || first.contains(':') || first == "localhost"
    })
}

/// Tag part of an image reference, if any (digest references count as pinned)
pub fn image_tag(reference: &str) -> Option<&str> {
    if reference.contains('@') {
        return Some("digest");
    }
    let last = reference.rsplit('/').next().unwrap_or(reference);
    last.split_once(':').map(|(_, tag)| tag)
}
