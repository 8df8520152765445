//! Advisory safety findings for built commands.
//!
//! Findings are attached to the result and logged. They never block a call;
//! the host framework decides what to do with them.

use super::command::CommandLine;
use super::docker::image_tag;
use super::terraform::chdir_of;
use super::{DOCKER_BUILD, DOCKER_RUN, K8S_APPLY, TERRAFORM_APPLY};
use crate::config::DevOpsConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Low,
    Medium,
    High,
}

impl SafetyLevel {
    pub fn as_str(&self) -> &str {
        match self {
            SafetyLevel::Low => "low",
            SafetyLevel::Medium => "medium",
            SafetyLevel::High => "high",
        }
    }
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFinding {
    /// Stable rule id (e.g., `auto_approve`)
    pub rule: String,
    pub level: SafetyLevel,
    pub message: String,
}

impl SafetyFinding {
    fn new(rule: &str, level: SafetyLevel, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            level,
            message: message.into(),
        }
    }
}

/// Inspects the command about to run for a tool.
#[derive(Debug, Clone)]
pub struct SafetyScanner {
    protected: Vec<String>,
}

impl SafetyScanner {
    pub fn new(config: &DevOpsConfig) -> Self {
        Self {
            protected: config.protected_namespaces.clone(),
        }
    }

    fn is_protected(&self, name: &str) -> bool {
        self.protected.iter().any(|p| p.eq_ignore_ascii_case(name))
    }

    pub fn scan(&self, tool_name: &str, cmd: &CommandLine) -> Vec<SafetyFinding> {
        let mut findings = Vec::new();

        match tool_name {
            K8S_APPLY => {
                if let Some(ns) = cmd.arg_value("-n")
                    && self.is_protected(ns)
                    && !cmd.args.iter().any(|a| a.starts_with("--dry-run="))
                {
                    findings.push(SafetyFinding::new(
                        "protected_namespace",
                        SafetyLevel::Medium,
                        format!("applying manifests to protected namespace '{}'", ns),
                    ));
                }
            }
            TERRAFORM_APPLY => {
                if cmd.has_arg("-auto-approve") {
                    findings.push(SafetyFinding::new(
                        "auto_approve",
                        SafetyLevel::High,
                        "terraform apply without a reviewed plan (-auto-approve)",
                    ));
                }
                if let Some(dir) = chdir_of(cmd)
                    && let Some(env) = self.protected_component(dir)
                {
                    findings.push(SafetyFinding::new(
                        "protected_environment",
                        SafetyLevel::High,
                        format!("terraform apply in protected environment '{}'", env),
                    ));
                }
            }
            DOCKER_BUILD => {
                if let Some(tag) = cmd.arg_value("-t") {
                    self.check_image_pin(tag, &mut findings);
                }
            }
            DOCKER_RUN => {
                if let Some(image) = run_image(cmd) {
                    self.check_image_pin(image, &mut findings);
                }
            }
            _ => {}
        }

        findings
    }

    fn check_image_pin(&self, reference: &str, findings: &mut Vec<SafetyFinding>) {
        match image_tag(reference) {
            None | Some("latest") => findings.push(SafetyFinding::new(
                "unpinned_image",
                SafetyLevel::Low,
                format!("image '{}' is not pinned to a version tag", reference),
            )),
            Some(_) => {}
        }
    }

    fn protected_component<'a>(&self, dir: &'a str) -> Option<&'a str> {
        dir.split(['/', '\\'])
            .find(|part| !part.is_empty() && self.is_protected(part))
    }
}

/// Image operand of a `run` command: the first argument after the flags
fn run_image(cmd: &CommandLine) -> Option<&str> {
    let mut args = cmd.args.iter().skip_while(|a| a.as_str() != "run").skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--name" | "-p" | "-e" => {
                args.next();
            }
            flag if flag.starts_with('-') => {}
            image => return Some(image),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> SafetyScanner {
        SafetyScanner::new(&DevOpsConfig::default())
    }

    #[test]
    fn test_protected_namespace() {
        let cmd = CommandLine::new("kubectl").args(["apply", "-f", "a.yaml", "-n", "kube-system"]);
        let findings = scanner().scan(K8S_APPLY, &cmd);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "protected_namespace");
        assert_eq!(findings[0].level, SafetyLevel::Medium);
    }

    #[test]
    fn test_protected_namespace_dry_run_is_fine() {
        let cmd = CommandLine::new("kubectl")
            .args(["apply", "-f", "a.yaml", "-n", "production", "--dry-run=server"]);
        assert!(scanner().scan(K8S_APPLY, &cmd).is_empty());
    }

    #[test]
    fn test_terraform_auto_approve_in_prod() {
        let cmd = CommandLine::new("terraform").args([
            "-chdir=envs/prod",
            "apply",
            "-input=false",
            "-auto-approve",
        ]);
        let rules: Vec<String> = scanner()
            .scan(TERRAFORM_APPLY, &cmd)
            .into_iter()
            .map(|f| f.rule)
            .collect();
        assert_eq!(rules, vec!["auto_approve", "protected_environment"]);
    }

    #[test]
    fn test_terraform_apply_plan_in_dev() {
        let cmd = CommandLine::new("terraform").args(["-chdir=envs/dev", "apply", "-input=false", "tfplan"]);
        assert!(scanner().scan(TERRAFORM_APPLY, &cmd).is_empty());
    }

    #[test]
    fn test_unpinned_images() {
        let build = CommandLine::new("docker").args(["build", "-t", "app", "."]);
        assert_eq!(scanner().scan(DOCKER_BUILD, &build)[0].rule, "unpinned_image");

        let run = CommandLine::new("docker").args(["run", "-d", "--name", "web", "-p", "80:80", "nginx:latest"]);
        assert_eq!(scanner().scan(DOCKER_RUN, &run).len(), 1);

        let pinned = CommandLine::new("docker").args(["run", "-d", "nginx:1.27", "sh"]);
        assert!(scanner().scan(DOCKER_RUN, &pinned).is_empty());
    }

    #[test]
    fn test_levels_order() {
        assert!(SafetyLevel::High > SafetyLevel::Medium);
        assert!(SafetyLevel::Medium > SafetyLevel::Low);
    }
}
