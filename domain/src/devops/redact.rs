//! Secret redaction for audit logs and traces.
//!
//! Two rules: values under secret-looking keys are replaced wholesale, and
//! anything shaped like a known credential is replaced wherever it appears.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const REDACTED: &str = "[REDACTED]";

static SECRET_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    // `key` and `pass` only as whole `_`/`-` separated words
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?i)(password|passwd|secret|token|api[_-]?key|access[_-]?key|private[_-]?key|credential)|(^|[_-])(key|pass)($|[_-])",
    )
    .expect("valid regex")
});

/// AWS access key ids, GitHub tokens, bearer headers
static CREDENTIAL_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\b(AKIA|ASIA)[0-9A-Z]{16}\b|\bgh[pousr]_[A-Za-z0-9]{36,}\b|(?i)bearer\s+[A-Za-z0-9._~+/=-]{8,}")
        .expect("valid regex")
});

pub fn is_secret_key(key: &str) -> bool {
    SECRET_KEY_RE.is_match(key)
}

/// Replace credential-shaped substrings in free text
pub fn redact_text(text: &str) -> String {
    CREDENTIAL_VALUE_RE.replace_all(text, REDACTED).into_owned()
}

/// Redact a JSON value: secret keys at any depth, credential-shaped strings anywhere
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let redacted = if is_secret_key(k) && !v.is_object() {
                        Value::String(REDACTED.to_string())
                    } else {
                        redact_value(v)
                    };
                    (k.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        Value::String(s) => Value::String(redact_text(s)),
        other => other.clone(),
    }
}

/// Redact an argument vector.
///
/// `NAME=value` arguments (build args, `-e`, `-var`) lose their value when
/// `NAME` looks secret.
pub fn redact_argv(argv: &[String]) -> Vec<String> {
    argv.iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, _)) if !name.starts_with('-') && is_secret_key(name) => {
                format!("{}={}", name, REDACTED)
            }
            _ => redact_text(arg),
        })
        .collect()
}
