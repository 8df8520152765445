//! JSON-lines tool server
//!
//! The host framework writes one request per line and reads one response per
//! line, in the same order:
//!
//! ```text
//! → {"tool_name": "k8s_apply", "arguments": {"manifest": "deploy.yaml"}}
//! ← {"status": "completed", "result": {...}}
//! → {"command": "list_tools"}
//! ← {"status": "completed", "tools": [...]}
//! ```
//!
//! A malformed line gets an `INVALID_REQUEST` failure; the session goes on.

use devops_application::CommandDispatcher;
use devops_application::ports::tool_schema::ToolSchemaPort;
use devops_domain::ToolCall;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const LIST_TOOLS: &str = "list_tools";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Request {
    Call(ToolCall),
    Command { command: String },
}

/// Counters for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub requests: usize,
    pub failures: usize,
}

pub struct JsonLineServer {
    dispatcher: CommandDispatcher,
    schema: Arc<dyn ToolSchemaPort>,
}

impl JsonLineServer {
    pub fn new(dispatcher: CommandDispatcher, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self { dispatcher, schema }
    }

    /// Serve until `reader` reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<ServeStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = ServeStats::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.handle_line(line).await;
            stats.requests += 1;
            if response["status"] != "completed" {
                stats.failures += 1;
            }

            writer.write_all(response.to_string().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!(
            "serve-json finished: {} requests, {} failed",
            stats.requests, stats.failures
        );
        Ok(stats)
    }

    /// Answer one request line
    pub async fn handle_line(&self, line: &str) -> Value {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected request line: {}", e);
                return invalid_request(format!("malformed request: {}", e));
            }
        };

        match request {
            Request::Call(call) => {
                let response = self.dispatcher.dispatch_response(&call).await;
                serde_json::to_value(&response)
                    .unwrap_or_else(|e| invalid_request(format!("unserializable response: {}", e)))
            }
            Request::Command { command } if command == LIST_TOOLS => json!({
                "status": "completed",
                "tools": self.schema.all_tools_schema(self.dispatcher.catalog()),
            }),
            Request::Command { command } => {
                invalid_request(format!("unknown command '{}'", command))
            }
        }
    }
}

fn invalid_request(message: String) -> Value {
    json!({
        "status": "failed",
        "code": "INVALID_REQUEST",
        "message": message,
        "retryable": false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use devops_application::ports::command_executor::{
        CommandExecutor, CommandOutput, ExecutorError,
    };
    use devops_application::ports::workflow_renderer::{RenderError, WorkflowRenderer};
    use devops_domain::{
        CommandLine, DevOpsConfig, ToolCatalog, ToolDefinition, WorkflowSpec, default_catalog,
    };
    use std::sync::Mutex;

    struct EchoExecutor {
        runs: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl CommandExecutor for EchoExecutor {
        async fn run(&self, command: &CommandLine) -> Result<CommandOutput, ExecutorError> {
            self.runs.lock().unwrap().push(command.to_argv());
            Ok(CommandOutput::success("ok\n"))
        }
    }

    struct StaticRenderer;

    impl WorkflowRenderer for StaticRenderer {
        fn render(&self, spec: &WorkflowSpec) -> Result<String, RenderError> {
            Ok(format!("name: {}\n", spec.name))
        }
    }

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({"name": tool.name})
        }

        fn all_tools_schema(&self, catalog: &ToolCatalog) -> Vec<Value> {
            catalog.list().iter().map(|t| self.tool_to_schema(t)).collect()
        }

        fn low_risk_tools_schema(&self, catalog: &ToolCatalog) -> Vec<Value> {
            self.all_tools_schema(catalog)
        }
    }

    fn server() -> (JsonLineServer, Arc<EchoExecutor>) {
        let executor = Arc::new(EchoExecutor {
            runs: Mutex::new(Vec::new()),
        });
        let dispatcher = CommandDispatcher::new(
            Arc::new(default_catalog().unwrap()),
            Arc::new(DevOpsConfig::default()),
            executor.clone(),
            Arc::new(StaticRenderer),
        );
        (
            JsonLineServer::new(dispatcher, Arc::new(NameOnlySchema)),
            executor,
        )
    }

    fn responses(output: &[u8]) -> Vec<Value> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_one_response_per_line_in_order() {
        let (server, executor) = server();
        let input = concat!(
            r#"{"tool_name": "docker_build", "arguments": {"path": "./app", "tag": "app:v1"}}"#,
            "\n\n",
            r#"{"tool_name": "k8s_apply", "arguments": {}}"#,
            "\n",
            r#"{"tool_name": "github_workflow", "arguments": {"language": "go", "trigger": "push"}}"#,
            "\n",
        );
        let mut output = Vec::new();
        let stats = server.serve(input.as_bytes(), &mut output).await.unwrap();

        assert_eq!(stats, ServeStats { requests: 3, failures: 1 });
        let lines = responses(&output);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["status"], "completed");
        assert_eq!(lines[0]["result"]["stdout"], "ok\n");
        assert_eq!(lines[1]["code"], "INVALID_ARGUMENT");
        assert_eq!(lines[2]["result"]["generated_artifact"], "name: CI\n");

        let runs = executor.runs.lock().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], vec!["docker", "build", "-t", "app:v1", "./app"]);
    }

    #[tokio::test]
    async fn test_malformed_line_keeps_session_alive() {
        let (server, _) = server();
        let input = "not json\n{\"tool_name\": \"helm\"}\n";
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines = responses(&output);
        assert_eq!(lines[0]["code"], "INVALID_REQUEST");
        assert_eq!(lines[1]["code"], "NOT_FOUND");
        assert_eq!(lines[1]["retryable"], true);
    }

    #[tokio::test]
    async fn test_list_tools_command() {
        let (server, _) = server();
        let response = server.handle_line(r#"{"command": "list_tools"}"#).await;
        assert_eq!(response["status"], "completed");
        assert_eq!(response["tools"].as_array().unwrap().len(), 6);

        let response = server.handle_line(r#"{"command": "shutdown"}"#).await;
        assert_eq!(response["code"], "INVALID_REQUEST");
    }
}
