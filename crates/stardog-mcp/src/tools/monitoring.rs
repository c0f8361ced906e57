//! MCP tools for server monitoring.

use std::fmt;
use std::sync::Arc;

use rmcp::model::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use stardog_client::StardogClient;

use super::{make_tool, parse_args, serialize_response};
use crate::error::ToolError;
use crate::registry::{ToolRegistry, ToolResult, text_result};

/// Process identifier, accepted as a number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProcessId {
    /// Numeric id.
    Number(u64),
    /// Textual id.
    Text(String),
}

impl ProcessId {
    /// A numeric `0` counts as no id at all.
    pub fn is_unset(&self) -> bool {
        matches!(self, ProcessId::Number(0))
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Number(n) => write!(f, "{n}"),
            ProcessId::Text(s) => f.write_str(s),
        }
    }
}

/// Arguments for `kill_process`.
#[derive(Debug, Deserialize)]
pub struct KillProcessArgs {
    /// ID of the process to kill.
    pub id: ProcessId,
}

tool_kinds! {
    /// Monitoring tools.
    pub enum MonitoringTool {
        GetServerMetrics => "get_server_metrics": "Get the server metrics from Stardog.",
        KillProcess => "kill_process": "Kill a specific process on the Stardog server.",
        ListProcesses => "list_processes": "List all the processes on the Stardog server.",
    }
}

impl MonitoringTool {
    fn schema(self) -> Value {
        match self {
            MonitoringTool::KillProcess => json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "integer",
                        "description": "ID of the process to kill."
                    }
                },
                "required": ["id"]
            }),
            MonitoringTool::GetServerMetrics | MonitoringTool::ListProcesses => {
                json!({"type": "object"})
            }
        }
    }
}

/// MCP tools for Stardog processes and status.
pub struct MonitoringTools {
    client: Arc<StardogClient>,
}

impl MonitoringTools {
    /// Create monitoring tools over a shared client.
    pub fn new(client: Arc<StardogClient>) -> Self {
        Self { client }
    }
}

impl ToolRegistry for MonitoringTools {
    fn tools(&self) -> Vec<Tool> {
        MonitoringTool::ALL
            .iter()
            .map(|kind| make_tool(kind.name(), kind.description(), kind.schema()))
            .collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let kind = MonitoringTool::from_name(name)?;
        let client = Arc::clone(&self.client);
        let name = kind.name();
        let err = move |e: stardog_client::Error| ToolError::new(name, e);

        let future: ToolResult = match kind {
            MonitoringTool::ListProcesses => Box::pin(async move {
                let processes = client.monitoring().list_processes().await.map_err(err)?;
                serialize_response(name, &processes)
            }),

            MonitoringTool::KillProcess => Box::pin(async move {
                let args: KillProcessArgs = parse_args(name, args)?;
                if args.id.is_unset() {
                    return Ok(text_result("Error: id is required."));
                }
                let id = args.id.to_string();
                client.monitoring().kill_process(&id).await.map_err(err)?;
                Ok(text_result(format!("Process with ID '{id}' killed.")))
            }),

            MonitoringTool::GetServerMetrics => Box::pin(async move {
                let metrics = client.monitoring().server_metrics().await.map_err(err)?;
                serialize_response(name, &metrics)
            }),
        };
        Some(future)
    }
}
