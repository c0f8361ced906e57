//! MCP tools for database inspection.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use stardog_client::StardogClient;

use super::{make_tool, parse_args, serialize_response};
use crate::error::ToolError;
use crate::registry::{ToolRegistry, ToolResult, text_result};

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments naming a single database.
#[derive(Debug, Deserialize)]
pub struct DatabaseNameArgs {
    /// Name of the Stardog database.
    pub database_name: String,
}

/// Arguments for `get_database_configuration`.
#[derive(Debug, Deserialize)]
pub struct ConfigurationArgs {
    /// Name of the Stardog database.
    pub database_name: String,
    /// Option keys to keep; all options when absent.
    pub option_keys: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// DatabaseTools
// ---------------------------------------------------------------------------

tool_kinds! {
    /// Database tools.
    pub enum DatabaseTool {
        GetConfiguration => "get_database_configuration":
            "Get the configuration of a Stardog database. Optionally filter by specific keys.",
        GetConfigurationDocumentation => "get_database_configuration_documentation":
            "Get documentation for Stardog database configuration options.",
        GetSize => "get_database_size":
            "Get the estimated size of a Stardog database in triples.",
        List => "list_databases":
            "List the names of all Stardog databases in the Stardog server.",
    }
}

impl DatabaseTool {
    fn schema(self) -> Value {
        let database_name = json!({
            "type": "string",
            "description": "Name of the Stardog database."
        });
        match self {
            DatabaseTool::GetConfiguration => json!({
                "type": "object",
                "properties": {
                    "database_name": database_name,
                    "option_keys": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of specific database option keys to filter the configuration."
                    }
                },
                "required": ["database_name"]
            }),
            DatabaseTool::GetSize => json!({
                "type": "object",
                "properties": {"database_name": database_name},
                "required": ["database_name"]
            }),
            DatabaseTool::GetConfigurationDocumentation | DatabaseTool::List => {
                json!({"type": "object"})
            }
        }
    }
}

/// MCP tools for Stardog databases.
pub struct DatabaseTools {
    client: Arc<StardogClient>,
}

impl DatabaseTools {
    /// Create database tools over a shared client.
    pub fn new(client: Arc<StardogClient>) -> Self {
        Self { client }
    }
}

impl ToolRegistry for DatabaseTools {
    fn tools(&self) -> Vec<Tool> {
        DatabaseTool::ALL
            .iter()
            .map(|kind| make_tool(kind.name(), kind.description(), kind.schema()))
            .collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let kind = DatabaseTool::from_name(name)?;
        let client = Arc::clone(&self.client);
        let name = kind.name();
        let err = move |e: stardog_client::Error| ToolError::new(name, e);

        let future: ToolResult = match kind {
            DatabaseTool::List => Box::pin(async move {
                let databases = client.database().list().await.map_err(err)?;
                serialize_response(name, &databases)
            }),

            DatabaseTool::GetSize => Box::pin(async move {
                let args: DatabaseNameArgs = parse_args(name, args)?;
                let size = client.database().size(&args.database_name).await.map_err(err)?;
                Ok(text_result(size.to_string()))
            }),

            DatabaseTool::GetConfiguration => Box::pin(async move {
                let args: ConfigurationArgs = parse_args(name, args)?;
                let config = client
                    .database()
                    .configuration(&args.database_name, args.option_keys.as_deref())
                    .await
                    .map_err(err)?;
                serialize_response(name, &config)
            }),

            DatabaseTool::GetConfigurationDocumentation => Box::pin(async move {
                let docs = client
                    .database()
                    .configuration_documentation()
                    .await
                    .map_err(err)?;
                serialize_response(name, &docs)
            }),
        };
        Some(future)
    }
}

// ============================================================================
// Tests
// ============================================================================
