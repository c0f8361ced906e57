//! MCP tools for SPARQL reads and stored queries.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use stardog_client::{QueryResult, SparqlReadOptions, StardogClient};

use super::{make_tool, parse_args, serialize_response};
use crate::error::ToolError;
use crate::registry::{ToolRegistry, ToolResult, text_result};

/// Arguments for `execute_sparql_read`.
#[derive(Debug, Deserialize)]
pub struct SparqlReadArgs {
    /// SPARQL query text.
    pub query: String,
    /// Target database.
    pub database: String,
    /// SELECT, ASK, CONSTRUCT or DESCRIBE, in any case.
    pub query_type: Option<String>,
    /// Enable reasoning.
    pub reasoning: Option<bool>,
    /// Reasoning schema.
    pub schema: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u64>,
    /// Server-side timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl SparqlReadArgs {
    fn options(&self) -> Result<SparqlReadOptions, stardog_client::Error> {
        let defaults = SparqlReadOptions::default();
        Ok(SparqlReadOptions {
            query_type: match &self.query_type {
                Some(text) => text.parse()?,
                None => defaults.query_type,
            },
            reasoning: self.reasoning.unwrap_or(defaults.reasoning),
            schema: self.schema.clone().unwrap_or(defaults.schema),
            limit: self.limit.unwrap_or(defaults.limit),
            timeout_ms: self.timeout_ms.unwrap_or(defaults.timeout_ms),
        })
    }
}

tool_kinds! {
    /// Query tools.
    pub enum QueryTool {
        ExecuteSparqlRead => "execute_sparql_read":
            "Execute a SPARQL read query against a Stardog database. SELECT, ASK, CONSTRUCT, and DESCRIBE queries are supported.",
        ListStoredQueries => "list_stored_queries": "List all stored queries in the Stardog server.",
    }
}

impl QueryTool {
    fn schema(self) -> Value {
        match self {
            QueryTool::ExecuteSparqlRead => json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "SPARQL query to execute."
                    },
                    "database": {
                        "type": "string",
                        "description": "Name of the Stardog database to execute the query against."
                    },
                    "query_type": {
                        "type": "string",
                        "description": "Type of the SPARQL query (SELECT, ASK, CONSTRUCT, DESCRIBE).",
                        "enum": ["SELECT", "ASK", "CONSTRUCT", "DESCRIBE"],
                        "default": "SELECT"
                    },
                    "reasoning": {
                        "type": "boolean",
                        "description": "Whether to use reasoning for the query.",
                        "default": false
                    },
                    "schema": {
                        "type": "string",
                        "description": "The reasoning schema to use for the query.",
                        "default": "default"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return.",
                        "default": 1000
                    },
                    "timeout_ms": {
                        "type": "integer",
                        "description": "Timeout for the query in milliseconds.",
                        "default": 30000
                    }
                },
                "required": ["query", "database"]
            }),
            QueryTool::ListStoredQueries => json!({"type": "object"}),
        }
    }
}

/// MCP tools for querying Stardog.
pub struct QueryTools {
    client: Arc<StardogClient>,
}

impl QueryTools {
    /// Create query tools over a shared client.
    pub fn new(client: Arc<StardogClient>) -> Self {
        Self { client }
    }
}

impl ToolRegistry for QueryTools {
    fn tools(&self) -> Vec<Tool> {
        QueryTool::ALL
            .iter()
            .map(|kind| make_tool(kind.name(), kind.description(), kind.schema()))
            .collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let kind = QueryTool::from_name(name)?;
        let client = Arc::clone(&self.client);
        let name = kind.name();
        let err = move |e: stardog_client::Error| ToolError::new(name, e);

        let future: ToolResult = match kind {
            QueryTool::ExecuteSparqlRead => Box::pin(async move {
                let args: SparqlReadArgs = parse_args(name, args)?;
                let options = args.options().map_err(err)?;
                let result = client
                    .query()
                    .sparql_read(&args.database, &args.query, &options)
                    .await
                    .map_err(err)?;
                match result {
                    QueryResult::Json(value) => serialize_response(name, &value),
                    QueryResult::Rdf(bytes) => {
                        Ok(text_result(String::from_utf8_lossy(&bytes).into_owned()))
                    }
                }
            }),

            QueryTool::ListStoredQueries => Box::pin(async move {
                let stored = client.query().list_stored().await.map_err(err)?;
                serialize_response(name, &stored)
            }),
        };
        Some(future)
    }
}
