//! MCP tools backed by the Stardog operation groups.
//!
//! One registry per group:
//! - [`DatabaseTools`]: database listing, size and configuration
//! - [`SecurityTools`]: roles, users and permissions
//! - [`MonitoringTools`]: processes and server metrics
//! - [`QueryTools`]: SPARQL reads and stored queries

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use stardog_client::StardogClient;

use crate::error::ToolError;
use crate::registry::{CompositeRegistry, text_result};

pub use database::DatabaseTools;
pub use monitoring::MonitoringTools;
pub use query::QueryTools;
pub use security::SecurityTools;

/// Builds the registry holding every Stardog tool.
pub fn stardog_registry(client: Arc<StardogClient>) -> CompositeRegistry {
    CompositeRegistry::new()
        .add(DatabaseTools::new(Arc::clone(&client)))
        .add(SecurityTools::new(Arc::clone(&client)))
        .add(MonitoringTools::new(Arc::clone(&client)))
        .add(QueryTools::new(client))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

pub(crate) fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    Tool::new(name.to_string(), description.to_string(), json_schema(schema))
}

pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args)
        .map_err(|e| ToolError::new(tool, format!("Invalid arguments: {e}")))
}

pub(crate) fn serialize_response<T: Serialize>(
    tool: &str,
    value: &T,
) -> Result<CallToolResult, ToolError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ToolError::new(tool, e))?;
    Ok(text_result(json))
}

/// Keeps the entries of `items` whose `key` field is one of `names`.
/// An empty filter keeps everything.
pub(crate) fn filter_by_field(items: Vec<Value>, key: &str, names: &[String]) -> Vec<Value> {
    if names.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            item.get(key)
                .and_then(Value::as_str)
                .is_some_and(|v| names.iter().any(|n| n == v))
        })
        .collect()
}

/// Declares a closed set of tools: the enum, its catalog, and name lookup.
macro_rules! tool_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $kind:ident {
            $( $variant:ident => $name:literal : $description:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $kind {
            $(
                #[doc = $description]
                $variant,
            )+
        }

        impl $kind {
            /// Every tool of this kind, in catalog order.
            pub const ALL: &'static [$kind] = &[$($kind::$variant),+];

            /// Externally visible tool name.
            pub fn name(self) -> &'static str {
                match self {
                    $($kind::$variant => $name,)+
                }
            }

            /// Human-readable tool description.
            pub fn description(self) -> &'static str {
                match self {
                    $($kind::$variant => $description,)+
                }
            }

            /// Looks up a tool by its external name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.name() == name)
            }
        }
    };
}

pub mod database;
pub mod monitoring;
pub mod query;
pub mod security;

// ============================================================================
// Tests
// ============================================================================
