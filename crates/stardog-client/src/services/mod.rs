//! Domain operation groups.
//!
//! Each service borrows a [`StardogClient`](crate::StardogClient) and maps
//! its methods one-to-one onto remote endpoints.

use serde_json::Value;

mod database;
mod monitoring;
mod query;
mod security;

pub use database::{DatabaseService, NOT_FOUND};
pub use monitoring::MonitoringService;
pub use query::{QueryResult, QueryService, QueryType, SparqlReadOptions};
pub use security::{Action, Permission, ResourceType, SecurityService, permission_schema};

/// Returns `data[key]` as a list, or an empty list when absent.
///
/// Stardog wraps most listings in a single-key object such as
/// `{"roles": [...]}`.
pub fn array_field(data: &Value, key: &str) -> Vec<Value> {
    data.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
