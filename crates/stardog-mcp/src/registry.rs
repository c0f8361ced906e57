//! Tool registry trait and dispatch.
//!
//! This module defines the `ToolRegistry` trait that abstracts over
//! tool registration and dispatch. Each operation group implements it
//! to declare its MCP tools.
//!
//! The `CompositeRegistry` combines multiple registries into one, and
//! [`dispatch`] runs a call through the shared checks every tool gets:
//! unknown names and missing required arguments produce plain text
//! results, while failures inside a known tool surface as [`ToolError`].

use std::future::Future;
use std::pin::Pin;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;

use crate::error::ToolError;

/// Type alias for async tool handler results.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send>>;

/// Trait for registering and dispatching MCP tools.
///
/// Each operation group implements this to define its available tools.
/// The `StardogMcpServer` delegates `list_tools` and `call_tool` to the
/// registry it holds.
pub trait ToolRegistry: Send + Sync {
    /// Returns information about all available tools.
    fn tools(&self) -> Vec<Tool>;

    /// Dispatches a tool call by name.
    ///
    /// Returns `None` if the tool is not recognized by this registry.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Returns the number of registered tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Check if a tool exists by name.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }

    /// Looks up a tool descriptor by name.
    fn tool(&self, name: &str) -> Option<Tool> {
        self.tools().into_iter().find(|t| t.name == name)
    }
}

/// A registry that combines multiple sub-registries.
///
/// # Example
///
/// ```rust,ignore
/// let registry = CompositeRegistry::new()
///     .add(DatabaseTools::new(client.clone()))
///     .add(SecurityTools::new(client.clone()));
/// ```
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// Create a new empty composite registry.
    pub fn new() -> Self {
        Self {
            registries: Vec::new(),
        }
    }

    /// Add a sub-registry.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl Default for CompositeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self.registries.iter().flat_map(|r| r.tools()).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        for registry in &self.registries {
            if let Some(result) = registry.call(name, args.clone()) {
                return Some(result);
            }
        }
        None
    }

    fn tool(&self, name: &str) -> Option<Tool> {
        self.registries.iter().find_map(|r| r.tool(name))
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Plain single-text tool result.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Checks `args` against the `required` list of a tool's input schema.
///
/// Returns a user-facing message naming, in schema order, each required
/// argument that is absent, `null` or an empty string.
pub fn missing_required(schema: &JsonObject, args: &Value) -> Option<String> {
    let missing: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter(|name| is_missing(args.get(*name)))
        .collect();

    let (last, rest) = missing.split_last()?;
    Some(if rest.is_empty() {
        format!("Error: {last} is required.")
    } else {
        format!("Error: {} and {last} are required.", rest.join(", "))
    })
}

/// Runs a tool call through `registry`.
///
/// Unknown tools and missing required arguments yield a text result;
/// only a failure inside a known tool yields `Err`.
pub async fn dispatch(
    registry: &dyn ToolRegistry,
    name: &str,
    args: Value,
) -> Result<CallToolResult, ToolError> {
    tracing::info!(tool = name, "Calling tool");
    tracing::debug!(tool = name, arguments = %args, "Tool arguments");

    let Some(tool) = registry.tool(name) else {
        tracing::warn!(tool = name, "Unsupported tool requested");
        return Ok(text_result(format!("Unsupported tool: {name}")));
    };

    if let Some(message) = missing_required(&tool.input_schema, &args) {
        return Ok(text_result(message));
    }

    let Some(future) = registry.call(name, args) else {
        return Ok(text_result(format!("Unsupported tool: {name}")));
    };

    future.await.inspect_err(|e| {
        tracing::error!(tool = name, error = %e, "Tool execution failed");
    })
}

// ============================================================================
// Tests
// ============================================================================
