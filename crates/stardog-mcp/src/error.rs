//! Error types for stardog-mcp.
//!
//! Tool and prompt failures stay as ordinary Rust errors until they reach
//! the protocol boundary, where [`McpErrorExt`] turns them into
//! `rmcp::model::ErrorData`.

use rmcp::model::ErrorData;
use thiserror::Error;

/// A known tool failed while executing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error executing tool: {name} - {message}")]
pub struct ToolError {
    /// Name of the tool that failed
    pub name: String,
    /// Underlying failure message
    pub message: String,
}

impl ToolError {
    /// Creates a tool error from any displayable cause.
    pub fn new(name: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self {
            name: name.into(),
            message: cause.to_string(),
        }
    }
}

/// Prompt lookup or generation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PromptError {
    /// No prompt with this name is registered.
    #[error("Unknown prompt name: {0}")]
    UnknownPrompt(String),

    /// The prompt exists but its content could not be produced.
    #[error("Error generating prompt: {name} - {message}")]
    Generation {
        /// Prompt name
        name: String,
        /// Underlying failure message
        message: String,
    },
}

impl PromptError {
    /// Creates a generation error from any displayable cause.
    pub fn generation(name: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        PromptError::Generation {
            name: name.into(),
            message: cause.to_string(),
        }
    }
}

/// Convert stardog-mcp errors into MCP protocol errors.
pub trait McpErrorExt {
    /// Convert to an `rmcp::model::ErrorData`.
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for ToolError {
    fn to_mcp_error(&self) -> ErrorData {
        ErrorData::internal_error(self.to_string(), None)
    }
}

impl McpErrorExt for PromptError {
    fn to_mcp_error(&self) -> ErrorData {
        match self {
            PromptError::UnknownPrompt(_) => ErrorData::invalid_params(self.to_string(), None),
            PromptError::Generation { .. } => ErrorData::internal_error(self.to_string(), None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
