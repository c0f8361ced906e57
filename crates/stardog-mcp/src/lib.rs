//! Model Context Protocol server for Stardog.
//!
//! Exposes the Stardog HTTP administration and query API as MCP tools
//! and prompts over stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        stardog-mcp                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  StardogMcpServer: rmcp ServerHandler, stdio transport       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ToolRegistry / CompositeRegistry: tool catalog + dispatch   │
//! │  Database / Security / Monitoring / Query tool groups        │
//! │  PromptTemplates: database_config_helper, roles_summary      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  McpErrorExt: ToolError / PromptError -> rmcp::ErrorData     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                        stardog-client
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod prompts;
pub mod registry;
pub mod server;
pub mod tools;

pub use cli::Cli;
pub use error::{McpErrorExt, PromptError, ToolError};
pub use prompts::{PromptKind, PromptTemplates};
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult, dispatch, missing_required};
pub use server::StardogMcpServer;
pub use tools::stardog_registry;
