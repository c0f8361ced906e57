//! The MCP server: wires the tool registry and prompt templates into rmcp.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, GetPromptRequestParams, GetPromptResult, Implementation,
    JsonObject, ListPromptsResult, ListResourcesResult, ListToolsResult, PaginatedRequestParams,
    ReadResourceRequestParams, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt, transport::stdio};
use serde_json::Value;
use stardog_client::StardogClient;

use crate::error::McpErrorExt;
use crate::prompts::PromptTemplates;
use crate::registry::{CompositeRegistry, ToolRegistry, dispatch};
use crate::tools::stardog_registry;

/// Name the server reports to clients.
pub const SERVER_NAME: &str = "stardog";

const INSTRUCTIONS: &str = "Tools and prompts for administering and querying a Stardog server: \
    databases, roles, users, permissions, processes and SPARQL reads.";

/// MCP server exposing Stardog tools and prompts over stdio.
#[derive(Clone)]
pub struct StardogMcpServer {
    registry: Arc<CompositeRegistry>,
    prompts: PromptTemplates,
}

impl StardogMcpServer {
    /// Creates a server with every Stardog tool and prompt registered.
    pub fn new(client: Arc<StardogClient>) -> Self {
        let registry = stardog_registry(Arc::clone(&client));
        let prompts = PromptTemplates::new(client);
        tracing::info!(
            tools = registry.tool_count(),
            prompts = prompts.prompts().len(),
            "Registered Stardog handlers"
        );
        Self {
            registry: Arc::new(registry),
            prompts,
        }
    }

    /// Tool registry backing this server.
    pub fn registry(&self) -> &CompositeRegistry {
        &self.registry
    }

    /// Prompt templates backing this server.
    pub fn prompt_templates(&self) -> &PromptTemplates {
        &self.prompts
    }

    /// Runs one tool call. Only a failure inside a known tool becomes a
    /// protocol error.
    pub async fn call_tool_named(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = Value::Object(arguments.unwrap_or_default());
        dispatch(self.registry.as_ref(), name, args)
            .await
            .map_err(|e| e.to_mcp_error())
    }

    /// Renders one prompt, mapping lookup and generation failures to
    /// protocol errors.
    pub async fn get_prompt_named(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<GetPromptResult, ErrorData> {
        self.prompts
            .get(name, arguments)
            .await
            .map_err(|e| e.to_mcp_error())
    }

    /// No resources are published.
    pub fn resources(&self) -> ListResourcesResult {
        tracing::info!("Listing resources");
        ListResourcesResult::with_all_items(Vec::new())
    }

    /// Every URI is unsupported.
    pub fn read_resource_uri(&self, uri: &str) -> Result<ReadResourceResult, ErrorData> {
        tracing::warn!(uri, "Resource read for unsupported URI");
        Err(ErrorData::resource_not_found(
            format!("Unsupported URI scheme: {uri}"),
            None,
        ))
    }

    /// Serves MCP over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        tracing::info!(server = SERVER_NAME, "Starting MCP server on stdio");
        let service = self.serve(stdio()).await?;
        let reason = service.waiting().await?;
        tracing::info!(?reason, "MCP server stopped");
        Ok(())
    }
}

impl ServerHandler for StardogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
        )
        .with_server_info(Implementation::new(
            SERVER_NAME.to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        ))
        .with_instructions(INSTRUCTIONS.to_string())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.call_tool_named(&request.name, request.arguments).await
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult::with_all_items(self.prompts.prompts()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        self.get_prompt_named(&request.name, request.arguments.as_ref())
            .await
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(self.resources())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        self.read_resource_uri(&request.uri)
    }
}
