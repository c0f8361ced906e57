//! Command-line arguments.

use clap::Parser;
use stardog_client::{ClientConfig, Result};

/// MCP server for Stardog
#[derive(Parser, Debug)]
#[command(name = "stardog-mcp", author, version, about, long_about = None)]
pub struct Cli {
    /// Stardog endpoint URL, e.g. http://localhost:5820
    #[arg(short, long, env = "SD_ENDPOINT")]
    pub endpoint: String,

    /// Stardog username
    #[arg(short, long, env = "SD_USERNAME")]
    pub username: Option<String>,

    /// Stardog password
    #[arg(short, long, env = "SD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Stardog auth token; takes precedence over username/password
    #[arg(short = 't', long, env = "SD_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Log filter directive (written to stderr)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Builds the client configuration from the parsed arguments.
    pub fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::new(
            self.endpoint.clone(),
            self.username.clone(),
            self.password.clone(),
            self.auth_token.clone(),
        )
    }
}
