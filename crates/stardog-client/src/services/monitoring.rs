use serde_json::Value;

use crate::client::{RequestOptions, StardogClient};
use crate::error::Result;

/// Server processes and status.
#[derive(Debug, Clone, Copy)]
pub struct MonitoringService<'a> {
    client: &'a StardogClient,
}

impl<'a> MonitoringService<'a> {
    pub(crate) fn new(client: &'a StardogClient) -> Self {
        Self { client }
    }

    /// Processes currently running on the server.
    pub async fn list_processes(&self) -> Result<Value> {
        let url = self.client.url(&["admin", "processes"])?;
        self.client.get(&url, RequestOptions::new()).await?.json()
    }

    /// Kills the process with the given id.
    pub async fn kill_process(&self, id: &str) -> Result<()> {
        let url = self.client.url(&["admin", "processes", id])?;
        self.client.delete(&url, RequestOptions::new()).await?;
        Ok(())
    }

    /// Server metrics from `/admin/status`.
    pub async fn server_metrics(&self) -> Result<Value> {
        let url = self.client.url(&["admin", "status"])?;
        self.client.get(&url, RequestOptions::new()).await?.json()
    }
}
