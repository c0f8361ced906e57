//! Authenticated client for the Stardog HTTP administration and query API.
//!
//! [`StardogClient`] owns the endpoint and credentials and exposes four
//! operation groups:
//!
//! - [`DatabaseService`]: listing, sizing and configuration
//! - [`SecurityService`]: roles, users and permissions
//! - [`MonitoringService`]: processes and server status
//! - [`QueryService`]: SPARQL reads and stored queries
//!
//! # Example
//!
//! ```no_run
//! use stardog_client::{ClientConfig, StardogClient};
//!
//! # async fn run() -> stardog_client::Result<()> {
//! let config = ClientConfig::new(
//!     "http://localhost:5820",
//!     Some("admin".into()),
//!     Some("admin".into()),
//!     None,
//! )?;
//! let client = StardogClient::new(config)?;
//! let databases = client.database().list().await?;
//! println!("{databases:?}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod services;

pub use client::{ApiResponse, RequestBody, RequestOptions, StardogClient};
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result};
pub use services::{
    Action, DatabaseService, MonitoringService, NOT_FOUND, Permission, QueryResult, QueryService,
    QueryType, ResourceType, SecurityService, SparqlReadOptions, array_field, permission_schema,
};
