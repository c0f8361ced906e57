//! Connection settings for a Stardog server.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;

use crate::error::{Error, Result};

/// Credentials presented on every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP basic authentication.
    Basic {
        /// Stardog username
        username: String,
        /// Stardog password
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// Opaque access token
        token: String,
    },
}

/// Immutable client configuration: endpoint plus credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    credentials: Credentials,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ClientConfig {
    /// Builds a configuration from the raw connection inputs.
    ///
    /// A token wins over username/password when both are supplied. Empty
    /// strings count as absent. A trailing `/` on the endpoint is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the endpoint is empty or not a URL, or
    /// when neither a token nor a username/password pair is available.
    pub fn new(
        endpoint: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(Error::config("No Stardog endpoint provided."));
        }
        if let Err(e) = Url::parse(&endpoint) {
            return Err(Error::config(format!("Invalid Stardog endpoint '{endpoint}': {e}")));
        }

        let credentials = match (non_empty(token), non_empty(username), non_empty(password)) {
            (Some(token), _, _) => Credentials::Bearer { token },
            (None, Some(username), Some(password)) => Credentials::Basic { username, password },
            _ => {
                return Err(Error::config(
                    "No authentication credentials provided. Supply a username and password or an auth token.",
                ));
            }
        };

        Ok(Self {
            endpoint,
            credentials,
        })
    }

    /// Base URL of the server, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Value of the `Authorization` header for this configuration.
    pub fn authorization_header(&self) -> String {
        match &self.credentials {
            Credentials::Bearer { token } => format!("Bearer {token}"),
            Credentials::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}
