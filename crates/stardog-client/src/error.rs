//! Error types for stardog-client.

/// Errors that can occur while talking to a Stardog server.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No usable endpoint or credentials were supplied.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The remote call failed: non-2xx status, transport failure, or an
    /// undecodable response body.
    #[error("{}", describe_client_error(.message, .url, .status_code, .details))]
    Client {
        /// Human-readable summary of the failure
        message: String,
        /// URL of the failed request
        url: String,
        /// HTTP status code, if a response was received
        status_code: Option<u16>,
        /// Response body text or underlying error message
        details: Option<String>,
    },

    /// A caller-supplied argument was rejected before any request was made.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },
}

/// Convenience `Result` type alias for stardog-client operations.
pub type Result<T> = std::result::Result<T, Error>;

fn describe_client_error(
    message: &str,
    url: &str,
    status_code: &Option<u16>,
    details: &Option<String>,
) -> String {
    let mut out = format!("{message} (URL: {url})");
    if let Some(code) = status_code {
        out.push_str(&format!(" [Status Code: {code}]"));
    }
    if let Some(details) = details {
        out.push_str(&format!(" Details: {details}"));
    }
    out
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a client error for a response that arrived with a non-2xx status.
    pub fn http_status<M, U, D>(message: M, url: U, status_code: u16, details: D) -> Self
    where
        M: Into<String>,
        U: Into<String>,
        D: Into<String>,
    {
        Error::Client {
            message: message.into(),
            url: url.into(),
            status_code: Some(status_code),
            details: Some(details.into()),
        }
    }

    /// Creates a client error for a failure with no usable HTTP status.
    pub fn transport<M, U, D>(message: M, url: U, details: D) -> Self
    where
        M: Into<String>,
        U: Into<String>,
        D: Into<String>,
    {
        Error::Client {
            message: message.into(),
            url: url.into(),
            status_code: None,
            details: Some(details.into()),
        }
    }

    /// Returns the HTTP status code carried by a client error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Client { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Returns whether this error came from the remote call itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Client { .. })
    }
}
