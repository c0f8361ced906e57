//! Authenticated HTTP gateway to a Stardog server.
//!
//! Every call attaches the configured `Authorization` header, reads the
//! whole response body, and folds non-2xx statuses and transport failures
//! into [`Error::Client`].

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::services::{DatabaseService, MonitoringService, QueryService, SecurityService};

/// Longest slice of a response body copied into failure logs.
const LOG_SNIPPET_LEN: usize = 500;

// ============================================================================
// Request / response types
// ============================================================================

/// Body attached to an outbound request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON-encoded body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
}

/// Optional parts of a request: extra headers, query parameters and body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers merged under the authorization header.
    pub headers: HeaderMap,
    /// Query string parameters, in order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl RequestOptions {
    /// Creates empty request options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    pub fn header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a form-encoded body.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }
}

/// A fully-read successful response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    url: String,
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    /// URL the response came from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| self.decode_error(e.to_string()))
    }

    /// Body as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Raw body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    pub(crate) fn decode_error(&self, details: String) -> Error {
        Error::Client {
            message: "Failed to decode response body.".to_string(),
            url: self.url.clone(),
            status_code: Some(self.status),
            details: Some(details),
        }
    }
}

// ============================================================================
// StardogClient
// ============================================================================

/// Authenticated client for the Stardog HTTP API.
///
/// Idle connections are never kept, so each request opens its own
/// connection and releases it when the call completes.
#[derive(Debug, Clone)]
pub struct StardogClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl StardogClient {
    /// Creates a client for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Configured endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.config.endpoint()
    }

    /// Configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a URL under the endpoint from path segments.
    ///
    /// Each segment is percent-encoded as exactly one path segment, so an
    /// identifier containing `/`, `?` or `#` stays inside its segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty, `.` or `..` segment.
    pub fn url(&self, segments: &[&str]) -> Result<String> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::invalid_argument(format!("Invalid path segment: '{bad}'")));
        }

        let mut url = Url::parse(self.endpoint())
            .map_err(|e| Error::config(format!("Invalid endpoint URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| Error::config("Endpoint URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// Database operations.
    pub fn database(&self) -> DatabaseService<'_> {
        DatabaseService::new(self)
    }

    /// Role, user and permission operations.
    pub fn security(&self) -> SecurityService<'_> {
        SecurityService::new(self)
    }

    /// Process and server status operations.
    pub fn monitoring(&self) -> MonitoringService<'_> {
        MonitoringService::new(self)
    }

    /// SPARQL and stored query operations.
    pub fn query(&self) -> QueryService<'_> {
        QueryService::new(self)
    }

    /// Issues a request and returns the fully-read response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] for non-2xx responses (with status and body
    /// text) and for transport failures (without a status).
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let mut headers = options.headers;
        let auth = HeaderValue::from_str(&self.config.authorization_header())
            .map_err(|e| Error::config(format!("Invalid authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth);

        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match options.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(&method, url, e)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return Err(self.transport_failure(&method, url, e)),
        };

        if !status.is_success() {
            return Err(status_failure(&method, url, status, &body));
        }

        tracing::debug!(%method, url, status = status.as_u16(), "Stardog request succeeded");
        Ok(ApiResponse {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    /// Issues a GET request.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::GET, url, options).await
    }

    /// Issues a POST request.
    pub async fn post(&self, url: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::POST, url, options).await
    }

    /// Issues a PUT request.
    pub async fn put(&self, url: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::PUT, url, options).await
    }

    /// Issues a DELETE request.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.request(Method::DELETE, url, options).await
    }

    fn transport_failure(&self, method: &Method, url: &str, err: reqwest::Error) -> Error {
        tracing::error!(%method, url, error = %err, "Stardog request failed");
        Error::transport(
            format!("Unexpected error occurred during {method} request."),
            url,
            err.to_string(),
        )
    }
}

fn status_failure(method: &Method, url: &str, status: StatusCode, body: &[u8]) -> Error {
    let text = String::from_utf8_lossy(body).into_owned();
    let snippet: String = text.chars().take(LOG_SNIPPET_LEN).collect();
    tracing::error!(
        %method,
        url,
        status = status.as_u16(),
        body = %snippet,
        "Stardog returned an error status"
    );
    Error::http_status(
        format!("HTTP error occurred during {method} request."),
        url,
        status.as_u16(),
        text,
    )
}

// ============================================================================
// Tests
// ============================================================================
