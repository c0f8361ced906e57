//! SPARQL reads and stored queries.

use std::str::FromStr;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::client::{RequestOptions, StardogClient};
use crate::error::{Error, Result};

/// Kind of SPARQL read query. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    /// `SELECT` query; JSON results.
    #[default]
    Select,
    /// `ASK` query; JSON results.
    Ask,
    /// `CONSTRUCT` query; Turtle results.
    Construct,
    /// `DESCRIBE` query; Turtle results.
    Describe,
}

impl QueryType {
    /// `Accept` header value for this kind of query.
    pub fn accept(self) -> &'static str {
        match self {
            QueryType::Select | QueryType::Ask => "application/sparql-results+json",
            QueryType::Construct | QueryType::Describe => "text/turtle",
        }
    }

    /// Whether the server answers with SPARQL JSON results.
    pub fn returns_json(self) -> bool {
        matches!(self, QueryType::Select | QueryType::Ask)
    }
}

impl FromStr for QueryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(QueryType::Select),
            "ask" => Ok(QueryType::Ask),
            "construct" => Ok(QueryType::Construct),
            "describe" => Ok(QueryType::Describe),
            _ => Err(Error::invalid_argument(format!(
                "Invalid query type: {s}. Must be one of 'select', 'construct', 'ask', or 'describe'."
            ))),
        }
    }
}

/// Tuning knobs for [`QueryService::sparql_read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlReadOptions {
    /// Kind of query being sent.
    pub query_type: QueryType,
    /// Enable reasoning.
    pub reasoning: bool,
    /// Reasoning schema name.
    pub schema: String,
    /// Maximum number of results.
    pub limit: u64,
    /// Server-side timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SparqlReadOptions {
    fn default() -> Self {
        Self {
            query_type: QueryType::Select,
            reasoning: false,
            schema: "default".to_string(),
            limit: 1000,
            timeout_ms: 30_000,
        }
    }
}

/// Result of a SPARQL read.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// SPARQL JSON results (`SELECT`, `ASK`).
    Json(Value),
    /// Raw RDF bytes (`CONSTRUCT`, `DESCRIBE`).
    Rdf(Vec<u8>),
}

/// SPARQL query execution and stored query listing.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    client: &'a StardogClient,
}

impl<'a> QueryService<'a> {
    pub(crate) fn new(client: &'a StardogClient) -> Self {
        Self { client }
    }

    /// Runs a read query against `database`.
    pub async fn sparql_read(
        &self,
        database: &str,
        query: &str,
        options: &SparqlReadOptions,
    ) -> Result<QueryResult> {
        let url = self.client.url(&[database, "query"])?;
        let request = RequestOptions::new()
            .header(ACCEPT, options.query_type.accept())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .query("reasoning", options.reasoning)
            .query("schema", &options.schema)
            .query("limit", options.limit)
            .query("timeout", options.timeout_ms)
            .form(vec![("query".to_string(), query.to_string())]);

        let response = self.client.post(&url, request).await?;
        if options.query_type.returns_json() {
            Ok(QueryResult::Json(response.json()?))
        } else {
            Ok(QueryResult::Rdf(response.into_bytes()))
        }
    }

    /// Like [`sparql_read`](Self::sparql_read), taking the query type as
    /// text. An unknown type fails before any request is made.
    pub async fn sparql_read_as(
        &self,
        database: &str,
        query: &str,
        query_type: &str,
        mut options: SparqlReadOptions,
    ) -> Result<QueryResult> {
        options.query_type = query_type.parse()?;
        self.sparql_read(database, query, &options).await
    }

    /// All stored queries.
    pub async fn list_stored(&self) -> Result<Value> {
        let url = self.client.url(&["admin", "queries", "stored"])?;
        // The endpoint defaults to Turtle.
        let request = RequestOptions::new()
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        self.client.get(&url, request).await?.json()
    }
}
