use serde_json::{Map, Value};

use super::array_field;
use crate::client::{RequestOptions, StardogClient};
use crate::error::Result;

/// Placeholder stored for requested configuration keys the server did not return.
pub const NOT_FOUND: &str = "not_found";

/// Database listing, sizing and configuration.
#[derive(Debug, Clone, Copy)]
pub struct DatabaseService<'a> {
    client: &'a StardogClient,
}

impl<'a> DatabaseService<'a> {
    pub(crate) fn new(client: &'a StardogClient) -> Self {
        Self { client }
    }

    /// Names of all databases on the server.
    pub async fn list(&self) -> Result<Vec<Value>> {
        let url = self.client.url(&["admin", "databases"])?;
        let data: Value = self.client.get(&url, RequestOptions::new()).await?.json()?;
        Ok(array_field(&data, "databases"))
    }

    /// Estimated size of a database in triples.
    pub async fn size(&self, database: &str) -> Result<i64> {
        let url = self.client.url(&[database, "size"])?;
        let response = self.client.get(&url, RequestOptions::new()).await?;
        let text = response.text();
        let text = text.trim();
        text.parse::<i64>()
            .map_err(|e| response.decode_error(format!("{e}: {text:?}")))
    }

    /// Database options, optionally restricted to `keys`.
    ///
    /// Requested keys missing upstream map to [`NOT_FOUND`].
    pub async fn configuration(
        &self,
        database: &str,
        keys: Option<&[String]>,
    ) -> Result<Map<String, Value>> {
        let url = self.client.url(&["admin", "databases", database, "options"])?;
        let data: Map<String, Value> = self.client.get(&url, RequestOptions::new()).await?.json()?;

        let keys = match keys {
            Some(keys) if !keys.is_empty() => keys,
            _ => return Ok(data),
        };
        let restricted = keys
            .iter()
            .map(|key| {
                let value = match data.get(key) {
                    Some(value) => value.clone(),
                    None => Value::String(NOT_FOUND.to_string()),
                };
                (key.clone(), value)
            })
            .collect();
        Ok(restricted)
    }

    /// Documentation for every database configuration option.
    pub async fn configuration_documentation(&self) -> Result<Map<String, Value>> {
        let url = self.client.url(&["admin", "config_properties"])?;
        self.client.get(&url, RequestOptions::new()).await?.json()
    }
}
