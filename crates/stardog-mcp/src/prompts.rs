//! Prompt templates filled from live Stardog data.

use std::sync::Arc;

use rmcp::model::{
    GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
};
use serde_json::Value;
use stardog_client::StardogClient;

use crate::error::PromptError;

const DB_CONFIG_INFO_TEMPLATE: &str = r#"
Analyze the Stardog database configuration for database '{database_name}' and create a comprehensive report.

First, review this documentation:
{filtered_option_docs}

Then, analyze these specific configuration options: {option_keys}

Current configuration values:
{options}

Create a detailed report with:
1. A brief introduction identifying the database and the options being analyzed
2. A complete markdown table with these exact columns:
   - Label
   - Name
   - Value
   - Description (explain what each setting controls)
   - Category (the configuration category this belongs to)
   - Default Value (what the system sets if not specified)
   - Type (data type)
   - Mutable (can it be changed after database creation)
   - Mutable While Online (can it be changed without taking the database offline)
3. For each option, compare the current value with documentation to provide context about its significance
4. Highlight any values that differ from defaults and explain potential impacts

Format the table professionally with proper markdown syntax and alignment.
"#;

const ROLES_SUMMARY_TEMPLATE: &str = r#"
Below are the roles and their permissions in the Stardog server in JSON format.

{roles_with_permissions}

This is example output from the Stardog CLI when requesting permissions for 1 role.

+---------------+---------------+-------------+
| Resource Type | Resource Name | Permissions |
+---------------+---------------+-------------+
| db            | *             | --R----     |
| metadata      | *             | --R----     |
+---------------+---------------+-------------+

Provide a similar table but in markdown for all roles and their permissions mentioned above.

Do not mention anything about the example output. Just provide the table with the roles and their permissions and a summary of the permissions.

Here is some information about the permissions:

- Action types include: "read" "write" "create" "delete" "revoke" "grant" "execute" "all"
- Resource types include: "ALL" "USER" "ROLE" "ROLE_ASSIGNMENT" "PERMISSION" "DATABASE" "NAMED_GRAPH" "DATA_SOURCE" "VIRTUAL_GRAPH" "DBMS_ADMIN" "DATABASE_METADATA" "DATABASE_ADMIN" "STORED_QUERY" "CACHE" "CACHE_TARGET" "SENSITIVE_PROPERTIES" "ENTITY_RESOLUTION"
- Resource names depend on the resource type but * is a wildcard for all resources of that type.
"#;

/// The prompts this server offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Configuration report for selected database options.
    DatabaseConfigHelper,
    /// Tabular summary of every role's permissions.
    RolesSummary,
}

impl PromptKind {
    /// Every prompt, in catalog order.
    pub const ALL: &'static [PromptKind] =
        &[PromptKind::DatabaseConfigHelper, PromptKind::RolesSummary];

    /// Externally visible prompt name.
    pub fn name(self) -> &'static str {
        match self {
            PromptKind::DatabaseConfigHelper => "database_config_helper",
            PromptKind::RolesSummary => "roles_summary",
        }
    }

    /// Prompt description.
    pub fn description(self) -> &'static str {
        match self {
            PromptKind::DatabaseConfigHelper => "Get the configuration of a Stardog database.",
            PromptKind::RolesSummary => "Get a summary of roles in the Stardog server.",
        }
    }

    /// Looks up a prompt by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    fn arguments(self) -> Vec<PromptArgument> {
        match self {
            PromptKind::DatabaseConfigHelper => vec![
                argument("database_name", "Name of the Stardog database."),
                argument(
                    "option_keys",
                    "List of specific database option keys (e.g. 'search.enabled') to filter the configuration.",
                ),
            ],
            PromptKind::RolesSummary => Vec::new(),
        }
    }

    /// Protocol descriptor for this prompt.
    pub fn descriptor(self) -> Prompt {
        Prompt::new(
            self.name(),
            Some(self.description()),
            Some(self.arguments()),
        )
    }
}

fn argument(name: &str, description: &str) -> PromptArgument {
    PromptArgument::new(name.to_string())
        .with_description(description.to_string())
        .with_required(true)
}

/// Builds prompt content from Stardog data.
#[derive(Clone)]
pub struct PromptTemplates {
    client: Arc<StardogClient>,
}

impl PromptTemplates {
    /// Create prompt templates over a shared client.
    pub fn new(client: Arc<StardogClient>) -> Self {
        Self { client }
    }

    /// Descriptors for every prompt.
    pub fn prompts(&self) -> Vec<Prompt> {
        PromptKind::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    /// Renders the named prompt as a single user message.
    ///
    /// # Errors
    ///
    /// [`PromptError::UnknownPrompt`] for unregistered names and
    /// [`PromptError::Generation`] when arguments are missing or a
    /// Stardog call fails.
    pub async fn get(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<GetPromptResult, PromptError> {
        let kind = PromptKind::from_name(name)
            .ok_or_else(|| PromptError::UnknownPrompt(name.to_string()))?;

        let text = match kind {
            PromptKind::DatabaseConfigHelper => self.database_config_helper(arguments).await,
            PromptKind::RolesSummary => self.roles_summary().await,
        }
        .map_err(|message| {
            tracing::error!(prompt = name, error = %message, "Prompt generation failed");
            PromptError::generation(name, message)
        })?;

        Ok(GetPromptResult::new(vec![PromptMessage::new_text(
            PromptMessageRole::User,
            text,
        )])
        .with_description(kind.description().to_string()))
    }

    async fn database_config_helper(
        &self,
        arguments: Option<&JsonObject>,
    ) -> Result<String, String> {
        let database_name = string_argument(arguments, "database_name")
            .ok_or_else(|| "database_name is required.".to_string())?;
        let raw_keys = string_argument(arguments, "option_keys").unwrap_or("");
        let option_keys = split_option_keys(raw_keys);
        if option_keys.is_empty() {
            return Err("option_keys is required.".to_string());
        }

        let database = self.client.database();
        let docs = database
            .configuration_documentation()
            .await
            .map_err(|e| e.to_string())?;
        let filtered_option_docs = docs
            .iter()
            .filter(|(key, _)| option_keys.contains(key))
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");

        let options = database
            .configuration(database_name, Some(&option_keys))
            .await
            .map_err(|e| e.to_string())?;
        let options = serde_json::to_string_pretty(&options).map_err(|e| e.to_string())?;

        Ok(DB_CONFIG_INFO_TEMPLATE
            .replace("{database_name}", database_name)
            .replace("{filtered_option_docs}", &filtered_option_docs)
            .replace("{option_keys}", &option_keys.join(", "))
            .replace("{options}", &options))
    }

    async fn roles_summary(&self) -> Result<String, String> {
        let roles = self
            .client
            .security()
            .list_roles_with_permissions()
            .await
            .map_err(|e| e.to_string())?;
        let roles = serde_json::to_string_pretty(&roles).map_err(|e| e.to_string())?;
        Ok(ROLES_SUMMARY_TEMPLATE.replace("{roles_with_permissions}", &roles))
    }
}

fn string_argument<'a>(arguments: Option<&'a JsonObject>, key: &str) -> Option<&'a str> {
    arguments?
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Splits a comma-separated key list, trimming and dropping blanks.
fn split_option_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
