//! Roles, users and permissions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::array_field;
use crate::client::{RequestOptions, StardogClient};
use crate::error::{Error, Result};

// ============================================================================
// Permission
// ============================================================================

/// Action a permission grants. `All` means every action.
///
/// Variants carry no doc comments so the derived schema stays a flat
/// string enum.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(inline)]
pub enum Action {
    Read,
    Write,
    Create,
    Delete,
    Revoke,
    Grant,
    Execute,
    All,
}

/// Kind of resource a permission applies to. `All` serializes as `*`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[schemars(inline)]
pub enum ResourceType {
    Db,
    Metadata,
    User,
    Role,
    NamedGraph,
    VirtualGraph,
    DataSource,
    DbmsAdmin,
    Admin,
    SensitiveProperty,
    StoredQuery,
    #[serde(rename = "*")]
    All,
}

/// A `{action, resource_type, resource}` access rule.
///
/// Serialized as-is into permission request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Permission {
    /// The action to be performed. `all` means all actions.
    pub action: Action,
    /// The type of resource. `*` means all resource types.
    pub resource_type: ResourceType,
    /// The specific resource(s) to which the permission applies. In most
    /// cases, a single resource (list of 1 string) is expected. The `*`
    /// character is used to indicate all resources of the specified type.
    #[schemars(length(min = 1))]
    pub resource: Vec<String>,
}

impl Permission {
    /// Creates a permission.
    pub fn new(action: Action, resource_type: ResourceType, resource: Vec<String>) -> Self {
        Self {
            action,
            resource_type,
            resource,
        }
    }

    /// Checks that at least one resource is named.
    pub fn validate(&self) -> Result<()> {
        if self.resource.is_empty() {
            return Err(Error::invalid_argument(
                "Permission resource must contain at least one entry.",
            ));
        }
        Ok(())
    }
}

/// JSON schema of [`Permission`], with no `$ref`s.
pub fn permission_schema() -> Value {
    let schema = schemars::schema_for!(Permission);
    let mut schema = serde_json::to_value(schema).unwrap_or(Value::Null);
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }
    schema
}

// ============================================================================
// SecurityService
// ============================================================================

/// Role, user and permission administration.
#[derive(Debug, Clone, Copy)]
pub struct SecurityService<'a> {
    client: &'a StardogClient,
}

impl<'a> SecurityService<'a> {
    pub(crate) fn new(client: &'a StardogClient) -> Self {
        Self { client }
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.client.url(segments)?;
        self.client.get(&url, RequestOptions::new()).await?.json()
    }

    /// Names of all roles.
    pub async fn list_roles(&self) -> Result<Vec<Value>> {
        let data = self.get_json(&["admin", "roles"]).await?;
        Ok(array_field(&data, "roles"))
    }

    /// All roles with their permissions, as returned by the server.
    pub async fn list_roles_with_permissions(&self) -> Result<Value> {
        self.get_json(&["admin", "roles", "list"]).await
    }

    /// Permissions held by a role.
    pub async fn role_permissions(&self, role: &str) -> Result<Vec<Value>> {
        let data = self.get_json(&["admin", "permissions", "role", role]).await?;
        Ok(array_field(&data, "permissions"))
    }

    /// Usernames of users holding a role.
    pub async fn users_with_role(&self, role: &str) -> Result<Vec<Value>> {
        let data = self.get_json(&["admin", "roles", role, "users"]).await?;
        Ok(array_field(&data, "users"))
    }

    /// Username of the authenticated user.
    pub async fn whoami(&self) -> Result<String> {
        let url = self.client.url(&["admin", "status", "whoami"])?;
        Ok(self.client.get(&url, RequestOptions::new()).await?.text())
    }

    /// Names of roles assigned to a user.
    pub async fn roles_assigned_to_user(&self, username: &str) -> Result<Vec<Value>> {
        let data = self.get_json(&["admin", "users", username, "roles"]).await?;
        Ok(array_field(&data, "roles"))
    }

    /// Roles, permissions and status flags of one user.
    pub async fn user_details(&self, username: &str) -> Result<Value> {
        self.get_json(&["admin", "users", username]).await
    }

    /// Every user with details, as returned by the server.
    pub async fn users_with_details(&self) -> Result<Value> {
        self.get_json(&["admin", "users", "list"]).await
    }

    /// Usernames of all users.
    pub async fn list_users(&self) -> Result<Vec<Value>> {
        let data = self.get_json(&["admin", "users"]).await?;
        Ok(array_field(&data, "users"))
    }

    /// Creates a role.
    pub async fn create_role(&self, role: &str) -> Result<()> {
        let url = self.client.url(&["admin", "roles"])?;
        let body = json!({ "rolename": role });
        self.client.post(&url, RequestOptions::new().json(body)).await?;
        Ok(())
    }

    /// Deletes a role; `force` removes it even while assigned.
    pub async fn delete_role(&self, role: &str, force: bool) -> Result<()> {
        let url = self.client.url(&["admin", "roles", role])?;
        let options = RequestOptions::new().query("force", force);
        self.client.delete(&url, options).await?;
        Ok(())
    }

    /// Assigns a role to a user.
    pub async fn assign_role_to_user(&self, role: &str, username: &str) -> Result<()> {
        let url = self.client.url(&["admin", "users", username, "roles"])?;
        let body = json!({ "rolename": role });
        self.client.post(&url, RequestOptions::new().json(body)).await?;
        Ok(())
    }

    /// Removes a role from a user.
    pub async fn revoke_role_from_user(&self, role: &str, username: &str) -> Result<()> {
        let url = self.client.url(&["admin", "users", username, "roles", role])?;
        self.client.delete(&url, RequestOptions::new()).await?;
        Ok(())
    }

    /// Grants a permission to a role.
    pub async fn assign_permission_to_role(
        &self,
        role: &str,
        permission: &Permission,
    ) -> Result<()> {
        let url = self.client.url(&["admin", "permissions", "role", role])?;
        self.client.put(&url, permission_body(permission)?).await?;
        Ok(())
    }

    /// Revokes a permission from a role. The server models this as a POST
    /// to the `/delete` sub-path.
    pub async fn revoke_permission_from_role(
        &self,
        role: &str,
        permission: &Permission,
    ) -> Result<()> {
        let url = self
            .client
            .url(&["admin", "permissions", "role", role, "delete"])?;
        self.client.post(&url, permission_body(permission)?).await?;
        Ok(())
    }

    /// Grants a permission to a user.
    pub async fn assign_permission_to_user(
        &self,
        username: &str,
        permission: &Permission,
    ) -> Result<()> {
        let url = self.client.url(&["admin", "permissions", "user", username])?;
        self.client.put(&url, permission_body(permission)?).await?;
        Ok(())
    }

    /// Revokes a permission from a user.
    pub async fn revoke_permission_from_user(
        &self,
        username: &str,
        permission: &Permission,
    ) -> Result<()> {
        let url = self
            .client
            .url(&["admin", "permissions", "user", username, "delete"])?;
        self.client.post(&url, permission_body(permission)?).await?;
        Ok(())
    }
}

fn permission_body(permission: &Permission) -> Result<RequestOptions> {
    permission.validate()?;
    let body = serde_json::to_value(permission)
        .map_err(|e| Error::invalid_argument(format!("Unserializable permission: {e}")))?;
    Ok(RequestOptions::new().json(body))
}
