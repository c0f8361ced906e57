//! MCP tools for roles, users and permissions.

use std::sync::Arc;

use rmcp::model::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use stardog_client::{Permission, StardogClient, array_field, permission_schema};

use super::{filter_by_field, make_tool, parse_args, serialize_response};
use crate::error::ToolError;
use crate::registry::{ToolRegistry, ToolResult, text_result};

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments naming a role.
#[derive(Debug, Deserialize)]
pub struct RoleArgs {
    /// Name of the role.
    pub role_name: String,
}

/// Arguments for `delete_role`.
#[derive(Debug, Deserialize)]
pub struct DeleteRoleArgs {
    /// Name of the role.
    pub role_name: String,
    /// Delete even while assigned to users.
    pub force: Option<bool>,
}

/// Arguments naming a user.
#[derive(Debug, Deserialize)]
pub struct UsernameArgs {
    /// Username of the user.
    pub username: String,
}

/// Arguments pairing a role with a user.
#[derive(Debug, Deserialize)]
pub struct RoleUserArgs {
    /// Name of the role.
    pub role_name: String,
    /// Username of the user.
    pub username: String,
}

/// Arguments pairing a role with a permission.
#[derive(Debug, Deserialize)]
pub struct RolePermissionArgs {
    /// Name of the role.
    pub role_name: String,
    /// Permission to grant or revoke.
    pub permission: Permission,
}

/// Arguments pairing a user with a permission.
#[derive(Debug, Deserialize)]
pub struct UserPermissionArgs {
    /// Username of the user.
    pub username: String,
    /// Permission to grant or revoke.
    pub permission: Permission,
}

/// Arguments for `list_roles`.
#[derive(Debug, Default, Deserialize)]
pub struct ListRolesArgs {
    /// Return roles with their permissions.
    pub include_permissions: Option<bool>,
    /// Role names to keep when permissions are included.
    pub roles_filter: Option<Vec<String>>,
}

/// Arguments for `list_users`.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersArgs {
    /// Return users with their details.
    pub include_details: Option<bool>,
    /// Usernames to keep when details are included.
    pub usernames_filter: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Tool catalog
// ---------------------------------------------------------------------------

tool_kinds! {
    /// Security tools.
    pub enum SecurityTool {
        AssignPermissionToRole => "assign_permission_to_role":
            "Assign a permission to a specific role.",
        AssignPermissionToUser => "assign_permission_to_user":
            "Assign a permission to a specific user.",
        AssignRoleToUser => "assign_role_to_user": "Assign a role to a specific user.",
        CreateRole => "create_role": "Create a new role in the Stardog server.",
        DeleteRole => "delete_role":
            "Delete a role from the Stardog server. Optionally force delete the role, deleting the role while it is assigned to other users.",
        GetRolesAssignedToUser => "get_roles_assigned_to_user":
            "Get the names of roles assigned to a specific user.",
        GetUsersWithRole => "get_users_with_role":
            "Get all the usernames of users assigned to a specific role.",
        GetWhoami => "get_whoami": "Return the authenticated user's username.",
        ListRoles => "list_roles":
            "List all of the roles names in the Stardog server. Optionally include role permissions. Optionally filter by specific role names.",
        ListUsers => "list_users":
            "List all users in the Stardog server. Optionally include details about users like permissions, superuser status and whether they are enabled. Optionally filter by specific usernames.",
        RevokePermissionFromRole => "revoke_permission_from_role":
            "Revoke a permission from a specific role.",
        RevokePermissionFromUser => "revoke_permission_from_user":
            "Revoke a permission from a specific user.",
        RevokeRoleFromUser => "revoke_role_from_user": "Revoke a role from a specific user.",
    }
}

fn string_property(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

impl SecurityTool {
    fn schema(self) -> Value {
        let role = string_property("Name of the role.");
        let username = string_property("Username of the user.");
        match self {
            SecurityTool::AssignPermissionToRole | SecurityTool::RevokePermissionFromRole => {
                object_schema(
                    json!({"role_name": role, "permission": permission_schema()}),
                    &["role_name", "permission"],
                )
            }
            SecurityTool::AssignPermissionToUser | SecurityTool::RevokePermissionFromUser => {
                object_schema(
                    json!({
                        "username": string_property("Name of the user."),
                        "permission": permission_schema()
                    }),
                    &["username", "permission"],
                )
            }
            SecurityTool::AssignRoleToUser | SecurityTool::RevokeRoleFromUser => object_schema(
                json!({"role_name": role, "username": username}),
                &["role_name", "username"],
            ),
            SecurityTool::CreateRole => object_schema(
                json!({"role_name": string_property("Name of the role to create.")}),
                &["role_name"],
            ),
            SecurityTool::DeleteRole => object_schema(
                json!({
                    "role_name": string_property("Name of the role to delete."),
                    "force": {
                        "type": "boolean",
                        "description": "Whether to force delete the role even if it is assigned to users.",
                        "default": false
                    }
                }),
                &["role_name"],
            ),
            SecurityTool::GetRolesAssignedToUser => {
                object_schema(json!({"username": username}), &["username"])
            }
            SecurityTool::GetUsersWithRole => {
                object_schema(json!({"role_name": role}), &["role_name"])
            }
            SecurityTool::GetWhoami => json!({"type": "object"}),
            SecurityTool::ListRoles => json!({
                "type": "object",
                "properties": {
                    "include_permissions": {
                        "type": "boolean",
                        "description": "Whether to include permissions assigned to the roles.",
                        "default": false
                    },
                    "roles_filter": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of role names to filter the results. Only roles with these names will be included.",
                        "default": []
                    }
                }
            }),
            SecurityTool::ListUsers => json!({
                "type": "object",
                "properties": {
                    "include_details": {
                        "type": "boolean",
                        "description": "Whether to include detailed information about users.",
                        "default": false
                    },
                    "usernames_filter": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "List of usernames to filter the results. Only users with these usernames will be included.",
                        "default": []
                    }
                }
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// SecurityTools
// ---------------------------------------------------------------------------

/// MCP tools for Stardog access control.
pub struct SecurityTools {
    client: Arc<StardogClient>,
}

impl SecurityTools {
    /// Create security tools over a shared client.
    pub fn new(client: Arc<StardogClient>) -> Self {
        Self { client }
    }
}

impl ToolRegistry for SecurityTools {
    fn tools(&self) -> Vec<Tool> {
        SecurityTool::ALL
            .iter()
            .map(|kind| make_tool(kind.name(), kind.description(), kind.schema()))
            .collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let kind = SecurityTool::from_name(name)?;
        let client = Arc::clone(&self.client);
        let name = kind.name();
        let err = move |e: stardog_client::Error| ToolError::new(name, e);

        let future: ToolResult = match kind {
            SecurityTool::ListRoles => Box::pin(async move {
                let args: ListRolesArgs = parse_args(name, args)?;
                let security = client.security();
                if !args.include_permissions.unwrap_or(false) {
                    let roles = security.list_roles().await.map_err(err)?;
                    return serialize_response(name, &roles);
                }
                let data = security.list_roles_with_permissions().await.map_err(err)?;
                let filter = args.roles_filter.unwrap_or_default();
                let roles = filter_by_field(array_field(&data, "roles"), "rolename", &filter);
                serialize_response(name, &roles)
            }),

            SecurityTool::ListUsers => Box::pin(async move {
                let args: ListUsersArgs = parse_args(name, args)?;
                let security = client.security();
                if !args.include_details.unwrap_or(false) {
                    let users = security.list_users().await.map_err(err)?;
                    return serialize_response(name, &users);
                }
                let data = security.users_with_details().await.map_err(err)?;
                let filter = args.usernames_filter.unwrap_or_default();
                let users = filter_by_field(array_field(&data, "users"), "username", &filter);
                serialize_response(name, &users)
            }),

            SecurityTool::GetUsersWithRole => Box::pin(async move {
                let args: RoleArgs = parse_args(name, args)?;
                let users = client
                    .security()
                    .users_with_role(&args.role_name)
                    .await
                    .map_err(err)?;
                serialize_response(name, &users)
            }),

            SecurityTool::GetRolesAssignedToUser => Box::pin(async move {
                let args: UsernameArgs = parse_args(name, args)?;
                let roles = client
                    .security()
                    .roles_assigned_to_user(&args.username)
                    .await
                    .map_err(err)?;
                serialize_response(name, &roles)
            }),

            SecurityTool::GetWhoami => Box::pin(async move {
                let user = client.security().whoami().await.map_err(err)?;
                Ok(text_result(user))
            }),

            SecurityTool::CreateRole => Box::pin(async move {
                let args: RoleArgs = parse_args(name, args)?;
                client
                    .security()
                    .create_role(&args.role_name)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!("Role '{}' created successfully.", args.role_name)))
            }),

            SecurityTool::DeleteRole => Box::pin(async move {
                let args: DeleteRoleArgs = parse_args(name, args)?;
                client
                    .security()
                    .delete_role(&args.role_name, args.force.unwrap_or(false))
                    .await
                    .map_err(err)?;
                Ok(text_result(format!("Role '{}' deleted successfully.", args.role_name)))
            }),

            SecurityTool::AssignRoleToUser => Box::pin(async move {
                let args: RoleUserArgs = parse_args(name, args)?;
                client
                    .security()
                    .assign_role_to_user(&args.role_name, &args.username)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully assigned role '{}' to user '{}'.",
                    args.role_name, args.username
                )))
            }),

            SecurityTool::RevokeRoleFromUser => Box::pin(async move {
                let args: RoleUserArgs = parse_args(name, args)?;
                client
                    .security()
                    .revoke_role_from_user(&args.role_name, &args.username)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully revoked role '{}' from user '{}'.",
                    args.role_name, args.username
                )))
            }),

            SecurityTool::AssignPermissionToRole => Box::pin(async move {
                let args: RolePermissionArgs = parse_args(name, args)?;
                client
                    .security()
                    .assign_permission_to_role(&args.role_name, &args.permission)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully assigned permission to role '{}'.",
                    args.role_name
                )))
            }),

            SecurityTool::RevokePermissionFromRole => Box::pin(async move {
                let args: RolePermissionArgs = parse_args(name, args)?;
                client
                    .security()
                    .revoke_permission_from_role(&args.role_name, &args.permission)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully revoked permission from role '{}'.",
                    args.role_name
                )))
            }),

            SecurityTool::AssignPermissionToUser => Box::pin(async move {
                let args: UserPermissionArgs = parse_args(name, args)?;
                client
                    .security()
                    .assign_permission_to_user(&args.username, &args.permission)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully assigned permission to user '{}'.",
                    args.username
                )))
            }),

            SecurityTool::RevokePermissionFromUser => Box::pin(async move {
                let args: UserPermissionArgs = parse_args(name, args)?;
                client
                    .security()
                    .revoke_permission_from_user(&args.username, &args.permission)
                    .await
                    .map_err(err)?;
                Ok(text_result(format!(
                    "Successfully revoked permission from user '{}'.",
                    args.username
                )))
            }),
        };
        Some(future)
    }
}

// ============================================================================
// Tests
// ============================================================================
