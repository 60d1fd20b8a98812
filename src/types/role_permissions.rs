//! Permission rows held by a set of roles.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::permission_match::match_resource;

use super::permission::PermissionRow;
use super::role::Roles;

/// The permission rows a set of roles holds, as returned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RolePermissions {
    roles: Roles,
    rows: Vec<PermissionRow>,
}

impl RolePermissions {
    pub fn new(roles: Roles, rows: Vec<PermissionRow>) -> Self {
        RolePermissions { roles, rows }
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn rows(&self) -> &[PermissionRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resources named by allowed rows, sorted.
    pub fn resources_by_name(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.is_allowed)
            .map(|row| row.resource.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Possessed action patterns that apply to `resource`, sorted.
    ///
    /// Patterns are reported as stored, so `manage` or `*` show up as such
    /// rather than being expanded.
    pub fn actions_for(&self, resource: &str) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.is_allowed && match_resource(resource, &row.resource))
            .map(|row| row.action.clone())
            .sorted()
            .dedup()
            .collect()
    }
}
