//! Stored role permission rows.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single `role_permissions` row: `role_name` may perform `action` on
/// `resource` when `is_allowed` is set.
///
/// Both `resource` and `action` may be `*`. A row with `is_allowed == false`
/// grants nothing, but it does not revoke a grant coming from another row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRow {
    pub role_name: String,
    pub resource: String,
    pub action: String,
    pub is_allowed: bool,
}

impl PermissionRow {
    /// An allowed row.
    pub fn new(
        role_name: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        PermissionRow {
            role_name: role_name.into(),
            resource: resource.into(),
            action: action.into(),
            is_allowed: true,
        }
    }

    /// A row that is stored but switched off.
    pub fn disallowed(
        role_name: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        PermissionRow {
            is_allowed: false,
            ..PermissionRow::new(role_name, resource, action)
        }
    }
}

impl Display for PermissionRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let effect = if self.is_allowed { "allow" } else { "off" };
        write!(
            f,
            "{}: {}:{} ({effect})",
            self.role_name, self.resource, self.action
        )
    }
}
