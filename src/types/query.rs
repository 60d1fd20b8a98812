//! A single authorization question.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Roles;

/// "May a caller holding `roles` perform `action` on `resource`?"
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationQuery {
    pub roles: Roles,
    pub resource: String,
    pub action: String,
    /// Set by the caller when its own user record marks an administrator.
    #[serde(default)]
    pub is_admin: bool,
}

impl AuthorizationQuery {
    pub fn new(roles: Roles, resource: impl Into<String>, action: impl Into<String>) -> Self {
        AuthorizationQuery {
            roles,
            resource: resource.into(),
            action: action.into(),
            is_admin: false,
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

impl Display for AuthorizationQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}:{}", self.roles, self.resource, self.action)?;
        if self.is_admin {
            write!(f, " (admin)")?;
        }
        Ok(())
    }
}
