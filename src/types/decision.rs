//! Authorization decisions and the reason behind them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::permission::PermissionRow;

/// How a possessed resource covered the required one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum ResourceMatch {
    /// Possessed resource is `*`.
    Wildcard,
    Exact,
    /// Required resource is `<possessed>:<suffix>`.
    Child,
    /// Required resource is `<possessed>.<suffix>`.
    Scope,
}

/// How a possessed action covered the required one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum ActionMatch {
    Wildcard,
    Manage,
    Exact,
}

/// Why a check was allowed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Grant {
    /// The caller flagged the user as an administrator.
    AdminFlag,
    /// One of the roles is `ADMIN`.
    AdminRole,
    /// `view` is open to every authenticated caller.
    ViewIsFree,
    /// The first allowed row covering the request.
    Row {
        row: PermissionRow,
        resource_match: ResourceMatch,
        action_match: ActionMatch,
    },
}

/// Why a check was denied.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum DenyReason {
    NoRoles,
    NoPermissions,
    NoMatchingPermission,
    /// The permission store failed; checks fail closed.
    StoreError { message: String },
}

/// Allow or deny, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow { grant: Grant },
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn allow(grant: Grant) -> Self {
        Decision::Allow { grant }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Decision::Deny { reason }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }
}

impl Display for Grant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Grant::AdminFlag => write!(f, "admin flag"),
            Grant::AdminRole => write!(f, "admin role"),
            Grant::ViewIsFree => write!(f, "view is free"),
            Grant::Row { row, .. } => write!(f, "{row}"),
        }
    }
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DenyReason::NoRoles => write!(f, "no roles"),
            DenyReason::NoPermissions => write!(f, "no permissions"),
            DenyReason::NoMatchingPermission => write!(f, "no matching permission"),
            DenyReason::StoreError { message } => write!(f, "store error: {message}"),
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Decision::Allow { grant } => write!(f, "Allow({grant})"),
            Decision::Deny { reason } => write!(f, "Deny({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_json_snapshot;

    #[test]
    fn test_decision_display_allow_row() {
        let decision = Decision::allow(Grant::Row {
            row: PermissionRow::new("GURU", "jurnal", "export"),
            resource_match: ResourceMatch::Exact,
            action_match: ActionMatch::Exact,
        });
        assert!(decision.is_allowed());
        assert_eq!(decision.to_string(), "Allow(GURU: jurnal:export (allow))");
    }

    #[test]
    fn test_decision_display_deny() {
        let decision = Decision::deny(DenyReason::StoreError {
            message: "timeout".to_string(),
        });
        assert!(!decision.is_allowed());
        assert_eq!(decision.to_string(), "Deny(store error: timeout)");
    }

    #[test]
    fn test_decision_serialization() {
        let decision = Decision::allow(Grant::Row {
            row: PermissionRow::new("KAUR", "ketidakhadiran", "manage"),
            resource_match: ResourceMatch::Child,
            action_match: ActionMatch::Manage,
        });
        assert_json_snapshot!(decision, @r#"
        {
          "Allow": {
            "grant": {
              "Row": {
                "row": {
                  "roleName": "KAUR",
                  "resource": "ketidakhadiran",
                  "action": "manage",
                  "isAllowed": true
                },
                "resource_match": "Child",
                "action_match": "Manage"
              }
            }
          }
        }
        "#);
    }

    #[test]
    fn test_unit_reasons_serialize_as_strings() {
        assert_json_snapshot!(Decision::allow(Grant::ViewIsFree), @r#"
        {
          "Allow": {
            "grant": "ViewIsFree"
          }
        }
        "#);
    }
}
