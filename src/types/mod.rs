//! Data model types for menus, roles, permission rows and decisions.
//!
//! Wire forms use camelCase field names (`pageId`, `roleName`,
//! `isAllowed`) to match the records the web layer already exchanges.

mod action;
mod decision;
mod menu;
mod permission;
mod query;
mod role;
mod role_permissions;

pub use action::BuiltinAction;
pub use decision::{ActionMatch, Decision, DenyReason, Grant, ResourceMatch};
pub use menu::{MenuNode, ParsedPages};
pub use permission::PermissionRow;
pub use query::AuthorizationQuery;
pub use role::{ADMIN_ROLE, Roles};
pub use role_permissions::RolePermissions;
