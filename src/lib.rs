// src/lib.rs
pub use error::AccessError;
pub use evaluator::{PermissionEvaluator, check_permission, evaluate_rows, has_permission};
pub use glyphs::{GlyphTable, LEGACY_GLYPHS};
pub use pages::{PagesParser, encode_pages, parse_pages};
pub use permission_match::{
    ANY_RESOURCE, action_match_reason, match_action, match_resource, resource_match_reason,
};
pub use store::{MemoryPermissionStore, PermissionStore};
pub use types::{
    ADMIN_ROLE, ActionMatch, AuthorizationQuery, BuiltinAction, Decision, DenyReason, Grant,
    MenuNode, ParsedPages, PermissionRow, ResourceMatch, RolePermissions, Roles,
};

pub mod metrics;

mod error;
mod evaluator;
mod glyphs;
mod pages;
mod permission_match;
mod store;
mod timers;
mod types;
