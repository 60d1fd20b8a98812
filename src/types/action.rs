//! Action names with built-in meaning.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Action names the evaluator knows about.
///
/// Only `View`, `Manage` and `Any` change how a check is decided. The rest
/// exist so callers do not have to spell common action names by hand;
/// any other string is still a valid action.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuiltinAction {
    /// Read access; granted to every authenticated caller.
    View,
    Create,
    Update,
    Delete,
    Export,
    /// Implies every other action on the same resource.
    Manage,
    #[strum(serialize = "*")]
    #[serde(rename = "*")]
    Any,
}
