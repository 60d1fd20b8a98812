use crate::types::{ActionMatch, BuiltinAction, ResourceMatch};

/// Possessed resource that covers every resource.
pub const ANY_RESOURCE: &str = "*";

const CHILD_SEPARATOR: char = ':';
const SCOPE_SEPARATOR: char = '.';

/// Explain how `possessed` covers `required`, or `None` when it does not.
///
/// Comparison is case-sensitive.
pub fn resource_match_reason(required: &str, possessed: &str) -> Option<ResourceMatch> {
    if possessed == ANY_RESOURCE {
        return Some(ResourceMatch::Wildcard);
    }
    if possessed == required {
        return Some(ResourceMatch::Exact);
    }

    let rest = required.strip_prefix(possessed)?;
    match rest.chars().next() {
        Some(CHILD_SEPARATOR) => Some(ResourceMatch::Child),
        Some(SCOPE_SEPARATOR) => Some(ResourceMatch::Scope),
        _ => None,
    }
}

/// Explain how `possessed` covers `required`, or `None` when it does not.
pub fn action_match_reason(required: &str, possessed: &str) -> Option<ActionMatch> {
    match possessed.parse::<BuiltinAction>() {
        Ok(BuiltinAction::Any) => Some(ActionMatch::Wildcard),
        Ok(BuiltinAction::Manage) => Some(ActionMatch::Manage),
        _ if possessed == required => Some(ActionMatch::Exact),
        _ => None,
    }
}

pub fn match_resource(required: &str, possessed: &str) -> bool {
    resource_match_reason(required, possessed).is_some()
}

pub fn match_action(required: &str, possessed: &str) -> bool {
    action_match_reason(required, possessed).is_some()
}
