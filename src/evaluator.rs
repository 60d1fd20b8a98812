use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::metrics;
use crate::permission_match::{action_match_reason, resource_match_reason};
use crate::store::PermissionStore;
use crate::timers::PhaseTimer;
use crate::{
    error::AccessError,
    types::{
        AuthorizationQuery, BuiltinAction, Decision, DenyReason, Grant, PermissionRow,
        RolePermissions, Roles,
    },
};

/// Decide a check against rows the caller already holds.
///
/// `is_admin` allows everything, and `view` is allowed without any row.
/// Otherwise the first allowed row covering both `resource` and `action`
/// grants the check. Disallowed rows are skipped; they never veto.
pub fn evaluate_rows(
    rows: &[PermissionRow],
    resource: &str,
    action: &str,
    is_admin: bool,
) -> Decision {
    if is_admin {
        return Decision::allow(Grant::AdminFlag);
    }
    if action == BuiltinAction::View.as_ref() {
        return Decision::allow(Grant::ViewIsFree);
    }
    if rows.is_empty() {
        return Decision::deny(DenyReason::NoPermissions);
    }

    rows.iter()
        .filter(|row| row.is_allowed)
        .find_map(|row| {
            let resource_match = resource_match_reason(resource, &row.resource)?;
            let action_match = action_match_reason(action, &row.action)?;
            Some(Grant::Row {
                row: row.clone(),
                resource_match,
                action_match,
            })
        })
        .map_or(
            Decision::deny(DenyReason::NoMatchingPermission),
            Decision::allow,
        )
}

pub fn has_permission(rows: &[PermissionRow], resource: &str, action: &str, is_admin: bool) -> bool {
    evaluate_rows(rows, resource, action, is_admin).is_allowed()
}

/// Check `roles` against the rows `store` holds for them.
///
/// Never fails: a store error is logged and the check is denied.
pub fn check_permission<S, R>(roles: &[R], resource: &str, action: &str, store: &S) -> bool
where
    S: PermissionStore + ?Sized,
    R: AsRef<str>,
{
    let query = AuthorizationQuery::new(Roles::new(roles), resource, action);
    evaluate_with_store(store, &query).is_allowed()
}

fn evaluate_with_store<S>(store: &S, query: &AuthorizationQuery) -> Decision
where
    S: PermissionStore + ?Sized,
{
    let mut total = Duration::ZERO;
    let mut fetch = Duration::ZERO;
    let decision = {
        let _timer = PhaseTimer::new(&mut total);
        decide(store, query, &mut fetch)
    };

    metrics::record_check(
        decision.is_allowed(),
        total,
        fetch,
        &query.resource,
        &query.action,
    );
    decision
}

fn decide<S>(store: &S, query: &AuthorizationQuery, fetch: &mut Duration) -> Decision
where
    S: PermissionStore + ?Sized,
{
    debug!(
        event = "Check",
        phase = "Request",
        roles = %query.roles,
        resource = %query.resource,
        action = %query.action,
        is_admin = query.is_admin
    );

    if query.is_admin {
        info!(event = "Check", phase = "Bypass", reason = "admin flag", query = %query);
        return Decision::allow(Grant::AdminFlag);
    }
    if query.roles.is_empty() {
        debug!(event = "Check", phase = "Result", result = "deny", reason = "no roles");
        return Decision::deny(DenyReason::NoRoles);
    }
    if query.roles.is_admin() {
        info!(event = "Check", phase = "Bypass", reason = "admin role", query = %query);
        return Decision::allow(Grant::AdminRole);
    }

    let fetched = {
        let _timer = PhaseTimer::new(fetch);
        store.fetch_permissions_for_roles(query.roles.as_slice())
    };
    let rows = match fetched {
        Ok(rows) => rows,
        Err(err) => {
            warn!(
                event = "Check",
                phase = "Store",
                error = %err,
                query = %query
            );
            return Decision::deny(DenyReason::StoreError {
                message: err.to_string(),
            });
        }
    };

    let decision = evaluate_rows(&rows, &query.resource, &query.action, false);
    debug!(event = "Check", phase = "Result", rows = rows.len(), result = %decision);
    decision
}

/// Store-backed evaluator handle. Cloneable and thread-safe; clones share
/// the store.
#[derive(Clone)]
pub struct PermissionEvaluator {
    store: Arc<dyn PermissionStore>,
}

impl Debug for PermissionEvaluator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PermissionEvaluator").finish_non_exhaustive()
    }
}

impl PermissionEvaluator {
    pub fn new<S: PermissionStore + 'static>(store: S) -> Self {
        PermissionEvaluator {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn PermissionStore>) -> Self {
        PermissionEvaluator { store }
    }

    /// Decide `query`, explaining the outcome.
    ///
    /// Order: admin flag, empty roles, `ADMIN` role, store fetch (a failure
    /// denies), then [`evaluate_rows`] over the fetched rows.
    pub fn evaluate(&self, query: &AuthorizationQuery) -> Decision {
        evaluate_with_store(self.store.as_ref(), query)
    }

    pub fn check_permission<R: AsRef<str>>(&self, roles: &[R], resource: &str, action: &str) -> bool {
        check_permission(roles, resource, action, self.store.as_ref())
    }

    /// Rows held by `roles`, for permission screens. Unlike checks, store
    /// errors propagate here.
    pub fn permissions_for_roles(&self, roles: &Roles) -> Result<RolePermissions, AccessError> {
        if roles.is_empty() {
            return Ok(RolePermissions::new(roles.clone(), Vec::new()));
        }
        let rows = self.store.fetch_permissions_for_roles(roles.as_slice())?;
        Ok(RolePermissions::new(roles.clone(), rows))
    }

    /// Action patterns `roles` hold on `resource`, sorted, always including
    /// `view`. The `ADMIN` role reports `*`; no roles report nothing, as
    /// checks deny them.
    pub fn allowed_actions(&self, roles: &Roles, resource: &str) -> Result<Vec<String>, AccessError> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }
        if roles.is_admin() {
            return Ok(vec![BuiltinAction::Any.to_string()]);
        }
        let mut actions = self.permissions_for_roles(roles)?.actions_for(resource);
        actions.push(BuiltinAction::View.to_string());
        Ok(actions.into_iter().sorted().dedup().collect())
    }
}

#[cfg(test)]
mod tests;
