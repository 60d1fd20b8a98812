//! Permission store collaborator.
//!
//! The evaluator reads `role_permissions` rows through [`PermissionStore`].
//! Production deployments back it with their database client; the
//! in-memory store here serves tests, fixtures and small deployments that
//! load rows from JSON.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::AccessError;
use crate::types::PermissionRow;

pub trait PermissionStore: Send + Sync {
    /// Every row whose `role_name` is one of `roles`, allowed or not.
    fn fetch_permissions_for_roles(
        &self,
        roles: &[String],
    ) -> Result<Vec<PermissionRow>, AccessError>;
}

impl<S: PermissionStore + ?Sized> PermissionStore for Arc<S> {
    fn fetch_permissions_for_roles(
        &self,
        roles: &[String],
    ) -> Result<Vec<PermissionRow>, AccessError> {
        (**self).fetch_permissions_for_roles(roles)
    }
}

/// Rows held in memory. Cloneable and thread-safe; clones share rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryPermissionStore {
    rows: Arc<RwLock<Vec<PermissionRow>>>,
}

impl MemoryPermissionStore {
    pub fn new(rows: Vec<PermissionRow>) -> Self {
        MemoryPermissionStore {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Load rows from a JSON array of `{roleName, resource, action, isAllowed}`.
    pub fn from_json_str(json: &str) -> Result<Self, AccessError> {
        let rows: Vec<PermissionRow> = serde_json::from_str(json)?;
        Ok(MemoryPermissionStore::new(rows))
    }

    /// Swap in a new row set. Concurrent readers see either the old or the
    /// new set, never a mix.
    pub fn replace(&self, rows: Vec<PermissionRow>) -> Result<(), AccessError> {
        let count = rows.len();
        *self.rows.write()? = rows;
        info!(event = "Store", phase = "Replace", rows = count);
        Ok(())
    }

    pub fn insert(&self, row: PermissionRow) -> Result<(), AccessError> {
        self.rows.write()?.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn fetch_permissions_for_roles(
        &self,
        roles: &[String],
    ) -> Result<Vec<PermissionRow>, AccessError> {
        let guard = self.rows.read()?;
        Ok(guard
            .iter()
            .filter(|row| roles.contains(&row.role_name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: &str = r#"[
        {"roleName": "GURU", "resource": "jurnal", "action": "export", "isAllowed": true},
        {"roleName": "GURU", "resource": "nilai", "action": "delete", "isAllowed": false},
        {"roleName": "KAUR", "resource": "ketidakhadiran", "action": "manage", "isAllowed": true}
    ]"#;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_json_str() {
        let store = MemoryPermissionStore::from_json_str(ROWS).unwrap();
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_bad_rows() {
        let result = MemoryPermissionStore::from_json_str(r#"[{"roleName": "GURU"}]"#);
        assert!(matches!(result, Err(AccessError::ConfigError(_))));
    }

    #[test]
    fn test_fetch_filters_by_role_and_keeps_disallowed_rows() {
        let store = MemoryPermissionStore::from_json_str(ROWS).unwrap();
        let rows = store.fetch_permissions_for_roles(&roles(&["GURU"])).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.role_name == "GURU"));
    }

    #[test]
    fn test_fetch_role_names_are_exact() {
        let store = MemoryPermissionStore::from_json_str(ROWS).unwrap();
        let rows = store.fetch_permissions_for_roles(&roles(&["guru"])).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_fetch_no_roles() {
        let store = MemoryPermissionStore::from_json_str(ROWS).unwrap();
        assert!(store.fetch_permissions_for_roles(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_replace_and_insert_are_shared_between_clones() {
        let store = MemoryPermissionStore::default();
        let clone = store.clone();
        assert!(clone.is_empty());

        store
            .replace(vec![PermissionRow::new("GURU", "jurnal", "export")])
            .unwrap();
        clone
            .insert(PermissionRow::new("GURU", "nilai", "create"))
            .unwrap();

        assert_eq!(store.len(), 2);
        let rows = clone.fetch_permissions_for_roles(&roles(&["GURU"])).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_arc_store_delegates() {
        let store: Arc<dyn PermissionStore> =
            Arc::new(MemoryPermissionStore::from_json_str(ROWS).unwrap());
        let rows = store.fetch_permissions_for_roles(&roles(&["KAUR"])).unwrap();
        assert_eq!(rows, vec![PermissionRow::new("KAUR", "ketidakhadiran", "manage")]);
    }
}
