use std::sync::{Arc, Mutex};

use super::*;
use crate::permission_match::ANY_RESOURCE;
use crate::store::MemoryPermissionStore;
use crate::types::{ActionMatch, ResourceMatch};
use insta::assert_json_snapshot;
use yare::parameterized;


const SCHOOL_ROWS: &str = r#"[
    {"roleName": "GURU", "resource": "jurnal", "action": "export", "isAllowed": true},
    {"roleName": "GURU", "resource": "jurnal", "action": "create", "isAllowed": true},
    {"roleName": "GURU", "resource": "nilai", "action": "update", "isAllowed": false},
    {"roleName": "WALI_KELAS", "resource": "ketidakhadiran", "action": "manage", "isAllowed": true},
    {"roleName": "KURIKULUM", "resource": "nilai", "action": "*", "isAllowed": true},
    {"roleName": "KURIKULUM", "resource": "nilai", "action": "delete", "isAllowed": false},
    {"roleName": "OPERATOR", "resource": "*", "action": "export", "isAllowed": true},
    {"roleName": "SUPER", "resource": "*", "action": "*", "isAllowed": true}
]"#;

/// A store whose backend is down.
struct UnavailableStore;

impl PermissionStore for UnavailableStore {
    fn fetch_permissions_for_roles(
        &self,
        _roles: &[String],
    ) -> Result<Vec<PermissionRow>, AccessError> {
        Err(AccessError::StoreUnavailable("connection refused".to_string()))
    }
}

/// Records which role lists were fetched.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryPermissionStore,
    calls: Mutex<Vec<Vec<String>>>,
}

impl PermissionStore for RecordingStore {
    fn fetch_permissions_for_roles(
        &self,
        roles: &[String],
    ) -> Result<Vec<PermissionRow>, AccessError> {
        self.calls.lock().unwrap().push(roles.to_vec());
        self.inner.fetch_permissions_for_roles(roles)
    }
}

#[derive(Clone)]
struct SharedLogBuffer(Arc<Mutex<Vec<u8>>>);

struct SharedLogWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(Arc::clone(&self.0))
    }
}

impl std::io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn school_store() -> MemoryPermissionStore {
    MemoryPermissionStore::from_json_str(SCHOOL_ROWS).expect("rows should load")
}

fn school_evaluator() -> PermissionEvaluator {
    PermissionEvaluator::new(school_store())
}

fn query(roles: &[&str], resource: &str, action: &str) -> AuthorizationQuery {
    AuthorizationQuery::new(Roles::new(roles), resource, action)
}

fn assert_allow(decision: &Decision) {
    assert!(matches!(decision, Decision::Allow { .. }), "expected allow, got {decision}");
}

fn assert_deny(decision: &Decision) {
    assert!(matches!(decision, Decision::Deny { .. }), "expected deny, got {decision}");
}

include!("rows.rs");
include!("store.rs");
