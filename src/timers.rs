//! RAII timing for permission checks.

use std::time::{Duration, Instant};

/// Adds the time between creation and drop to `slot`.
///
/// Early returns still record, which keeps the fail-closed paths of a
/// check measured.
///
/// ```rust,ignore
/// let mut fetch = Duration::ZERO;
/// let rows = {
///     let _timer = PhaseTimer::new(&mut fetch);
///     store.fetch_permissions_for_roles(roles)
/// };
/// ```
pub(crate) struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub(crate) fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}
