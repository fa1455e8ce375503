//! Cooperative cancellation for in-flight requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared cancellation flag for one request (or one teardown scope).
///
/// Clones observe the same flag, so a coordinator can hand a child handle to
/// a worker and cancel it from the owning side. Cancellation is cooperative:
/// it does not guarantee the remote side effect didn't happen, only that the
/// local result is discarded.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
