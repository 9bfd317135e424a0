//! Process-wide environment lock.
//!
//! [`crate::MergeConfig::load`] reads `MOCKLI_*` variables while tests
//! rewrite them. Both go through one mutex so a load never observes a
//! half-applied set of variables.

use std::env;
use std::ffi::OsStr;
use std::sync::{Mutex, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `op` with the lock held.
///
/// `op` must not call [`assign`]; the lock is not re-entrant.
pub fn with_lock<T>(op: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    op()
}

/// Set `key` to `value`, or remove it when `value` is `None`.
pub fn assign(key: impl AsRef<OsStr>, value: Option<&OsStr>) {
    with_lock(|| match value {
        // SAFETY: every mutation goes through ENV_LOCK.
        Some(value) => unsafe { env::set_var(key, value) },
        // SAFETY: as above.
        None => unsafe { env::remove_var(key) },
    });
}
