//! Helpers for tests that exercise configuration loading.

use std::ffi::{OsStr, OsString};

use crate::config::CONFIG_PATH_VAR;
use crate::environment;

/// Every variable that influences [`crate::MergeConfig::load`].
pub const CONFIG_ENV_KEYS: &[&str] = &[CONFIG_PATH_VAR, "MOCKLI_COLLISION_POLICY"];

/// Apply a sequence of assignments, removing keys paired with `None`.
///
/// # Examples
///
/// ```
/// use mockli::test_utils::apply_env;
///
/// apply_env(&[("MOCKLI_DOCTEST_VAR", Some("1")), ("MOCKLI_DOCTEST_VAR", None)]);
/// assert!(std::env::var_os("MOCKLI_DOCTEST_VAR").is_none());
/// ```
pub fn apply_env(pairs: &[(&str, Option<&str>)]) {
    for (key, value) in pairs {
        environment::assign(key, value.map(OsStr::new));
    }
}

/// Current values of [`CONFIG_ENV_KEYS`], read under one lock.
#[must_use]
pub fn snapshot_config_env() -> Vec<(&'static str, Option<OsString>)> {
    environment::with_lock(|| {
        CONFIG_ENV_KEYS
            .iter()
            .map(|&key| (key, std::env::var_os(key)))
            .collect()
    })
}
