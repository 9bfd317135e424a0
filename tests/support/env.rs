//! Configuration environment fixtures for integration tests.
//!
//! [`ConfigEnv`] clears every `MOCKLI_*` variable config loading reads,
//! points `MOCKLI_CONFIG_PATH` at a temporary file, and puts the original
//! values back on drop.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use mockli::config::CONFIG_PATH_VAR;
use mockli::environment;
use mockli::test_utils::{CONFIG_ENV_KEYS, apply_env, snapshot_config_env};
use tempfile::TempDir;

pub struct ConfigEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    dir: TempDir,
}

impl ConfigEnv {
    /// Write `contents` as the config file and apply `env` on top.
    ///
    /// Callers must serialise tests with `#[serial]`.
    pub fn with_file(contents: &str, env: &[(&str, Option<&str>)]) -> Self {
        let fixture = Self::empty();
        let path = fixture.dir.path().join(".mockli.toml");
        fs::write(&path, contents).expect("write config");
        Self::point_at(&path);
        apply_env(env);
        fixture
    }

    /// Point config loading at a file that does not exist.
    pub fn without_file() -> Self {
        let fixture = Self::empty();
        Self::point_at(&fixture.dir.path().join("absent.toml"));
        fixture
    }

    fn empty() -> Self {
        let saved = snapshot_config_env();
        for key in CONFIG_ENV_KEYS {
            environment::assign(key, None);
        }
        let dir = tempfile::tempdir().expect("create temp dir");
        Self { saved, dir }
    }

    fn point_at(path: &Path) {
        environment::assign(CONFIG_PATH_VAR, Some(path.as_os_str()));
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            environment::assign(key, value.as_deref());
        }
    }
}
