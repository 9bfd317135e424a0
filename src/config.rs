//! Merge configuration.
//!
//! Values are layered with `figment`: defaults < `.mockli.toml` (or the file
//! named by `MOCKLI_CONFIG_PATH`) < `MOCKLI_*` environment variables.

use std::env;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{MockError, environment};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "MOCKLI_CONFIG_PATH";

/// Configuration file consulted when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = ".mockli.toml";

const ENV_PREFIX: &str = "MOCKLI_";

/// What to do when two merged blueprints define the same operation name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later definition replaces the earlier one without complaint.
    #[default]
    LastWriteWins,
    /// The merge fails with [`MockError::Collision`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub collision_policy: CollisionPolicy,
}

impl MergeConfig {
    /// Load configuration from the file and environment.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Config`] when the file is malformed or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, MockError> {
        environment::with_lock(|| Self::figment().extract::<Self>()).map_err(MockError::from)
    }

    /// The provider stack behind [`MergeConfig::load`].
    ///
    /// Reads the process environment directly; [`MergeConfig::load`] holds
    /// the environment lock while this runs.
    #[must_use]
    pub fn figment() -> Figment {
        let path = env::var_os(CONFIG_PATH_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]))
    }
}
