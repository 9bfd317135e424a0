//! The chainable accumulator.
//!
//! [`MockBuilder`] is the read side every accumulator shares: it hands out
//! the data it holds. [`MockExtension`] is the write side extensions build
//! their `with_*` methods on. The base [`Mockli`] only implements the read
//! side, so a bare accumulator can do nothing but build. Every chained
//! method consumes the builder and hands it back, so a whole fixture reads
//! as one expression:
//!
//! ```
//! use mockli::{MockBuilder, MockData, MockExtension, Partial};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct UserMock {
//!     data: MockData,
//! }
//!
//! impl MockBuilder for UserMock {
//!     fn data(&self) -> &MockData {
//!         &self.data
//!     }
//! }
//!
//! impl MockExtension for UserMock {
//!     fn data_mut(&mut self) -> &mut MockData {
//!         &mut self.data
//!     }
//! }
//!
//! impl UserMock {
//!     fn with_user(self, id: &str) -> Self {
//!         self.with_entry("users", "id", id, Partial::none())
//!     }
//! }
//!
//! let data = UserMock::default().with_user("123").build();
//! assert_eq!(data, json!({"users": {"123": {"id": "123"}}}));
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Blueprint, MergeConfig, MergedMock, MockData, MockError, MockKey, Partial};

/// Read access to an accumulated [`MockData`].
pub trait MockBuilder {
    fn data(&self) -> &MockData;

    /// Snapshot of the data accumulated so far.
    ///
    /// Building does not reset anything; later mutations show up in the next
    /// snapshot.
    fn build(&self) -> MockData {
        self.data().clone()
    }

    /// Deserialise the snapshot into a typed fixture.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Shape`] when the data does not fit `T`.
    fn build_as<T: DeserializeOwned>(&self) -> Result<T, MockError> {
        self.data().deserialize()
    }
}

/// Write access for extension builders, plus the entry convention their
/// `with_*` methods delegate to.
pub trait MockExtension: MockBuilder + Sized {
    fn data_mut(&mut self) -> &mut MockData;

    /// Write `{ key_field: key, ...partial }` under `key` in `section`.
    #[must_use]
    fn with_entry(
        self,
        section: &str,
        key_field: &str,
        key: impl Into<MockKey>,
        partial: impl Into<Partial>,
    ) -> Self {
        self.with_entry_defaults(section, key_field, key, |_| Partial::none(), partial)
    }

    /// Like [`MockExtension::with_entry`], spreading key-derived defaults
    /// between the key field and the partial.
    #[must_use]
    fn with_entry_defaults(
        mut self,
        section: &str,
        key_field: &str,
        key: impl Into<MockKey>,
        defaults: impl FnOnce(&MockKey) -> Partial,
        partial: impl Into<Partial>,
    ) -> Self {
        let key = key.into();
        let defaults = defaults(&key);
        self.data_mut()
            .upsert_entry(section, key_field, &key, defaults, partial.into());
        self
    }

    /// Set a top-level field directly.
    #[must_use]
    fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data_mut().insert(field, value);
        self
    }
}

/// The base accumulator: an empty mapping and nothing else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mockli {
    data: MockData,
}

impl Mockli {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `blueprints` into one accumulator exposing all their operations.
    ///
    /// Later blueprints silently replace same-named operations from earlier
    /// ones. Use [`Mockli::merge_all_with`] to reject such collisions.
    #[must_use]
    pub fn merge_all<I>(blueprints: I) -> MergedMock
    where
        I: IntoIterator<Item = Blueprint>,
    {
        blueprints
            .into_iter()
            .fold(MergedMock::new(), MergedMock::absorb)
    }

    /// Fold `blueprints` honouring the collision policy in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Collision`] on the first duplicate operation name
    /// when the policy is [`crate::CollisionPolicy::Reject`].
    pub fn merge_all_with<I>(blueprints: I, config: &MergeConfig) -> Result<MergedMock, MockError>
    where
        I: IntoIterator<Item = Blueprint>,
    {
        blueprints
            .into_iter()
            .try_fold(MergedMock::new(), |merged, blueprint| {
                merged.try_absorb(blueprint, config.collision_policy)
            })
    }

    #[must_use]
    pub fn into_data(self) -> MockData {
        self.data
    }
}

impl MockBuilder for Mockli {
    fn data(&self) -> &MockData {
        &self.data
    }
}
