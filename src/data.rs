//! The accumulated mock data mapping.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::partial::spread;
use crate::{MockError, MockKey, Partial};

/// Mapping from section names to arbitrary JSON values.
///
/// Sections written through the entry convention hold objects keyed by the
/// string form of each entry's key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockData(Map<String, Value>);

impl MockData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The object stored under `section`, if any.
    #[must_use]
    pub fn section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.0.get(section).and_then(Value::as_object)
    }

    /// The entry stored under `key` in `section`.
    #[must_use]
    pub fn entry(&self, section: &str, key: impl Into<MockKey>) -> Option<&Value> {
        self.section(section)
            .and_then(|entries| entries.get(&key.into().section_key()))
    }

    /// Set a top-level field, returning the value it replaced.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Write `{ key_field: key, ...defaults, ...partial }` under `key` in
    /// `section`.
    ///
    /// Other entries in the section are preserved. An existing entry under
    /// the same key is replaced wholesale. A section currently holding a
    /// non-object value is spread into an object first.
    pub fn upsert_entry(
        &mut self,
        section: &str,
        key_field: &str,
        key: &MockKey,
        defaults: Partial,
        partial: Partial,
    ) {
        let mut entry = Map::new();
        entry.insert(key_field.to_owned(), key.to_value());
        entry.extend(defaults.into_fields());
        entry.extend(partial.into_fields());

        let mut entries = match self.0.remove(section) {
            Some(Value::Object(entries)) => entries,
            Some(other) => spread(other),
            None => Map::new(),
        };
        if entries
            .insert(key.section_key(), Value::Object(entry))
            .is_some()
        {
            debug!("replaced entry '{key}' in section '{section}'");
        }
        self.0.insert(section.to_owned(), Value::Object(entries));
    }

    /// Deserialise a copy of the data into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Shape`] naming the path of the first field that
    /// does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, MockError> {
        serde_path_to_error::deserialize::<_, T>(Value::Object(self.0.clone())).map_err(|e| {
            let path = e.path().to_string();
            MockError::Shape {
                path: path.into(),
                source: e.into_inner(),
            }
        })
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for MockData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<MockData> for Value {
    fn from(data: MockData) -> Self {
        Self::Object(data.0)
    }
}

impl PartialEq<Value> for MockData {
    fn eq(&self, other: &Value) -> bool {
        other.as_object().is_some_and(|map| *map == self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::MockData;
    use crate::{MockError, MockKey, Partial};
    use rstest::{fixture, rstest};
    use serde::Deserialize;
    use serde_json::json;

    #[fixture]
    fn data() -> MockData {
        MockData::new()
    }

    #[rstest]
    fn upsert_creates_section(mut data: MockData) {
        data.upsert_entry(
            "users",
            "id",
            &MockKey::from("123"),
            Partial::none(),
            Partial::none(),
        );
        assert_eq!(data, json!({"users": {"123": {"id": "123"}}}));
    }

    #[rstest]
    fn partial_overrides_defaults_and_key_field(mut data: MockData) {
        data.upsert_entry(
            "users",
            "id",
            &MockKey::from(1),
            Partial::from(json!({"name": "User 1", "role": "viewer"})),
            Partial::from(json!({"id": "custom", "role": "admin"})),
        );
        assert_eq!(
            data.entry("users", 1),
            Some(&json!({"id": "custom", "name": "User 1", "role": "admin"}))
        );
    }

    #[rstest]
    fn non_object_section_is_spread(mut data: MockData) {
        data.insert("tags", json!(["x"]));
        data.upsert_entry(
            "tags",
            "id",
            &MockKey::from("a"),
            Partial::none(),
            Partial::none(),
        );
        assert_eq!(data, json!({"tags": {"0": "x", "a": {"id": "a"}}}));
    }

    #[derive(Debug, Deserialize)]
    struct Fixture {
        #[expect(dead_code, reason = "only the failing field matters")]
        users: std::collections::BTreeMap<String, User>,
    }

    #[derive(Debug, Deserialize)]
    struct User {
        #[expect(dead_code, reason = "only the failing field matters")]
        id: u32,
    }

    #[rstest]
    fn deserialize_reports_path(mut data: MockData) {
        data.insert("users", json!({"7": {"id": "seven"}}));
        let err = data
            .deserialize::<Fixture>()
            .expect_err("id is not numeric");
        match err {
            MockError::Shape { path, .. } => assert_eq!(&*path, "users.7.id"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
