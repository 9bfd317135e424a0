//! Partial field sets spread into entries.
//!
//! Conversions from arbitrary JSON follow object-spread rules: objects
//! contribute their fields, arrays and strings their indices, and every
//! other value contributes nothing.

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::MockError;

/// Fields layered over an entry after its key field and defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partial(Map<String, Value>);

impl Partial {
    /// A partial contributing no fields.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Spread the serialised form of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Serialize`] when `value` cannot be represented as
    /// JSON.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, MockError> {
        serde_json::to_value(value)
            .map(Self::from)
            .map_err(MockError::Serialize)
    }

    /// Add or replace a single field.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Partial {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Value> for Partial {
    fn from(value: Value) -> Self {
        Self(spread(value))
    }
}

impl From<Option<Value>> for Partial {
    fn from(value: Option<Value>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

/// Expand `value` into the fields it contributes when spread into an object.
pub(crate) fn spread(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(i, c)| (i.to_string(), Value::from(c.to_string())))
            .collect(),
        Value::Null => Map::new(),
        scalar @ (Value::Bool(_) | Value::Number(_)) => {
            warn!("spreading scalar {scalar} contributes no fields");
            Map::new()
        }
    }
}
