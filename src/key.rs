//! Entry keys.
//!
//! A key is stored twice: typed inside the entry (`{"id": 123}`) and as the
//! string form under which the entry lives in its section (`"123"`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::MockError;

/// Identifier of an entry within a section.
///
/// Numbers keep their JSON type in the key field. Their section key is the
/// shortest decimal form, so `1.5` lives under `"1.5"` and `2.0` under `"2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MockKey {
    Number(Number),
    Text(String),
}

impl MockKey {
    /// The key as it appears inside the entry's key field.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }

    /// The key under which the entry is stored in its section.
    #[must_use]
    pub fn section_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `f64` display drops a zero fraction; `Number` display keeps it.
            Self::Number(n) => match n.as_f64() {
                Some(float) if n.is_f64() => write!(f, "{float}"),
                _ => write!(f, "{n}"),
            },
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MockKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for MockKey {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for MockKey {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for MockKey {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for MockKey {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for MockKey {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for MockKey {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl TryFrom<&Value> for MockKey {
    type Error = MockError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => Ok(Self::Number(n.clone())),
            other => Err(MockError::InvalidKey {
                found: other.to_string().into(),
            }),
        }
    }
}
