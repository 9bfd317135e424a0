//! Error type for the fallible edges of the mock builders.
//!
//! Building entries never fails. Errors only surface when dispatching
//! operations by name, extracting typed snapshots, merging under a strict
//! collision policy, or loading configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockError {
    #[error("no operation named '{name}' is registered")]
    UnknownOperation { name: Box<str> },
    #[error("operation '{operation}' expects an argument at position {position}")]
    MissingArgument {
        operation: Box<str>,
        position: usize,
    },
    #[error("entry keys must be strings or numbers, found {found}")]
    InvalidKey { found: Box<str> },
    #[error("failed to serialise partial value: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("mock data does not match the requested shape at '{path}': {source}")]
    Shape {
        path: Box<str>,
        #[source]
        source: serde_json::Error,
    },
    #[error("operation '{operation}' from '{incoming}' collides with the one from '{existing}'")]
    Collision {
        operation: Box<str>,
        existing: Box<str>,
        incoming: Box<str>,
    },
    #[error("configuration error: {0}")]
    Config(#[source] Box<figment::Error>),
}

impl From<figment::Error> for MockError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::MockError;

    #[test]
    fn unknown_operation_names_the_operation() {
        let err = MockError::UnknownOperation {
            name: "with_user".into(),
        };
        assert_eq!(
            err.to_string(),
            "no operation named 'with_user' is registered"
        );
    }

    #[test]
    fn collision_names_both_origins() {
        let err = MockError::Collision {
            operation: "with_item".into(),
            existing: "CartMock".into(),
            incoming: "OrderMock".into(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'with_item' from 'OrderMock' collides with the one from 'CartMock'"
        );
    }
}
