//! Domain extensions.
//!
//! An extension exists in two forms. The static form is a builder type of
//! its own whose `with_*` methods chain on [`crate::MockExtension`]. The
//! runtime form is a [`Blueprint`]: a named, ordered set of operations that
//! [`crate::Mockli::merge_all`] can fold into one [`crate::MergedMock`].
//! [`mock_extension!`](crate::mock_extension) generates both from one
//! declaration.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{MockData, MockError, MockKey, Partial};

/// A named mutation over the shared mock data.
///
/// Receives the positional arguments passed to
/// [`crate::MergedMock::call`].
pub type Mutator = Arc<dyn Fn(&mut MockData, &[Value]) -> Result<(), MockError> + Send + Sync>;

#[derive(Clone)]
pub(crate) struct Operation {
    pub(crate) name: Box<str>,
    pub(crate) mutator: Mutator,
}

/// Runtime description of an extension's operations.
#[derive(Clone)]
pub struct Blueprint {
    name: Box<str>,
    operations: Vec<Operation>,
}

impl Blueprint {
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an arbitrary operation.
    ///
    /// Re-registering a name within one blueprint replaces the earlier
    /// operation in place.
    #[must_use]
    pub fn mutator<F>(mut self, name: impl Into<Box<str>>, mutator: F) -> Self
    where
        F: Fn(&mut MockData, &[Value]) -> Result<(), MockError> + Send + Sync + 'static,
    {
        let operation = Operation {
            name: name.into(),
            mutator: Arc::new(mutator),
        };
        match self.operations.iter_mut().find(|op| op.name == operation.name) {
            Some(existing) => *existing = operation,
            None => self.operations.push(operation),
        }
        self
    }

    /// Register an entry operation taking `(key, partial?)`.
    #[must_use]
    pub fn entry(self, name: impl Into<Box<str>>, section: &str, key_field: &str) -> Self {
        self.entry_with_defaults(name, section, key_field, |_| Partial::none())
    }

    /// Register an entry operation whose entries start from key-derived
    /// defaults.
    #[must_use]
    pub fn entry_with_defaults<D>(
        self,
        name: impl Into<Box<str>>,
        section: &str,
        key_field: &str,
        defaults: D,
    ) -> Self
    where
        D: Fn(&MockKey) -> Partial + Send + Sync + 'static,
    {
        let name = name.into();
        let operation = name.clone();
        let section = section.to_owned();
        let key_field = key_field.to_owned();
        self.mutator(name, move |data, args| {
            let key = args.first().ok_or_else(|| MockError::MissingArgument {
                operation: operation.clone(),
                position: 0,
            })?;
            let key = MockKey::try_from(key)?;
            let partial = Partial::from(args.get(1).cloned());
            data.upsert_entry(&section, &key_field, &key, defaults(&key), partial);
            Ok(())
        })
    }

    /// Operation names in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|op| &*op.name)
    }

    pub(crate) fn into_operations(self) -> (Box<str>, Vec<Operation>) {
        (self.name, self.operations)
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.name)
            .field("operations", &self.operations().collect::<Vec<_>>())
            .finish()
    }
}

/// Declare a domain extension.
///
/// Generates a builder struct whose inherent methods follow the entry
/// convention, and an associated `blueprint()` returning the equivalent
/// [`Blueprint`] for merging. Only the declared methods are added; other
/// extensions' methods are reachable through merging alone.
///
/// ```
/// use mockli::{MockBuilder, MockKey, Mockli, Partial, mock_extension};
/// use serde_json::json;
///
/// mock_extension! {
///     /// Users keyed by id.
///     pub struct UserMock {
///         fn with_user => "users" keyed "id",
///             defaults |key: &MockKey| Partial::none().with("name", format!("User {key}"));
///     }
/// }
///
/// let data = UserMock::new().with_user(7, json!({"admin": true})).build();
/// assert_eq!(
///     data,
///     json!({"users": {"7": {"id": 7, "name": "User 7", "admin": true}}})
/// );
///
/// let mut merged = Mockli::merge_all([UserMock::blueprint()]);
/// merged.call("with_user", &[json!(8)]).expect("registered");
/// assert_eq!(merged.build(), json!({"users": {"8": {"id": 8, "name": "User 8"}}}));
/// ```
#[macro_export]
macro_rules! mock_extension {
    (@defaults) => {
        |_: &$crate::MockKey| $crate::Partial::none()
    };
    (@defaults $defaults:expr) => {
        $defaults
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$method_meta:meta])*
                fn $method:ident => $section:literal keyed $key_field:literal
                    $(, defaults $defaults:expr)?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            data: $crate::MockData,
        }

        impl $name {
            #[must_use]
            $vis fn new() -> Self {
                Self::default()
            }

            $(
                $(#[$method_meta])*
                #[must_use]
                $vis fn $method(
                    self,
                    key: impl ::core::convert::Into<$crate::MockKey>,
                    partial: impl ::core::convert::Into<$crate::Partial>,
                ) -> Self {
                    $crate::MockExtension::with_entry_defaults(
                        self,
                        $section,
                        $key_field,
                        key,
                        $crate::mock_extension!(@defaults $($defaults)?),
                        partial,
                    )
                }
            )*

            #[doc = concat!("Runtime blueprint of [`", stringify!($name), "`].")]
            #[must_use]
            $vis fn blueprint() -> $crate::Blueprint {
                $crate::Blueprint::new(stringify!($name))
                    $(
                        .entry_with_defaults(
                            stringify!($method),
                            $section,
                            $key_field,
                            $crate::mock_extension!(@defaults $($defaults)?),
                        )
                    )*
            }

            #[must_use]
            $vis fn into_data(self) -> $crate::MockData {
                self.data
            }
        }

        impl $crate::MockBuilder for $name {
            fn data(&self) -> &$crate::MockData {
                &self.data
            }
        }

        impl $crate::MockExtension for $name {
            fn data_mut(&mut self) -> &mut $crate::MockData {
                &mut self.data
            }
        }
    };
}
