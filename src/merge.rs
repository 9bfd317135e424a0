//! Merged accumulators.
//!
//! A [`MergedMock`] owns one [`MockData`] and a registry of operations
//! copied from blueprints. Registration is last-write-wins: a later
//! blueprint defining an existing name replaces the earlier operation and
//! the replaced one is unreachable. Each replacement is recorded as a
//! [`Collision`] but not reported unless the merge runs under
//! [`CollisionPolicy::Reject`].

use std::fmt;

use log::{debug, trace};
use serde_json::Value;

use crate::config::CollisionPolicy;
use crate::extension::Operation;
use crate::{Blueprint, MockBuilder, MockData, MockError};

/// A registered operation together with the blueprint it came from.
#[derive(Clone)]
struct Registered {
    origin: Box<str>,
    operation: Operation,
}

/// An operation name defined by more than one merged blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub operation: Box<str>,
    /// Blueprint whose definition was replaced.
    pub replaced: Box<str>,
    /// Blueprint whose definition now answers to the name.
    pub winner: Box<str>,
}

/// Accumulator exposing the union of several blueprints' operations.
#[derive(Clone, Default)]
pub struct MergedMock {
    data: MockData,
    registry: Vec<Registered>,
    collisions: Vec<Collision>,
}

impl MergedMock {
    /// An accumulator with no operations; only building is available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every operation of `blueprint` onto this accumulator,
    /// replacing same-named ones.
    #[must_use]
    pub fn absorb(mut self, blueprint: Blueprint) -> Self {
        let (origin, operations) = blueprint.into_operations();
        for operation in operations {
            self.register(&origin, operation);
        }
        self
    }

    /// Like [`MergedMock::absorb`], but under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Collision`] when `policy` is
    /// [`CollisionPolicy::Reject`] and `blueprint` defines a name that is
    /// already registered. Nothing from `blueprint` is registered then.
    pub fn try_absorb(
        self,
        blueprint: Blueprint,
        policy: CollisionPolicy,
    ) -> Result<Self, MockError> {
        if policy == CollisionPolicy::Reject {
            if let Some(existing) = blueprint
                .operations()
                .find_map(|name| self.lookup(name))
            {
                return Err(MockError::Collision {
                    operation: existing.operation.name.clone(),
                    existing: existing.origin.clone(),
                    incoming: blueprint.name().into(),
                });
            }
        }
        Ok(self.absorb(blueprint))
    }

    fn register(&mut self, origin: &str, operation: Operation) {
        let incoming = Registered {
            origin: origin.into(),
            operation,
        };
        match self
            .registry
            .iter_mut()
            .find(|r| r.operation.name == incoming.operation.name)
        {
            Some(existing) => {
                debug!(
                    "operation '{}' from '{}' replaces the one from '{}'",
                    incoming.operation.name, incoming.origin, existing.origin
                );
                self.collisions.push(Collision {
                    operation: incoming.operation.name.clone(),
                    replaced: existing.origin.clone(),
                    winner: incoming.origin.clone(),
                });
                *existing = incoming;
            }
            None => self.registry.push(incoming),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Registered> {
        self.registry.iter().find(|r| &*r.operation.name == name)
    }

    /// Invoke the operation registered under `operation`.
    ///
    /// Returns the accumulator again so calls chain with `?`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::UnknownOperation`] when no merged blueprint
    /// defines `operation`, or whatever the operation itself reports for
    /// malformed arguments. Data accumulated by earlier calls stays in
    /// place either way.
    pub fn call(&mut self, operation: &str, args: &[Value]) -> Result<&mut Self, MockError> {
        let mutator = self
            .lookup(operation)
            .map(|r| r.operation.mutator.clone())
            .ok_or_else(|| MockError::UnknownOperation {
                name: operation.into(),
            })?;
        trace!("applying '{operation}' with {} argument(s)", args.len());
        mutator(&mut self.data, args)?;
        Ok(self)
    }

    #[must_use]
    pub fn has_operation(&self, operation: &str) -> bool {
        self.lookup(operation).is_some()
    }

    /// Operation names in first-registration order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.registry.iter().map(|r| &*r.operation.name)
    }

    /// Blueprint that currently answers to `operation`.
    #[must_use]
    pub fn origin_of(&self, operation: &str) -> Option<&str> {
        self.lookup(operation).map(|r| &*r.origin)
    }

    /// Every replacement made while merging, oldest first.
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    #[must_use]
    pub fn into_data(self) -> MockData {
        self.data
    }
}

impl MockBuilder for MergedMock {
    fn data(&self) -> &MockData {
        &self.data
    }
}

impl fmt::Debug for MergedMock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedMock")
            .field("data", &self.data)
            .field("operations", &self.operations().collect::<Vec<_>>())
            .field("collisions", &self.collisions)
            .finish()
    }
}
