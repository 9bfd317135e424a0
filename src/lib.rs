//! Composable mock data builders for test suites.
//!
//! A [`Mockli`] accumulates a JSON mapping through chained `with_*` calls
//! and hands it out with [`MockBuilder::build`]. Each domain extension
//! declared with [`mock_extension!`] is its own builder type carrying those
//! calls through [`MockExtension`], and [`Mockli::merge_all`] folds the
//! runtime [`Blueprint`]s of several extensions into one [`MergedMock`]
//! sharing a single mapping. Neither `Mockli` nor `MergedMock` gains
//! `with_*` methods; merged operations are reached through
//! [`MergedMock::call`].
//!
//! Merging is last-write-wins: when two blueprints define the same
//! operation name the later one silently replaces the earlier. Inspect
//! [`MergedMock::collisions`] or merge under [`CollisionPolicy::Reject`]
//! to catch this.

pub mod builder;
pub mod config;
pub mod data;
pub mod environment;
pub mod error;
pub mod extension;
pub mod key;
pub mod merge;
pub mod partial;
pub mod test_utils;

pub use builder::{MockBuilder, MockExtension, Mockli};
pub use config::{CollisionPolicy, MergeConfig};
pub use data::MockData;
pub use error::MockError;
pub use extension::{Blueprint, Mutator};
pub use key::MockKey;
pub use merge::{Collision, MergedMock};
pub use partial::Partial;
