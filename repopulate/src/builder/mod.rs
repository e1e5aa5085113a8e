//! Query builders: turn one declarative projection into a root query and a
//! population plan.
//!
//! Both builders split the projection the same way (see [parse_basic_projection]
//! and [parse_populate_projection]) and differ only in how each relation is
//! attached to the query:
//!
//! - [PartialQueryBuilder] populates one level, with inclusion/exclusion
//!   selection strings.
//! - [RecursiveQueryBuilder] populates at any depth, with inclusion-only
//!   selection strings.

mod base;
mod partial;
mod recursive;

pub use base::*;
pub use partial::*;
pub use recursive::*;

use crate::projection::Projection;
use crate::query::Query;

/// A strategy compiling a projection into a [Query].
pub trait QueryBuilder: Send + Sync {
    /// The projection type this builder accepts.
    type Projection: Send + Sync;

    /// Creates the root query with `query_creator` (given the root field
    /// selection) and attaches the population plan derived from `projection`.
    fn build<C>(&self, query_creator: C, projection: Option<&Self::Projection>) -> Query
    where
        C: FnOnce(Option<Projection>) -> Query;
}
