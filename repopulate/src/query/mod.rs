//! Query descriptions and the store executor seam.
//!
//! Builders and repositories never talk to storage directly. They describe
//! what to run as a [Query] (operation, root field selection, population
//! plan) and hand it to a [Model], the per-entity handle of a store.

mod model;
mod populate_options;
mod query;

pub use model::*;
pub use populate_options::*;
pub use query::*;
