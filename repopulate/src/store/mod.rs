//! Stores that execute [crate::query::Query] descriptions.
//!
//! The repositories only talk to a store through
//! [crate::query::ModelProvider]. [InMemoryStore] is the reference
//! implementation: it keeps documents in memory and resolves population
//! plans against the relation fields declared in each [ModelSchema].

mod memory;
mod schema;

pub use memory::*;
pub use schema::*;
