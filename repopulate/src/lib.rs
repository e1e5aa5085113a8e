//! # Repopulate - Typed repositories with declarative population
//!
//! Repopulate layers generic repositories over a document store and lets
//! callers describe, in one nested projection, both which fields of an entity
//! to return and which relations to resolve, to any depth.
//!
//! ## Key Features
//!
//! - **Projection DSL**: flat projections, one-level populated projections
//!   and recursive projections, built with macros or parsed from JSON
//! - **Query Builders**: compile a projection into a root selection plus a
//!   population plan, one level deep or recursively
//! - **Repositories**: CRUD with consistent not-found semantics, populated
//!   reads and updates, and routing by entity type tag
//! - **In-Memory Store**: a reference store resolving population plans
//!   against declared relation fields
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repopulate::recursive_projection;
//! use repopulate::repository::{RecursivePopulateRepository, RepositoryMetadata};
//! use repopulate::store::{InMemoryStore, InMemoryStoreConfig, ModelSchema};
//!
//! let store = InMemoryStore::new(InMemoryStoreConfig::new());
//! store.register(ModelSchema::new("User").reference("todos", "Todo"))?;
//! store.register(ModelSchema::new("Todo").reference("comments", "Comment"))?;
//! store.register(ModelSchema::new("Comment").reference("author", "User"))?;
//!
//! let users = RecursivePopulateRepository::recursive(
//!     RepositoryMetadata::builder("User")
//!         .model(store.model("User")?)
//!         .entity_type("USER")
//!         .build(),
//! );
//!
//! let user = users
//!     .get_populated_by_id(Some(&id), Some(&recursive_projection! {
//!         firstName: true,
//!         todos: { title: true, comments: { text: true, author: "email" } }
//!     }))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [projection]: the projection and population DSL
//! - [builder]: query builders
//! - [query]: query descriptions and the store seam ([query::ModelProvider])
//! - [repository]: base, populate and mixin repositories
//! - [store]: the in-memory reference store
//! - [collection], [filter], [common]: documents, filters and shared types
//! - [errors]: the error type

pub mod builder;
pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod projection;
pub mod query;
pub mod repository;
pub mod store;
