//! Typed access to stored entities.
//!
//! - [Repository] offers CRUD over one entity type, described by its
//!   [RepositoryMetadata].
//! - [PopulateRepository] layers population-aware reads and updates on a
//!   [Repository], compiling projections with an injected
//!   [crate::builder::QueryBuilder].
//! - [MixinRepository] dispatches to one of several repositories by entity
//!   type tag.
//!
//! ```rust,ignore
//! use repopulate::repository::{RecursivePopulateRepository, RepositoryMetadata};
//!
//! let todos = RecursivePopulateRepository::recursive(
//!     RepositoryMetadata::builder("Todo")
//!         .model(store.model("Todo")?)
//!         .entity_type("TODO")
//!         .build(),
//! );
//!
//! let todo = todos
//!     .get_populated_by_id(Some(&id), Some(&recursive_projection! {
//!         title: true,
//!         comments: { text: true, author: "firstName" }
//!     }))
//!     .await?;
//! ```

mod metadata;
mod mixin_repository;
mod populate_repository;
mod repository;

pub use metadata::*;
pub use mixin_repository::*;
pub use populate_repository::*;
pub use repository::*;
