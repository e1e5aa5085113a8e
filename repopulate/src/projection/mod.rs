//! The projection and population DSL.
//!
//! A [Projection] is a flat field-to-flag map selecting the fields of one
//! entity. A [PopulatedProjection] additionally names relation fields to
//! populate one level deep, and a [RecursiveProjection] does the same at
//! any depth.
//!
//! Every key of a populated or recursive projection carries one
//! [FieldDirective]:
//!
//! | directive | meaning |
//! | --- | --- |
//! | `Include(flag)` | ordinary field selection |
//! | `Populate` | populate the relation without restricting its fields |
//! | `Select(text)` | populate the relation with a raw selection string |
//! | `Nested(projection)` | populate the relation restricted by a projection |
//!
//! The reserved key `__all` set to a truthy flag keeps every non-relation
//! field of the entity.
//!
//! ```rust,ignore
//! use repopulate::recursive_projection;
//!
//! let projection = recursive_projection! {
//!     __all: true,
//!     todos: {
//!         title: true,
//!         comments: { text: true, author: "firstName" }
//!     }
//! };
//! ```
//!
//! Projections can also be parsed from untyped JSON with `from_json`, where
//! `null` means `Populate`, a string `Select`, an object `Nested` and a
//! boolean or number `Include`.

mod json;
mod populate_projection;
mod projection;

pub use populate_projection::*;
pub use projection::*;
