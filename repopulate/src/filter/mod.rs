//! Query filters for selecting documents.
//!
//! Filters are built with the fluent API and combined with logical
//! operators:
//! - `field("age").gt(30)` - comparison operators
//! - `field("title").eq("Buy milk")` - equality checks
//! - `all()` - match every document
//! - `by_id(id)` - match by document id
//! - `field("a").eq(1).and(field("b").ne(2))` - logical combination
//!
//! ```rust,ignore
//! use repopulate::filter::{field, all};
//!
//! let filter = field("done").eq(false).and(field("title").regex("^Buy"));
//! let todos = repository.get(filter, None, None, None, None).await?;
//! ```
//!
//! An equality [crate::collection::Document] converts into a filter that
//! matches on every one of its fields.
//!
//! # Supported Operators
//!
//! - **Equality**: `eq`, `ne`
//! - **Comparison**: `gt`, `gte`, `lt`, `lte`
//! - **Pattern**: `regex`
//! - **Array**: `in_array`, `not_in_array`
//! - **Presence**: `exists`
//! - **Logical**: `and`, `or`, `not`
//! - **Special**: `all` (match all), `by_id` (match by id)

mod basic_filters;
mod filter;
mod fluent;
mod logical_filters;
mod pattern_filters;

pub use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub use logical_filters::*;
pub use pattern_filters::*;
