//! Documents, identifiers and the option types attached to store queries.
//!
//! A `Document` is an ordered key-value map where keys are strings and values
//! are `Value`s. Nested fields are addressed with a `.` separated path.
//!
//! ```rust,ignore
//! use repopulate::collection::Document;
//!
//! let mut doc = Document::new();
//! doc.put("firstName", "Alice")?;
//! doc.put("address.city", "Paris")?;
//! ```
//!
//! # Document IDs
//!
//! Every stored document carries an `_id` field holding an [EntityId]. The
//! store generates one on insert when the field is missing.

mod document;
mod entity_id;
mod find_options;
mod update;
mod write_result;

pub use document::*;
pub use entity_id::*;
pub use find_options::*;
pub use update::*;
pub use write_result::*;
