//! Common types, constants and helpers shared across the crate.

mod constants;
mod parsers;
mod sort_order;
mod type_utils;
mod value;

pub use constants::*;
pub use parsers::*;
pub use sort_order::*;
pub use type_utils::*;
pub use value::*;
