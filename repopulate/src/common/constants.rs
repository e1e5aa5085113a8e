// doc constants
pub const DOC_ID: &str = "_id";

// projection constants
pub const ALL_FIELDS_KEY: &str = "__all";
pub const EXCLUDE_PREFIX: &str = "-";
pub const INCLUDE_PREFIX: &str = "+";
pub const SELECTION_SEPARATOR: &str = " ";

// field path constants
pub const FIELD_SEPARATOR: &str = ".";
