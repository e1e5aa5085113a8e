use std::any::Any;
use std::fmt::Display;

use regex::Regex;

use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, PopulateError, PopulateResult};

use super::FilterProvider;

/// Matches string fields (or string elements of array fields) against a
/// regular expression.
pub(crate) struct RegexFilter {
    field_name: String,
    field_value: String,
    pattern: Option<Regex>,
}

impl RegexFilter {
    /// An invalid pattern does not fail here; applying the filter does.
    pub(crate) fn new(field_name: String, field_value: String) -> Self {
        let pattern = match Regex::new(&field_value) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::error!("Invalid regex pattern '{}': {}", field_value, e);
                None
            }
        };

        RegexFilter {
            field_name,
            field_value,
            pattern,
        }
    }
}

impl Display for RegexFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} =~ {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for RegexFilter {
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        let pattern = self.pattern.as_ref().ok_or_else(|| {
            log::error!("Invalid regex pattern '{}'", self.field_value);
            PopulateError::new(
                &format!("Invalid regex pattern '{}'", self.field_value),
                ErrorKind::FilterError,
            )
        })?;

        let matched = match entry.get(&self.field_name) {
            Value::String(value) => pattern.is_match(&value),
            Value::Array(values) => values
                .iter()
                .filter_map(Value::as_string)
                .any(|it| pattern.is_match(it)),
            _ => false,
        };
        Ok(matched)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
