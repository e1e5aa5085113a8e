use crate::collection::FindOptions;
use crate::common::SortSpec;

/// A paging parameter as received from a caller.
///
/// Paging values often arrive untyped (query strings), so both native
/// numbers and string-like values are accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum PageParam {
    /// A native number, passed through unchanged.
    Number(i64),
    /// A single string value, e.g. `?limit=20`.
    Text(String),
    /// A repeated string value, e.g. `?limit=20&limit=30`.
    List(Vec<String>),
}

impl From<i64> for PageParam {
    fn from(value: i64) -> Self {
        PageParam::Number(value)
    }
}

impl From<i32> for PageParam {
    fn from(value: i32) -> Self {
        PageParam::Number(value as i64)
    }
}

impl From<u32> for PageParam {
    fn from(value: u32) -> Self {
        PageParam::Number(value as i64)
    }
}

impl From<&str> for PageParam {
    fn from(value: &str) -> Self {
        PageParam::Text(value.to_string())
    }
}

impl From<String> for PageParam {
    fn from(value: String) -> Self {
        PageParam::Text(value)
    }
}

impl From<Vec<String>> for PageParam {
    fn from(value: Vec<String>) -> Self {
        PageParam::List(value)
    }
}

impl PageParam {
    /// Resolves the parameter to a number, or `None` when it is not numeric.
    ///
    /// Text is trimmed; an empty string is `0`; decimal, exponent and `0x`
    /// hexadecimal notations are accepted and fractions truncate toward zero.
    /// A list resolves as its comma-joined text, so only a one-element list
    /// can be numeric.
    pub fn resolve(&self) -> Option<i64> {
        match self {
            PageParam::Number(value) => Some(*value),
            PageParam::Text(text) => parse_numeric(text),
            PageParam::List(values) => parse_numeric(&values.join(",")),
        }
    }
}

fn parse_numeric(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }

    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }

    // f64 parsing accepts "inf" and "nan" spellings; those are not numbers here
    if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        log::debug!("Paging parameter {:?} is not numeric", text);
        return None;
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.trunc() as i64),
        _ => {
            log::debug!("Paging parameter {:?} is not numeric", text);
            None
        }
    }
}

/// Converts raw paging parameters into [FindOptions].
///
/// Non-numeric `limit`/`skip` values resolve to "unspecified"; `sort` passes
/// through unchanged.
pub fn parse_query_params(
    limit: Option<PageParam>,
    skip: Option<PageParam>,
    sort: Option<SortSpec>,
) -> FindOptions {
    FindOptions {
        limit: limit.as_ref().and_then(PageParam::resolve),
        skip: skip.as_ref().and_then(PageParam::resolve),
        sort,
    }
}
