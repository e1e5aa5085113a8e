use serde_json::{Map, Value as Json};

use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::projection::{
    FieldDirective, Flag, PopulateProjection, PopulatedProjection, Projection, RecursiveProjection,
};

fn is_truthy(json: &Json) -> bool {
    match json {
        Json::Null => false,
        Json::Bool(value) => *value,
        Json::Number(number) => number.as_f64().map(|it| it != 0.0 && !it.is_nan()).unwrap_or(false),
        Json::String(value) => !value.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// Reads a flag; anything but a boolean or a whole number becomes a
/// boolean flag of its truthiness.
fn to_flag(json: &Json) -> Flag {
    match json {
        Json::Bool(value) => Flag::Bool(*value),
        Json::Number(number) => match number.as_i64() {
            Some(value) => Flag::Number(value),
            None => match number.as_f64() {
                Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                    Flag::Number(value as i64)
                }
                _ => Flag::Bool(is_truthy(json)),
            },
        },
        other => Flag::Bool(is_truthy(other)),
    }
}

fn expect_object<'a>(json: &'a Json, what: &str) -> PopulateResult<Option<&'a Map<String, Json>>> {
    match json {
        Json::Null => Ok(None),
        Json::Object(map) => Ok(Some(map)),
        other => {
            log::error!("Expected a JSON object or null for {}, found {}", what, other);
            Err(PopulateError::new(
                &format!("Expected a JSON object or null for {}, found {}", what, other),
                ErrorKind::InvalidDataType,
            ))
        }
    }
}

fn flat_from_map(map: &Map<String, Json>) -> Projection {
    map.iter().map(|(key, value)| (key.as_str(), to_flag(value))).collect()
}

fn populate_from_map<N>(
    map: &Map<String, Json>,
    nested: impl Fn(&Map<String, Json>) -> PopulateResult<N>,
) -> PopulateResult<PopulateProjection<N>> {
    let mut projection = PopulateProjection::new();
    for (key, value) in map {
        let directive = match value {
            Json::Null => FieldDirective::Populate,
            Json::String(text) => FieldDirective::Select(text.clone()),
            Json::Object(inner) => FieldDirective::Nested(nested(inner)?),
            Json::Bool(_) | Json::Number(_) => FieldDirective::Include(to_flag(value)),
            Json::Array(_) => {
                log::error!("Projection key {} has unsupported value {}", key, value);
                return Err(PopulateError::new(
                    &format!("Projection key {} has unsupported value {}", key, value),
                    ErrorKind::InvalidDataType,
                ));
            }
        };
        projection.insert(key, directive);
    }
    Ok(projection)
}

fn recursive_from_map(map: &Map<String, Json>) -> PopulateResult<RecursiveProjection> {
    let inner = populate_from_map(map, recursive_from_map)?;
    let mut projection = RecursiveProjection::new();
    *projection = inner;
    Ok(projection)
}

impl Projection {
    /// Parses a flat projection; `null` is no projection.
    pub fn from_json(json: &Json) -> PopulateResult<Option<Projection>> {
        Ok(expect_object(json, "projection")?.map(flat_from_map))
    }
}

impl PopulatedProjection {
    /// Parses a populated projection; `null` is no projection.
    pub fn from_json(json: &Json) -> PopulateResult<Option<PopulatedProjection>> {
        match expect_object(json, "populated projection")? {
            Some(map) => Ok(Some(populate_from_map(map, |inner| Ok(flat_from_map(inner)))?)),
            None => Ok(None),
        }
    }
}

impl RecursiveProjection {
    /// Parses a recursive projection; `null` is no projection.
    pub fn from_json(json: &Json) -> PopulateResult<Option<RecursiveProjection>> {
        match expect_object(json, "recursive projection")? {
            Some(map) => Ok(Some(recursive_from_map(map)?)),
            None => Ok(None),
        }
    }
}
