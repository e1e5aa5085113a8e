use im::OrdMap;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::collection::EntityId;
use crate::common::{Value, DOC_ID, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use itertools::Itertools;
use std::fmt::{Debug, Display};

type FieldVec = SmallVec<[String; 8]>;

/// A schemaless record backed by a persistent ordered map.
///
/// Documents are composed of key-value pairs. The key is always a [String]
/// and the value is a [Value]. Nested documents are addressed with a `.`
/// separated path, so the value inside `{"a": {"b": 1}}` can be read with
/// `document.get("a.b")`.
///
/// The `_id` field holds the [EntityId] of a stored document as a string.
///
/// Cloning is O(1): the underlying `im::OrdMap` shares structure between
/// copies and every mutation produces an independent map.
#[derive(Clone, Eq, PartialEq, Default, Ord, PartialOrd)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key.
    ///
    /// Embedded keys such as `"address.city"` create intermediate documents
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key (or one of its segments) is empty, or if
    /// `_id` is set to anything other than a non-empty string.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> PopulateResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(PopulateError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();
        if key == DOC_ID && value.as_entity_id().is_none() {
            log::error!("Document id must be a non-empty string, found {}", value);
            return Err(PopulateError::new(
                &format!("Document id must be a non-empty string, found {}", value),
                ErrorKind::InvalidId,
            ));
        }

        if self.is_embedded(key) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_put(&splits, value)
        } else {
            self.data = self.data.update(key.to_string(), value);
            Ok(())
        }
    }

    /// Returns the value for `key`, or [Value::Null] if there is none.
    ///
    /// Embedded keys traverse nested documents. A numeric segment indexes
    /// into an array; any other segment applied to an array collects the
    /// matching values of every element into a de-duplicated array.
    pub fn get(&self, key: &str) -> Value {
        match self.data.get(key) {
            Some(value) => value.clone(),
            None if self.is_embedded(key) => {
                let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
                recursive_get(self.data.get(splits[0]), &splits[1..])
            }
            None => Value::Null,
        }
    }

    /// Returns the identifier of this document, if it has one.
    pub fn id(&self) -> Option<EntityId> {
        self.data.get(DOC_ID).and_then(Value::as_entity_id)
    }

    /// Sets the identifier of this document.
    pub fn set_id(&mut self, id: &EntityId) {
        self.data = self.data.update(DOC_ID.to_string(), Value::from(id));
    }

    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Retrieves all leaf field paths of this document, `_id` excluded.
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("")
    }

    /// Removes the key and its value. Removing a missing key succeeds.
    pub fn remove(&mut self, key: &str) -> PopulateResult<()> {
        if self.is_embedded(key) {
            let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();
            self.deep_remove(&splits)
        } else {
            self.data = self.data.without(key);
            Ok(())
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Merges `other` into this document; nested documents merge recursively
    /// and every other value from `other` overwrites the existing one.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            match (value, self.data.get(key).cloned()) {
                (Value::Document(obj), Some(Value::Document(mut nested))) => {
                    nested.merge(obj);
                    self.data = self.data.update(key.clone(), Value::Document(nested));
                }
                _ => {
                    self.data = self.data.update(key.clone(), value.clone());
                }
            }
        }
    }

    /// Checks if a top level key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Checks if a top level or embedded field exists in the document.
    pub fn contains_field(&self, field: &str) -> bool {
        if self.contains_key(field) {
            return true;
        }
        self.is_embedded(field) && self.fields().iter().any(|it| it.starts_with(field))
    }

    /// Iterates over the top level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.data
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Builds a document from a JSON object.
    pub fn from_json(json: &serde_json::Value) -> PopulateResult<Document> {
        match json {
            serde_json::Value::Object(map) => {
                let mut document = Document::new();
                for (key, value) in map {
                    // top level keys are taken verbatim, dots included
                    document.data = document.data.update(key.clone(), Value::from_json(value)?);
                }
                Ok(document)
            }
            other => {
                log::error!("Expected a JSON object, found {}", other);
                Err(PopulateError::new(
                    &format!("Expected a JSON object, found {}", other),
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }

    /// Converts this document into a typed entity through `serde`.
    pub fn to_entity<T: DeserializeOwned>(&self) -> PopulateResult<T> {
        let entity = serde_json::from_value(self.to_json())?;
        Ok(entity)
    }

    /// Converts a typed entity into a document through `serde`.
    pub fn from_entity<T: Serialize>(entity: &T) -> PopulateResult<Document> {
        let json = serde_json::to_value(entity)?;
        Document::from_json(&json)
    }

    fn is_embedded(&self, key: &str) -> bool {
        key.contains(FIELD_SEPARATOR)
    }

    fn get_fields_internal(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();

        for (key, value) in self.data.iter() {
            if key == DOC_ID || key.is_empty() {
                continue;
            }

            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };

            if let Value::Document(doc) = value {
                fields.append(&mut doc.get_fields_internal(&field));
            } else {
                fields.push(field);
            }
        }
        fields
    }

    fn deep_put(&mut self, splits: &[&str], value: Value) -> PopulateResult<()> {
        let key = match splits.first() {
            Some(key) if !key.is_empty() => *key,
            _ => {
                log::error!("Document does not support empty key");
                return Err(PopulateError::new(
                    "Document does not support empty key",
                    ErrorKind::InvalidOperation,
                ));
            }
        };

        if splits.len() == 1 {
            self.data = self.data.update(key.to_string(), value);
            return Ok(());
        }

        // a non-document value at an intermediate level is replaced
        let mut nested = match self.data.get(key) {
            Some(Value::Document(obj)) => obj.clone(),
            _ => Document::new(),
        };
        let result = nested.deep_put(&splits[1..], value);
        self.data = self.data.update(key.to_string(), Value::Document(nested));
        result
    }

    fn deep_remove(&mut self, splits: &[&str]) -> PopulateResult<()> {
        let key = match splits.first() {
            Some(key) if !key.is_empty() => *key,
            _ => {
                log::error!("Document does not support empty key");
                return Err(PopulateError::new(
                    "Document does not support empty key",
                    ErrorKind::InvalidOperation,
                ));
            }
        };

        if splits.len() == 1 {
            self.data = self.data.without(key);
            return Ok(());
        }

        if let Some(Value::Document(obj)) = self.data.get(key) {
            let mut nested = obj.clone();
            nested.deep_remove(&splits[1..])?;
            self.data = self.data.update(key.to_string(), Value::Document(nested));
        }
        Ok(())
    }
}

fn recursive_get(value: Option<&Value>, splits: &[&str]) -> Value {
    let value = match value {
        None => return Value::Null,
        Some(value) => value,
    };

    let key = match splits.first() {
        None => return value.clone(),
        Some(key) => *key,
    };

    match value {
        Value::Document(obj) => recursive_get(obj.data.get(key), &splits[1..]),
        Value::Array(arr) => match key.parse::<usize>() {
            Ok(index) => recursive_get(arr.get(index), &splits[1..]),
            Err(_) => decompose(arr, splits),
        },
        _ => Value::Null,
    }
}

fn decompose(arr: &[Value], splits: &[&str]) -> Value {
    let mut items: Vec<Value> = Vec::with_capacity(arr.len());
    for item in arr {
        match recursive_get(Some(item), splits) {
            Value::Array(values) => items.extend(values),
            Value::Null => {}
            value => items.push(value),
        }
    }
    Value::Array(items.into_iter().unique_by(|it| it.to_string()).collect())
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in self.data.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Strips the surrounding quotes `doc!` leaves on string-literal keys.
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// ```rust,ignore
/// use repopulate::doc;
///
/// let empty = doc!{};
/// let user = doc!{
///     firstName: "Alice",
///     "_id": "u1",
///     address: { city: "Paris" },
///     todos: ["t1", "t2"],
///     score: (base * 2)
/// };
/// ```
///
/// # Panics
///
/// Panics if a key is empty or `_id` is not a non-empty string.
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Converts one `doc!` value: nested documents, arrays or expressions.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
