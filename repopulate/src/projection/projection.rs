use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// An inclusion flag, written as a boolean or a number.
///
/// `false` and `0` are falsy (exclude the field); every other value is truthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Bool(bool),
    Number(i64),
}

impl Flag {
    pub fn is_truthy(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Number(value) => *value != 0,
        }
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Flag::Bool(value) => write!(f, "{}", value),
            Flag::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

impl From<i32> for Flag {
    fn from(value: i32) -> Self {
        Flag::Number(value as i64)
    }
}

impl From<i64> for Flag {
    fn from(value: i64) -> Self {
        Flag::Number(value)
    }
}

/// A flat field selection: field name to inclusion flag.
///
/// Keys keep insertion order. An empty projection selects every field.
///
/// ```rust,ignore
/// let projection = projection! { firstName: true, email: 1, "_id": false };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    fields: IndexMap<String, Flag>,
}

impl Projection {
    pub fn new() -> Self {
        Projection {
            fields: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the flag of `field`.
    pub fn with(mut self, field: &str, flag: impl Into<Flag>) -> Self {
        self.insert(field, flag);
        self
    }

    pub fn insert(&mut self, field: &str, flag: impl Into<Flag>) {
        self.fields.insert(field.to_string(), flag.into());
    }

    pub fn get(&self, field: &str) -> Option<Flag> {
        self.fields.get(field).copied()
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Flag)> {
        self.fields.iter().map(|(field, flag)| (field.as_str(), *flag))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<S: Into<String>, F: Into<Flag>> FromIterator<(S, F)> for Projection {
    fn from_iter<T: IntoIterator<Item = (S, F)>>(iter: T) -> Self {
        Projection {
            fields: iter
                .into_iter()
                .map(|(field, flag)| (field.into(), flag.into()))
                .collect(),
        }
    }
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (field, flag)) in self.fields.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field, flag)?;
        }
        write!(f, "}}")
    }
}

/// Creates a flat [Projection].
///
/// ```rust,ignore
/// let projection = projection! { firstName: true, todos: 1, "_id": false };
/// ```
#[macro_export]
macro_rules! projection {
    () => {
        $crate::projection::Projection::new()
    };

    ($($key:tt : $value:expr),* $(,)?) => {
        {
            let mut projection = $crate::projection::Projection::new();
            $(
                projection.insert(&$crate::collection::normalize(stringify!($key)), $value);
            )*
            projection
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection;

    #[test]
    fn test_flag_truthiness() {
        assert!(Flag::from(true).is_truthy());
        assert!(Flag::from(1).is_truthy());
        assert!(Flag::from(-1i64).is_truthy());
        assert!(!Flag::from(false).is_truthy());
        assert!(!Flag::from(0).is_truthy());
    }

    #[test]
    fn test_macro_keeps_insertion_order() {
        let projection = projection! { email: true, firstName: 0, "_id": false };
        let keys: Vec<_> = projection.keys().collect();
        assert_eq!(keys, vec!["email", "firstName", "_id"]);
        assert_eq!(projection.get("firstName"), Some(Flag::Number(0)));
        assert_eq!(projection.get("_id"), Some(Flag::Bool(false)));
    }

    #[test]
    fn test_empty_projection() {
        let projection = projection! {};
        assert!(projection.is_empty());
        assert_eq!(projection, Projection::new());
    }

    #[test]
    fn test_builder_and_from_iter() {
        let built = Projection::new().with("a", true).with("b", 0);
        let collected: Projection = vec![("a", Flag::Bool(true)), ("b", Flag::Number(0))]
            .into_iter()
            .collect();
        assert_eq!(built, collected);
        assert_eq!(built.len(), 2);
        assert_eq!(format!("{}", built), "{a: true, b: 0}");
    }
}
