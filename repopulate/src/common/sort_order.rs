use indexmap::IndexMap;

/// Specifies the direction for sorting documents.
///
/// Converts from the numeric directions used in query parameters: any
/// negative number is descending, everything else ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A)
    Descending,
}

impl From<i32> for SortOrder {
    fn from(direction: i32) -> Self {
        if direction < 0 {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

impl From<i64> for SortOrder {
    fn from(direction: i64) -> Self {
        if direction < 0 {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// An ordered field-to-direction sort mapping.
///
/// Fields are compared in insertion order; the first field is the primary
/// sort key.
///
/// ```text
/// let sort = SortSpec::new().by("email", SortOrder::Descending).by("firstName", 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortSpec {
    fields: IndexMap<String, SortOrder>,
}

impl SortSpec {
    pub fn new() -> Self {
        SortSpec {
            fields: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the direction for `field`.
    pub fn by(mut self, field: &str, order: impl Into<SortOrder>) -> Self {
        self.fields.insert(field.to_string(), order.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortOrder)> {
        self.fields.iter().map(|(field, order)| (field.as_str(), *order))
    }
}

impl<S: Into<String>, O: Into<SortOrder>> FromIterator<(S, O)> for SortSpec {
    fn from_iter<T: IntoIterator<Item = (S, O)>>(iter: T) -> Self {
        SortSpec {
            fields: iter
                .into_iter()
                .map(|(field, order)| (field.into(), order.into()))
                .collect(),
        }
    }
}
