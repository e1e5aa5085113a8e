use crate::common::{SortOrder, SortSpec};

/// Paging and ordering options for a find query.
///
/// `limit` of `0` means unbounded and a negative limit is read as its
/// absolute value. A negative `skip` is rejected by the store.
///
/// ```rust,ignore
/// use repopulate::collection::{limit_to, order_by};
///
/// let options = order_by("email", SortOrder::Descending).limit(10).skip(20);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub(crate) limit: Option<i64>,
    pub(crate) skip: Option<i64>,
    pub(crate) sort: Option<SortSpec>,
}

/// Creates [FindOptions] sorted by a single field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions {
        sort: Some(SortSpec::new().by(field_name, sort_order)),
        ..FindOptions::default()
    }
}

/// Creates [FindOptions] that skip the first `skip` results.
pub fn skip_by(skip: i64) -> FindOptions {
    FindOptions {
        skip: Some(skip),
        ..FindOptions::default()
    }
}

/// Creates [FindOptions] returning at most `limit` results.
pub fn limit_to(limit: i64) -> FindOptions {
    FindOptions {
        limit: Some(limit),
        ..FindOptions::default()
    }
}

impl FindOptions {
    pub fn new() -> Self {
        FindOptions::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Replaces the sort specification.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Appends a field to the sort specification.
    pub fn then_by(mut self, field_name: &str, sort_order: SortOrder) -> Self {
        let sort = self.sort.take().unwrap_or_default();
        self.sort = Some(sort.by(field_name, sort_order));
        self
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    pub fn skip_value(&self) -> Option<i64> {
        self.skip
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }
}
