use crate::collection::{Document, EntityId};
use crate::common::{Value, DOC_ID};
use crate::errors::PopulateResult;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::sync::Arc;

use super::{AllFilter, AndFilter, EqualsFilter, NotFilter, OrFilter};

/// A predicate evaluated against a [Document].
///
/// Implementations must be `Display` so that query plans can be logged.
pub trait FilterProvider: Any + Send + Sync + Display {
    /// Returns `true` when `entry` matches this filter.
    fn apply(&self, entry: &Document) -> PopulateResult<bool>;

    fn as_any(&self) -> &dyn Any;
}

/// A cheaply cloneable handle to a [FilterProvider].
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    pub fn and(&self, filter: Filter) -> Self {
        Filter::new(AndFilter::new(vec![self.clone(), filter]))
    }

    pub fn or(&self, filter: Filter) -> Self {
        Filter::new(OrFilter::new(vec![self.clone(), filter]))
    }

    pub fn not(&self) -> Self {
        Filter::new(NotFilter::new(self.clone()))
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for Filter {
    fn default() -> Self {
        all()
    }
}

/// Matches on every field of the document; an empty document matches all.
impl From<Document> for Filter {
    fn from(document: Document) -> Self {
        let filters: Vec<Filter> = document
            .iter()
            .map(|(key, value)| Filter::new(EqualsFilter::new(key.clone(), value.clone())))
            .collect();
        match filters.len() {
            0 => all(),
            1 => filters[0].clone(),
            _ => and(filters),
        }
    }
}

pub fn all() -> Filter {
    Filter::new(AllFilter {})
}

pub fn by_id(id: &EntityId) -> Filter {
    Filter::new(EqualsFilter::new(DOC_ID.to_string(), Value::from(id)))
}

pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

pub(crate) fn is_all_filter(filter: &Filter) -> bool {
    filter.as_any().is::<AllFilter>()
}

/// Returns the id a filter pins down, when it is a plain `by_id` filter.
pub(crate) fn id_of(filter: &Filter) -> Option<EntityId> {
    filter
        .as_any()
        .downcast_ref::<EqualsFilter>()
        .filter(|it| it.field_name() == DOC_ID)
        .and_then(|it| it.field_value().as_entity_id())
}
