use indexmap::IndexMap;
use std::ops::{Deref, DerefMut};

use crate::common::ALL_FIELDS_KEY;
use crate::projection::{Flag, Projection};

/// What a populated or recursive projection asks for one field.
///
/// `N` is the projection type used for `Nested`: a flat [Projection] for one
/// level of population, a [RecursiveProjection] for unbounded depth.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDirective<N> {
    /// Plain field selection.
    Include(Flag),
    /// Populate the relation without restricting its fields.
    Populate,
    /// Populate the relation with a raw selection string.
    Select(String),
    /// Populate the relation restricted by a projection.
    Nested(N),
}

impl<N> FieldDirective<N> {
    /// `true` for every directive that populates the field.
    pub fn is_relation(&self) -> bool {
        !matches!(self, FieldDirective::Include(_))
    }
}

impl<N> From<Flag> for FieldDirective<N> {
    fn from(flag: Flag) -> Self {
        FieldDirective::Include(flag)
    }
}

impl<N> From<bool> for FieldDirective<N> {
    fn from(value: bool) -> Self {
        FieldDirective::Include(Flag::Bool(value))
    }
}

impl<N> From<i32> for FieldDirective<N> {
    fn from(value: i32) -> Self {
        FieldDirective::Include(Flag::from(value))
    }
}

impl<N> From<i64> for FieldDirective<N> {
    fn from(value: i64) -> Self {
        FieldDirective::Include(Flag::Number(value))
    }
}

impl<N> From<&str> for FieldDirective<N> {
    fn from(value: &str) -> Self {
        FieldDirective::Select(value.to_string())
    }
}

impl<N> From<String> for FieldDirective<N> {
    fn from(value: String) -> Self {
        FieldDirective::Select(value)
    }
}

/// A projection whose keys are either plain selections or relations to
/// populate.
///
/// The reserved key `__all` is not stored as a field: inserting it with a
/// flag sets [PopulateProjection::include_all].
#[derive(Debug, Clone, PartialEq)]
pub struct PopulateProjection<N> {
    include_all: bool,
    fields: IndexMap<String, FieldDirective<N>>,
}

impl<N> Default for PopulateProjection<N> {
    fn default() -> Self {
        PopulateProjection {
            include_all: false,
            fields: IndexMap::new(),
        }
    }
}

impl<N> PopulateProjection<N> {
    pub fn new() -> Self {
        PopulateProjection::default()
    }

    /// Keeps every non-relation field of the entity when `true`.
    pub fn all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn with(mut self, field: &str, directive: impl Into<FieldDirective<N>>) -> Self {
        self.insert(field, directive);
        self
    }

    /// Adds (or replaces) the directive of `field`.
    pub fn insert(&mut self, field: &str, directive: impl Into<FieldDirective<N>>) {
        let directive = directive.into();
        if field == ALL_FIELDS_KEY {
            match directive {
                FieldDirective::Include(flag) => self.include_all = flag.is_truthy(),
                _ => log::warn!("Ignoring non-flag value for reserved key {}", ALL_FIELDS_KEY),
            }
            return;
        }
        self.fields.insert(field.to_string(), directive);
    }

    pub fn include_all(&self) -> bool {
        self.include_all
    }

    pub fn get(&self, field: &str) -> Option<&FieldDirective<N>> {
        self.fields.get(field)
    }

    /// `true` when no field is named; `include_all` is not a field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDirective<N>)> {
        self.fields.iter().map(|(field, directive)| (field.as_str(), directive))
    }
}

/// One level of population: nested projections are flat.
pub type PopulatedProjection = PopulateProjection<Projection>;

/// Population at any depth: nested projections are recursive projections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecursiveProjection(PopulateProjection<RecursiveProjection>);

impl RecursiveProjection {
    pub fn new() -> Self {
        RecursiveProjection(PopulateProjection::new())
    }

    pub fn all(self, include_all: bool) -> Self {
        RecursiveProjection(self.0.all(include_all))
    }

    pub fn with(
        self,
        field: &str,
        directive: impl Into<FieldDirective<RecursiveProjection>>,
    ) -> Self {
        RecursiveProjection(self.0.with(field, directive))
    }
}

impl Deref for RecursiveProjection {
    type Target = PopulateProjection<RecursiveProjection>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RecursiveProjection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Projection> for FieldDirective<Projection> {
    fn from(projection: Projection) -> Self {
        FieldDirective::Nested(projection)
    }
}

impl From<RecursiveProjection> for FieldDirective<RecursiveProjection> {
    fn from(projection: RecursiveProjection) -> Self {
        FieldDirective::Nested(projection)
    }
}

/// Creates a [PopulatedProjection].
///
/// `null` populates a relation fully, a `{ .. }` block populates it with a
/// flat projection, a string populates it with a selection string and any
/// other expression is a plain flag. Wrap negative numbers in parentheses.
///
/// ```rust,ignore
/// let projection = populated_projection! {
///     __all: true,
///     todos: { title: true, done: false },
///     author: null,
///     comments: "text"
/// };
/// ```
#[macro_export]
macro_rules! populated_projection {
    () => {
        $crate::projection::PopulatedProjection::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut projection = $crate::projection::PopulatedProjection::new();
            $(
                projection.insert(
                    &$crate::collection::normalize(stringify!($key)),
                    $crate::populated_directive!($value),
                );
            )*
            projection
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! populated_directive {
    (null) => {
        $crate::projection::FieldDirective::<$crate::projection::Projection>::Populate
    };

    ({ $($key:tt : $value:expr),* $(,)? }) => {
        $crate::projection::FieldDirective::Nested($crate::projection! { $($key : $value),* })
    };

    ($value:expr) => {
        $crate::projection::FieldDirective::<$crate::projection::Projection>::from($value)
    };
}

/// Creates a [RecursiveProjection]; `{ .. }` blocks nest recursively.
///
/// ```rust,ignore
/// let projection = recursive_projection! {
///     firstName: true,
///     todos: {
///         title: true,
///         comments: { text: true, author: null }
///     }
/// };
/// ```
#[macro_export]
macro_rules! recursive_projection {
    () => {
        $crate::projection::RecursiveProjection::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut projection = $crate::projection::RecursiveProjection::new();
            $(
                projection.insert(
                    &$crate::collection::normalize(stringify!($key)),
                    $crate::recursive_directive!($value),
                );
            )*
            projection
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! recursive_directive {
    (null) => {
        $crate::projection::FieldDirective::<$crate::projection::RecursiveProjection>::Populate
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::projection::FieldDirective::Nested($crate::recursive_projection! { $($key : $value),* })
    };

    ($value:expr) => {
        $crate::projection::FieldDirective::<$crate::projection::RecursiveProjection>::from($value)
    };
}
