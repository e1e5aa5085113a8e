use itertools::Itertools;

use crate::builder::{populate_query, QueryBuilder, Relation};
use crate::common::EXCLUDE_PREFIX;
use crate::projection::{PopulatedProjection, Projection};
use crate::query::Query;

/// Populates relations one level deep.
///
/// A nested projection becomes a selection string naming every key, with
/// falsy keys prefixed by `-`, e.g. `{title: true, done: false}` selects
/// `"title -done"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialQueryBuilder;

impl PartialQueryBuilder {
    pub fn new() -> Self {
        PartialQueryBuilder
    }

    fn selection_string(projection: &Projection) -> String {
        projection
            .iter()
            .map(|(field, flag)| {
                if flag.is_truthy() {
                    field.to_string()
                } else {
                    format!("{}{}", EXCLUDE_PREFIX, field)
                }
            })
            .join(" ")
    }

    fn populate(query: Query, field: &str, relation: &Relation<'_, Projection>) -> Query {
        match relation {
            Relation::Populate => query.populate_path(field, None),
            Relation::Select(select) => query.populate_path(field, Some(select.to_string())),
            Relation::Nested(projection) => {
                let select = Self::selection_string(projection);
                query.populate_path(field, Some(select).filter(|it| !it.is_empty()))
            }
        }
    }
}

impl QueryBuilder for PartialQueryBuilder {
    type Projection = PopulatedProjection;

    fn build<C>(&self, query_creator: C, projection: Option<&PopulatedProjection>) -> Query
    where
        C: FnOnce(Option<Projection>) -> Query,
    {
        let query = populate_query(query_creator, Self::populate, projection);
        log::debug!("Built partial populate query {}", query);
        query
    }
}
