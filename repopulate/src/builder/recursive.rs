use itertools::Itertools;

use crate::builder::{parse_basic_projection, parse_populate_projection, populate_query, QueryBuilder, Relation};
use crate::common::DOC_ID;
use crate::projection::{Projection, RecursiveProjection};
use crate::query::{PopulateOptions, Query};

/// Populates relations at any depth.
///
/// Each relation becomes a [PopulateOptions] node whose selection string
/// names only the truthy plain keys of its nested projection, and whose
/// children are built from the nested relations the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveQueryBuilder;

impl RecursiveQueryBuilder {
    pub fn new() -> Self {
        RecursiveQueryBuilder
    }

    fn selection_string(projection: &Projection) -> String {
        projection
            .iter()
            .filter(|(_, flag)| flag.is_truthy())
            .map(|(field, _)| field)
            .join(" ")
    }

    /// Builds the population node for one relation.
    ///
    /// - `Select(s)` selects `s` and has no children.
    /// - `Populate` selects the identifier only (`""`) and has no children.
    /// - `Nested(p)` selects the truthy plain keys of `p` (falling back to
    ///   `_id`, or everything when `p` sets `__all`), with one child per
    ///   relation of `p`.
    pub fn create_populate_options(field: &str, relation: &Relation<'_, RecursiveProjection>) -> PopulateOptions {
        let options = PopulateOptions::new(field).lean(true);

        let projection = match relation {
            Relation::Select(select) => return options.select(Some(select.to_string())),
            Relation::Populate => return options.select(Some(String::new())),
            Relation::Nested(projection) => &***projection,
        };

        let select = parse_basic_projection(Some(projection)).map(|basic| {
            let select = Self::selection_string(&basic);
            if select.is_empty() {
                DOC_ID.to_string()
            } else {
                select
            }
        });

        let children = match parse_populate_projection(Some(projection)) {
            Some(relations) => relations
                .iter()
                .map(|(child, relation)| Self::create_populate_options(child, relation))
                .collect(),
            None => Vec::new(),
        };

        options.select(select).children(children)
    }
}

impl QueryBuilder for RecursiveQueryBuilder {
    type Projection = RecursiveProjection;

    fn build<C>(&self, query_creator: C, projection: Option<&RecursiveProjection>) -> Query
    where
        C: FnOnce(Option<Projection>) -> Query,
    {
        let query = populate_query(
            query_creator,
            |query, field, relation| query.populate(Self::create_populate_options(field, relation)),
            projection.map(|it| &**it),
        );
        log::debug!("Built recursive populate query {}", query);
        query
    }
}
