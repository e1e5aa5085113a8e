use indexmap::IndexMap;

use crate::common::DOC_ID;
use crate::projection::{FieldDirective, PopulateProjection, Projection};
use crate::query::Query;

/// A relation key of a projection, borrowed from it.
#[derive(Debug, PartialEq)]
pub enum Relation<'a, N> {
    /// Populate without field restriction.
    Populate,
    /// Populate with a raw selection string.
    Select(&'a str),
    /// Populate restricted by a nested projection.
    Nested(&'a N),
}

/// Extracts the root field selection of a projection.
///
/// Returns `None` (all fields) when there is no projection or `__all` is
/// set. Otherwise every plain flag is copied verbatim; when there is none,
/// the selection falls back to `{_id: true}`.
pub fn parse_basic_projection<N>(projection: Option<&PopulateProjection<N>>) -> Option<Projection> {
    let projection = projection?;
    if projection.include_all() {
        return None;
    }

    let basic: Projection = projection
        .iter()
        .filter_map(|(field, directive)| match directive {
            FieldDirective::Include(flag) => Some((field, *flag)),
            _ => None,
        })
        .collect();

    if basic.is_empty() {
        Some(Projection::new().with(DOC_ID, true))
    } else {
        Some(basic)
    }
}

/// Extracts the relation keys of a projection, in key order.
///
/// Returns `None` when there is no projection; the map is empty when the
/// projection names no relation.
pub fn parse_populate_projection<N>(
    projection: Option<&PopulateProjection<N>>,
) -> Option<IndexMap<&str, Relation<'_, N>>> {
    let projection = projection?;
    let relations = projection
        .iter()
        .filter_map(|(field, directive)| {
            let relation = match directive {
                FieldDirective::Include(_) => return None,
                FieldDirective::Populate => Relation::Populate,
                FieldDirective::Select(select) => Relation::Select(select.as_str()),
                FieldDirective::Nested(nested) => Relation::Nested(nested),
            };
            Some((field, relation))
        })
        .collect();
    Some(relations)
}

/// Creates the root query once and folds `populate_strategy` over every
/// relation of `projection`.
///
/// With no projection, or a projection without relations, the root query is
/// returned unchanged.
pub fn populate_query<N, C, S>(
    query_creator: C,
    mut populate_strategy: S,
    projection: Option<&PopulateProjection<N>>,
) -> Query
where
    C: FnOnce(Option<Projection>) -> Query,
    S: FnMut(Query, &str, &Relation<'_, N>) -> Query,
{
    let query = query_creator(parse_basic_projection(projection));
    match parse_populate_projection(projection) {
        None => query,
        Some(relations) => relations
            .iter()
            .fold(query, |acc, (field, relation)| populate_strategy(acc, *field, relation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::EntityId;
    use crate::projection::{PopulatedProjection, RecursiveProjection};
    use crate::{populated_projection, projection, recursive_projection};

    fn creator(selection: Option<Projection>) -> Query {
        Query::find_by_id(EntityId::from("u1"), selection)
    }

    #[test]
    fn test_no_projection() {
        assert_eq!(parse_basic_projection::<Projection>(None), None);
        assert!(parse_populate_projection::<Projection>(None).is_none());
    }

    #[test]
    fn test_split_partitions_every_key() {
        let projection = populated_projection! {
            firstName: true,
            email: 0,
            todos: { title: true },
            author: null,
            comments: "text"
        };

        let basic = parse_basic_projection(Some(&projection)).unwrap();
        let relations = parse_populate_projection(Some(&projection)).unwrap();

        assert_eq!(basic, projection! { firstName: true, email: 0 });
        let relation_keys: Vec<_> = relations.keys().copied().collect();
        assert_eq!(relation_keys, vec!["todos", "author", "comments"]);
        assert_eq!(relations["author"], Relation::Populate);
        assert_eq!(relations["comments"], Relation::Select("text"));
        assert_eq!(relations["todos"], Relation::Nested(&projection! { title: true }));
        assert_eq!(basic.len() + relations.len(), projection.len());
    }

    #[test]
    fn test_all_scalars_yield_empty_relation_map() {
        let projection = populated_projection! { firstName: true, email: true };
        let relations = parse_populate_projection(Some(&projection)).unwrap();
        assert!(relations.is_empty());
    }

    #[test]
    fn test_all_relations_fall_back_to_id() {
        let projection = recursive_projection! { todos: null, owner: "email" };
        assert_eq!(
            parse_basic_projection(Some(&*projection)),
            Some(projection! { "_id": true })
        );
    }

    #[test]
    fn test_all_key_selects_everything() {
        let projection = populated_projection! { __all: true, firstName: true, todos: null };
        assert_eq!(parse_basic_projection(Some(&projection)), None);
        assert_eq!(parse_populate_projection(Some(&projection)).unwrap().len(), 1);
    }

    #[test]
    fn test_all_false_is_not_a_field() {
        let projection = populated_projection! { __all: false, todos: null };
        assert!(!projection.include_all());
        assert_eq!(projection.len(), 1);

        assert_eq!(
            parse_basic_projection(Some(&projection)),
            Some(projection! { "_id": true })
        );
        let relations = parse_populate_projection(Some(&projection)).unwrap();
        assert_eq!(relations.keys().copied().collect::<Vec<_>>(), vec!["todos"]);

        let projection = populated_projection! { __all: false, firstName: true };
        assert_eq!(
            parse_basic_projection(Some(&projection)),
            Some(projection! { firstName: true })
        );
    }

    #[test]
    fn test_populate_query_folds_relations_in_order() {
        let projection = populated_projection! { todos: null, firstName: true, owner: null };
        let mut visited = vec![];
        let query = populate_query(
            creator,
            |query, field, _relation| {
                visited.push(field.to_string());
                query.populate_path(field, None)
            },
            Some(&projection),
        );

        assert_eq!(visited, vec!["todos", "owner"]);
        assert_eq!(query.selection(), Some(&projection! { firstName: true }));
        assert_eq!(query.population().len(), 2);
    }

    #[test]
    fn test_populate_query_without_relations_is_unchanged() {
        let empty = PopulatedProjection::new();
        let query = populate_query(
            creator,
            |_query, _field, _relation| panic!("no relation expected"),
            Some(&empty),
        );
        assert_eq!(query.selection(), Some(&projection! { "_id": true }));
        assert!(query.population().is_empty());

        let query = populate_query::<RecursiveProjection, _, _>(
            creator,
            |_query, _field, _relation| panic!("no relation expected"),
            None,
        );
        assert_eq!(query.selection(), None);
    }
}
