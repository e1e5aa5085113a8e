use std::sync::Arc;

use crate::builder::QueryBuilder;
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::repository::{PopulateRepository, Repository};

/// A repository that can be routed to by entity type tag.
pub trait EntityTypeAware {
    /// The tag declared in the repository metadata, if any.
    fn entity_type(&self) -> Option<&str>;

    /// `true` when the declared tag equals `entity_type` exactly.
    fn match_by_entity_type(&self, entity_type: &str) -> bool {
        self.entity_type() == Some(entity_type)
    }
}

impl EntityTypeAware for Repository {
    fn entity_type(&self) -> Option<&str> {
        self.metadata().entity_type()
    }
}

impl<B: QueryBuilder> EntityTypeAware for PopulateRepository<B> {
    fn entity_type(&self) -> Option<&str> {
        self.metadata().entity_type()
    }
}

impl<T: EntityTypeAware + ?Sized> EntityTypeAware for Arc<T> {
    fn entity_type(&self) -> Option<&str> {
        (**self).entity_type()
    }
}

/// Dispatches to one of a fixed set of repositories by entity type tag.
///
/// The first repository whose tag matches wins. Repositories with the same
/// shape but different entity types (e.g. several populate repositories
/// behind one polymorphic reference) can be grouped this way.
pub struct MixinRepository<R: EntityTypeAware> {
    repositories: Vec<R>,
}

impl<R: EntityTypeAware> MixinRepository<R> {
    pub fn new(repositories: Vec<R>) -> Self {
        MixinRepository { repositories }
    }

    /// Finds the repository for `entity_type`.
    ///
    /// # Errors
    ///
    /// `RouteNotFound` when no repository declares that tag.
    pub fn resolve(&self, entity_type: &str) -> PopulateResult<&R> {
        match self
            .repositories
            .iter()
            .find(|repository| repository.match_by_entity_type(entity_type))
        {
            Some(repository) => Ok(repository),
            None => {
                log::error!("Can't use repository, associated with entity type {}", entity_type);
                Err(PopulateError::new(
                    &format!("Can't use repository, associated with entity type {}", entity_type),
                    ErrorKind::RouteNotFound,
                ))
            }
        }
    }

    pub fn repositories(&self) -> &[R] {
        &self.repositories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{PartialPopulateRepository, RepositoryMetadata};

    fn repository(entity_name: &str, entity_type: Option<&str>) -> Repository {
        let builder = RepositoryMetadata::builder(entity_name);
        let builder = match entity_type {
            Some(entity_type) => builder.entity_type(entity_type),
            None => builder,
        };
        Repository::new(builder.build())
    }

    #[test]
    fn test_resolves_matching_tag() {
        let router = MixinRepository::new(vec![
            repository("Todo", Some("TODO")),
            repository("Comment", Some("COMMENT")),
        ]);

        assert_eq!(router.resolve("COMMENT").unwrap().entity_name(), "Comment");
        assert_eq!(router.resolve("TODO").unwrap().entity_name(), "Todo");
        assert_eq!(router.repositories().len(), 2);
    }

    #[test]
    fn test_unknown_tag_is_route_error() {
        let router = MixinRepository::new(vec![repository("Todo", Some("TODO")), repository("Note", None)]);

        let err = router.resolve("USER").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::RouteNotFound);
        assert_eq!(err.message(), "Can't use repository, associated with entity type USER");
        assert!(router.resolve("todo").is_err());
    }

    #[test]
    fn test_first_match_wins() {
        let router = MixinRepository::new(vec![
            Arc::new(PartialPopulateRepository::partial(
                RepositoryMetadata::builder("First").entity_type("TODO").build(),
            )),
            Arc::new(PartialPopulateRepository::partial(
                RepositoryMetadata::builder("Second").entity_type("TODO").build(),
            )),
        ]);
        assert_eq!(router.resolve("TODO").unwrap().entity_name(), "First");
    }

    #[test]
    fn test_empty_router_never_resolves() {
        let router = MixinRepository::<Repository>::new(vec![]);
        assert!(router.resolve("TODO").is_err());
    }
}
