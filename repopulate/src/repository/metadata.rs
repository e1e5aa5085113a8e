use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::errors::{PopulateError, PopulateResult};
use crate::query::Model;

/// Resolves the [Model] a repository runs its queries against.
pub type ModelAccessor = Arc<dyn Fn() -> PopulateResult<Model> + Send + Sync>;

/// Builds the error a repository raises when an entity is not found, given
/// the entity name.
pub type NotFoundErrorFactory = Arc<dyn Fn(&str) -> PopulateError + Send + Sync>;

/// The immutable description of what a repository manages.
///
/// Built once with [RepositoryMetadata::builder] and never mutated.
#[derive(Clone, Default)]
pub struct RepositoryMetadata {
    entity_name: String,
    model_accessor: Option<ModelAccessor>,
    entity_type: Option<String>,
    not_found_error: Option<NotFoundErrorFactory>,
}

impl RepositoryMetadata {
    pub fn builder(entity_name: &str) -> RepositoryMetadataBuilder {
        RepositoryMetadataBuilder {
            metadata: RepositoryMetadata {
                entity_name: entity_name.to_string(),
                ..RepositoryMetadata::default()
            },
        }
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn model_accessor(&self) -> Option<&ModelAccessor> {
        self.model_accessor.as_ref()
    }

    /// The tag routers dispatch on, if any.
    pub fn entity_type(&self) -> Option<&str> {
        self.entity_type.as_deref()
    }

    pub fn not_found_error(&self) -> Option<&NotFoundErrorFactory> {
        self.not_found_error.as_ref()
    }
}

impl Debug for RepositoryMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryMetadata")
            .field("entity_name", &self.entity_name)
            .field("entity_type", &self.entity_type)
            .field("has_model", &self.model_accessor.is_some())
            .field("has_not_found_error", &self.not_found_error.is_some())
            .finish()
    }
}

/// Builder for [RepositoryMetadata].
pub struct RepositoryMetadataBuilder {
    metadata: RepositoryMetadata,
}

impl RepositoryMetadataBuilder {
    /// Binds a fixed model.
    pub fn model(self, model: Model) -> Self {
        self.model_with(move || Ok(model.clone()))
    }

    /// Binds a model resolved on every use.
    pub fn model_with<F>(mut self, accessor: F) -> Self
    where
        F: Fn() -> PopulateResult<Model> + Send + Sync + 'static,
    {
        self.metadata.model_accessor = Some(Arc::new(accessor));
        self
    }

    pub fn entity_type(mut self, entity_type: &str) -> Self {
        self.metadata.entity_type = Some(entity_type.to_string());
        self
    }

    pub fn not_found_error<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> PopulateError + Send + Sync + 'static,
    {
        self.metadata.not_found_error = Some(Arc::new(factory));
        self
    }

    pub fn build(self) -> RepositoryMetadata {
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_builder_defaults() {
        let metadata = RepositoryMetadata::builder("Todo").build();
        assert_eq!(metadata.entity_name(), "Todo");
        assert!(metadata.model_accessor().is_none());
        assert!(metadata.entity_type().is_none());
        assert!(metadata.not_found_error().is_none());
    }

    #[test]
    fn test_builder_sets_every_field() {
        let metadata = RepositoryMetadata::builder("Todo")
            .model_with(|| Err(PopulateError::new("offline", ErrorKind::BackendError)))
            .entity_type("TODO")
            .not_found_error(|name| {
                PopulateError::new(name, ErrorKind::Extension("EntityNotFound".to_string()))
            })
            .build();

        assert_eq!(metadata.entity_type(), Some("TODO"));
        let accessor = metadata.model_accessor().unwrap();
        assert_eq!(accessor().unwrap_err().kind(), &ErrorKind::BackendError);
        let factory = metadata.not_found_error().unwrap();
        let error = factory("Todo");
        assert_eq!(error.message(), "Todo");
        assert_eq!(error.kind(), &ErrorKind::Extension("EntityNotFound".to_string()));
    }

    #[test]
    fn test_debug_hides_closures() {
        let metadata = RepositoryMetadata::builder("Todo").entity_type("TODO").build();
        let formatted = format!("{:?}", metadata);
        assert!(formatted.contains("Todo"));
        assert!(formatted.contains("has_model: false"));
    }
}
