use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::collection::{Document, EntityId, Update, WriteResult};
use crate::common::{parse_query_params, PageParam, SortSpec, Value};
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::filter::{by_id, Filter};
use crate::projection::Projection;
use crate::query::{Model, Query};
use crate::repository::RepositoryMetadata;

/// A parameter a singular operation cannot run without.
pub trait Presence: Sync {
    /// `false` when the value is absent or blank.
    fn is_present(&self) -> bool;
}

impl Presence for EntityId {
    fn is_present(&self) -> bool {
        !self.is_blank()
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().map(|it| it.is_present()).unwrap_or(false)
    }
}

fn present_id(id: Option<&EntityId>) -> Option<&EntityId> {
    id.filter(|it| it.is_present())
}

/// CRUD access to one entity type.
///
/// Singular lookups, updates and deletes fail with the configured not-found
/// error when nothing matches; their `_or_null` / `_or_return_null`
/// counterparts return `None` instead. Results are detached documents.
///
/// Cloning is cheap and clones share the same metadata.
#[derive(Clone, Debug, Default)]
pub struct Repository {
    inner: Arc<RepositoryMetadata>,
}

impl Repository {
    pub fn new(metadata: RepositoryMetadata) -> Self {
        Repository {
            inner: Arc::new(metadata),
        }
    }

    pub fn metadata(&self) -> &RepositoryMetadata {
        &self.inner
    }

    pub fn entity_name(&self) -> &str {
        self.inner.entity_name()
    }

    /// Resolves the bound model.
    ///
    /// # Errors
    ///
    /// `RepositoryNotConfigured` when the metadata binds no model.
    pub fn model(&self) -> PopulateResult<Model> {
        match self.inner.model_accessor() {
            Some(accessor) => accessor(),
            None => {
                log::error!("Repository model for {:?} is not configured", self.entity_name());
                Err(PopulateError::new(
                    &format!("Repository model for {:?} is not configured", self.entity_name()),
                    ErrorKind::RepositoryNotConfigured,
                ))
            }
        }
    }

    /// The error raised when a singular operation finds nothing.
    pub fn not_found(&self) -> PopulateError {
        let error = match self.inner.not_found_error() {
            Some(factory) => factory(self.entity_name()),
            None => PopulateError::new(self.entity_name(), ErrorKind::NotFound),
        };
        log::error!("{} not found", self.entity_name());
        error
    }

    /// The id itself, or [Repository::not_found] when it is absent or blank.
    pub fn required_id(&self, id: Option<&EntityId>) -> PopulateResult<EntityId> {
        match present_id(id) {
            Some(id) => Ok(id.clone()),
            None => Err(self.not_found()),
        }
    }

    /// Runs a singular operation.
    ///
    /// Fails with [Repository::not_found] without calling `callback` when any
    /// of `required` is absent or blank, and after calling it when it yields
    /// nothing.
    pub async fn single_entity_query<T, F, Fut>(&self, required: &[&dyn Presence], callback: F) -> PopulateResult<T>
    where
        F: FnOnce(Model) -> Fut,
        Fut: Future<Output = PopulateResult<Option<T>>>,
    {
        if required.iter().any(|it| !it.is_present()) {
            return Err(self.not_found());
        }

        match callback(self.model()?).await? {
            Some(entity) => Ok(entity),
            None => Err(self.not_found()),
        }
    }

    /// Inserts a document; the store assigns `_id` when it is missing.
    pub async fn save(&self, document: Document) -> PopulateResult<Document> {
        self.model()?.insert(document).await
    }

    /// Inserts a typed entity and returns it as stored.
    pub async fn save_entity<T>(&self, entity: &T) -> PopulateResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let saved = self.save(Document::from_entity(entity)?).await?;
        saved.to_entity()
    }

    pub async fn count(&self, filter: Filter) -> PopulateResult<u64> {
        self.model()?.count(&filter).await
    }

    /// Finds every matching document.
    ///
    /// `limit` and `skip` accept numbers or numeric strings; anything else is
    /// treated as unspecified.
    pub async fn get(
        &self,
        filter: Filter,
        projection: Option<&Projection>,
        limit: Option<PageParam>,
        skip: Option<PageParam>,
        sort: Option<SortSpec>,
    ) -> PopulateResult<Vec<Document>> {
        let options = parse_query_params(limit, skip, sort);
        let query = Query::find(filter, options, projection.cloned()).lean();
        self.model()?.fetch_many(&query).await
    }

    pub async fn distinct(&self, filter: Filter, field: &str) -> PopulateResult<Vec<Value>> {
        self.model()?.distinct(&filter, field).await
    }

    pub async fn is_exists(&self, filter: Filter) -> PopulateResult<bool> {
        self.model()?.exists(&filter).await
    }

    /// `false` for an absent or blank id, without querying the store.
    pub async fn is_exists_with_id(&self, id: Option<&EntityId>) -> PopulateResult<bool> {
        match present_id(id) {
            Some(id) => self.is_exists(by_id(id)).await,
            None => Ok(false),
        }
    }

    pub async fn get_by_id(&self, id: Option<&EntityId>, projection: Option<&Projection>) -> PopulateResult<Document> {
        let id = self.required_id(id)?;
        self.single_entity_query(&[], |model| async move {
            let query = Query::find_by_id(id, projection.cloned()).lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn get_by_id_or_null(
        &self,
        id: Option<&EntityId>,
        projection: Option<&Projection>,
    ) -> PopulateResult<Option<Document>> {
        let id = match present_id(id) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        let query = Query::find_by_id(id, projection.cloned()).lean();
        self.model()?.fetch_one(&query).await
    }

    pub async fn get_one(&self, filter: Filter, projection: Option<&Projection>) -> PopulateResult<Document> {
        self.single_entity_query(&[], |model| async move {
            let query = Query::find_one(filter, projection.cloned()).lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn get_one_or_null(
        &self,
        filter: Filter,
        projection: Option<&Projection>,
    ) -> PopulateResult<Option<Document>> {
        let query = Query::find_one(filter, projection.cloned()).lean();
        self.model()?.fetch_one(&query).await
    }

    /// Updates a document by id and returns it after the update.
    pub async fn update_by_id(
        &self,
        id: Option<&EntityId>,
        update: Update,
        projection: Option<&Projection>,
    ) -> PopulateResult<Document> {
        let id = self.required_id(id)?;
        self.single_entity_query(&[], |model| async move {
            let query = Query::find_by_id_and_update(id, update, projection.cloned()).lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn update_by_id_or_return_null(
        &self,
        id: Option<&EntityId>,
        update: Update,
        projection: Option<&Projection>,
    ) -> PopulateResult<Option<Document>> {
        let id = match present_id(id) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        let query = Query::find_by_id_and_update(id, update, projection.cloned()).lean();
        self.model()?.fetch_one(&query).await
    }

    /// Updates the first matching document and returns it after the update.
    pub async fn update_one(
        &self,
        filter: Filter,
        update: Update,
        projection: Option<&Projection>,
    ) -> PopulateResult<Document> {
        self.single_entity_query(&[], |model| async move {
            let query = Query::find_one_and_update(filter, update, projection.cloned()).lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn update_one_or_return_null(
        &self,
        filter: Filter,
        update: Update,
        projection: Option<&Projection>,
    ) -> PopulateResult<Option<Document>> {
        let query = Query::find_one_and_update(filter, update, projection.cloned()).lean();
        self.model()?.fetch_one(&query).await
    }

    pub async fn update_many(&self, filter: Filter, update: Update) -> PopulateResult<WriteResult> {
        self.model()?.update_many(&filter, &update).await
    }

    pub async fn delete_many(&self, filter: Filter) -> PopulateResult<WriteResult> {
        self.model()?.delete_many(&filter).await
    }

    /// Removes a document by id and returns it.
    pub async fn delete_by_id(&self, id: Option<&EntityId>, projection: Option<&Projection>) -> PopulateResult<Document> {
        let id = self.required_id(id)?;
        self.single_entity_query(&[], |model| async move {
            let query = Query::find_by_id_and_delete(id, projection.cloned()).lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn delete_by_id_or_return_null(
        &self,
        id: Option<&EntityId>,
        projection: Option<&Projection>,
    ) -> PopulateResult<Option<Document>> {
        let id = match present_id(id) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        let query = Query::find_by_id_and_delete(id, projection.cloned()).lean();
        self.model()?.fetch_one(&query).await
    }
}
