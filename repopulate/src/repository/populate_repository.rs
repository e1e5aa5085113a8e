use std::ops::Deref;

use crate::builder::{PartialQueryBuilder, QueryBuilder, RecursiveQueryBuilder};
use crate::collection::{Document, EntityId, Update};
use crate::common::{parse_query_params, PageParam, SortSpec};
use crate::errors::PopulateResult;
use crate::filter::Filter;
use crate::query::Query;
use crate::repository::{Repository, RepositoryMetadata};

/// A [Repository] whose reads and updates can populate relations.
///
/// Every `*populated*` operation compiles its projection with the builder
/// `B` into a root selection plus a population plan. All plain [Repository]
/// operations stay available through `Deref`.
#[derive(Clone, Debug)]
pub struct PopulateRepository<B: QueryBuilder> {
    base: Repository,
    builder: B,
}

/// Populates one level deep.
pub type PartialPopulateRepository = PopulateRepository<PartialQueryBuilder>;

/// Populates at any depth.
pub type RecursivePopulateRepository = PopulateRepository<RecursiveQueryBuilder>;

impl PopulateRepository<PartialQueryBuilder> {
    pub fn partial(metadata: RepositoryMetadata) -> Self {
        PopulateRepository::new(metadata, PartialQueryBuilder::new())
    }
}

impl PopulateRepository<RecursiveQueryBuilder> {
    pub fn recursive(metadata: RepositoryMetadata) -> Self {
        PopulateRepository::new(metadata, RecursiveQueryBuilder::new())
    }
}

impl<B: QueryBuilder> PopulateRepository<B> {
    pub fn new(metadata: RepositoryMetadata, builder: B) -> Self {
        PopulateRepository::from_repository(Repository::new(metadata), builder)
    }

    pub fn from_repository(base: Repository, builder: B) -> Self {
        PopulateRepository { base, builder }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub async fn get_populated_by_id(
        &self,
        id: Option<&EntityId>,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Document> {
        let id = self.required_id(id)?;
        self.single_entity_query(&[], |model| async move {
            let query = self
                .builder
                .build(|selection| Query::find_by_id(id, selection), projection)
                .lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn get_populated_by_id_or_null(
        &self,
        id: Option<&EntityId>,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Option<Document>> {
        let id = match id.filter(|it| !it.is_blank()) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        let query = self
            .builder
            .build(|selection| Query::find_by_id(id, selection), projection)
            .lean();
        self.model()?.fetch_one(&query).await
    }

    pub async fn get_one_populated(&self, filter: Filter, projection: Option<&B::Projection>) -> PopulateResult<Document> {
        self.single_entity_query(&[], |model| async move {
            let query = self
                .builder
                .build(|selection| Query::find_one(filter, selection), projection)
                .lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn get_one_populated_or_null(
        &self,
        filter: Filter,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Option<Document>> {
        let query = self
            .builder
            .build(|selection| Query::find_one(filter, selection), projection)
            .lean();
        self.model()?.fetch_one(&query).await
    }

    /// Finds every matching document, each populated the same way.
    pub async fn get_populated(
        &self,
        filter: Filter,
        projection: Option<&B::Projection>,
        limit: Option<PageParam>,
        skip: Option<PageParam>,
        sort: Option<SortSpec>,
    ) -> PopulateResult<Vec<Document>> {
        let options = parse_query_params(limit, skip, sort);
        let query = self
            .builder
            .build(|selection| Query::find(filter, options, selection), projection)
            .lean();
        self.model()?.fetch_many(&query).await
    }

    pub async fn update_populated_by_id(
        &self,
        id: Option<&EntityId>,
        update: Update,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Document> {
        let id = self.required_id(id)?;
        self.single_entity_query(&[], |model| async move {
            let query = self
                .builder
                .build(|selection| Query::find_by_id_and_update(id, update, selection), projection)
                .lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn update_populated_by_id_or_null(
        &self,
        id: Option<&EntityId>,
        update: Update,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Option<Document>> {
        let id = match id.filter(|it| !it.is_blank()) {
            Some(id) => id.clone(),
            None => return Ok(None),
        };
        let query = self
            .builder
            .build(|selection| Query::find_by_id_and_update(id, update, selection), projection)
            .lean();
        self.model()?.fetch_one(&query).await
    }

    pub async fn update_one_populated(
        &self,
        filter: Filter,
        update: Update,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Document> {
        self.single_entity_query(&[], |model| async move {
            let query = self
                .builder
                .build(|selection| Query::find_one_and_update(filter, update, selection), projection)
                .lean();
            model.fetch_one(&query).await
        })
        .await
    }

    pub async fn update_one_populated_or_null(
        &self,
        filter: Filter,
        update: Update,
        projection: Option<&B::Projection>,
    ) -> PopulateResult<Option<Document>> {
        let query = self
            .builder
            .build(|selection| Query::find_one_and_update(filter, update, selection), projection)
            .lean();
        self.model()?.fetch_one(&query).await
    }
}

impl<B: QueryBuilder> Deref for PopulateRepository<B> {
    type Target = Repository;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
