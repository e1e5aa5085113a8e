use async_trait::async_trait;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;

use crate::collection::{Document, Update, WriteResult};
use crate::common::Value;
use crate::errors::PopulateResult;
use crate::filter::Filter;
use crate::query::Query;

/// The contract a store fulfils for one entity type.
///
/// All results are detached documents: mutating them never touches the
/// store.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// The registered name of the entity type.
    fn model_name(&self) -> String;

    /// Inserts a document and returns it as stored, `_id` included.
    async fn insert(&self, document: Document) -> PopulateResult<Document>;

    /// Runs a query description, applying its selection and population plan.
    ///
    /// Singular operations return at most one document.
    async fn execute(&self, query: &Query) -> PopulateResult<Vec<Document>>;

    async fn count(&self, filter: &Filter) -> PopulateResult<u64>;

    async fn exists(&self, filter: &Filter) -> PopulateResult<bool>;

    /// Distinct values of `field` among matching documents; array fields
    /// contribute their elements.
    async fn distinct(&self, filter: &Filter, field: &str) -> PopulateResult<Vec<Value>>;

    async fn update_many(&self, filter: &Filter, update: &Update) -> PopulateResult<WriteResult>;

    async fn delete_many(&self, filter: &Filter) -> PopulateResult<WriteResult>;
}

/// A cheaply cloneable handle to a [ModelProvider].
#[derive(Clone)]
pub struct Model {
    inner: Arc<dyn ModelProvider>,
}

impl Model {
    pub fn new<T: ModelProvider + 'static>(inner: T) -> Self {
        Model {
            inner: Arc::new(inner),
        }
    }

    /// Runs a query and returns its first document.
    pub async fn fetch_one(&self, query: &Query) -> PopulateResult<Option<Document>> {
        let documents = self.inner.execute(query).await?;
        Ok(documents.into_iter().next())
    }

    pub async fn fetch_many(&self, query: &Query) -> PopulateResult<Vec<Document>> {
        self.inner.execute(query).await
    }
}

impl Deref for Model {
    type Target = Arc<dyn ModelProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Model({})", self.inner.model_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::all;

    struct FixedModel;

    #[async_trait]
    impl ModelProvider for FixedModel {
        fn model_name(&self) -> String {
            "Fixed".to_string()
        }

        async fn insert(&self, document: Document) -> PopulateResult<Document> {
            Ok(document)
        }

        async fn execute(&self, _query: &Query) -> PopulateResult<Vec<Document>> {
            Ok(vec![doc! { n: 1 }, doc! { n: 2 }])
        }

        async fn count(&self, _filter: &Filter) -> PopulateResult<u64> {
            Ok(2)
        }

        async fn exists(&self, _filter: &Filter) -> PopulateResult<bool> {
            Ok(true)
        }

        async fn distinct(&self, _filter: &Filter, _field: &str) -> PopulateResult<Vec<Value>> {
            Ok(vec![])
        }

        async fn update_many(&self, _filter: &Filter, _update: &Update) -> PopulateResult<WriteResult> {
            Ok(WriteResult::default())
        }

        async fn delete_many(&self, _filter: &Filter) -> PopulateResult<WriteResult> {
            Ok(WriteResult::default())
        }
    }

    #[tokio::test]
    async fn test_fetch_one_takes_first() {
        let model = Model::new(FixedModel);
        let query = Query::find_one(all(), None);
        assert_eq!(model.fetch_one(&query).await.unwrap(), Some(doc! { n: 1 }));
        assert_eq!(model.fetch_many(&query).await.unwrap().len(), 2);
        assert_eq!(model.count(&all()).await.unwrap(), 2);
        assert_eq!(format!("{:?}", model), "Model(Fixed)");
    }
}
