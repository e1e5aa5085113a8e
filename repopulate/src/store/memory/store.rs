use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::collection::Document;
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::query::Model;
use crate::store::memory::model::InMemoryModel;
use crate::store::memory::InMemoryStoreConfig;
use crate::store::ModelSchema;

/// The documents of one registered model, keyed by id in insertion order.
pub(crate) struct ModelCollection {
    pub(crate) schema: ModelSchema,
    pub(crate) docs: IndexMap<String, Document>,
}

pub(crate) type Collections = HashMap<String, ModelCollection>;

pub(crate) fn collection_of<'a>(collections: &'a Collections, name: &str) -> PopulateResult<&'a ModelCollection> {
    match collections.get(name) {
        Some(collection) => Ok(collection),
        None => {
            log::error!("Model {} is not registered", name);
            Err(PopulateError::new(
                &format!("Model {} is not registered", name),
                ErrorKind::ModelNotFound,
            ))
        }
    }
}

pub(crate) fn collection_of_mut<'a>(
    collections: &'a mut Collections,
    name: &str,
) -> PopulateResult<&'a mut ModelCollection> {
    match collections.get_mut(name) {
        Some(collection) => Ok(collection),
        None => {
            log::error!("Model {} is not registered", name);
            Err(PopulateError::new(
                &format!("Model {} is not registered", name),
                ErrorKind::ModelNotFound,
            ))
        }
    }
}

/// An in-memory document store.
///
/// Models are registered with a [ModelSchema] declaring their relation
/// fields, and handed out as [Model]s for repositories to use. All models of
/// a store share one lock, so population always reads a consistent
/// snapshot.
///
/// ```text
/// let store = InMemoryStore::new(InMemoryStoreConfig::new());
/// let users = store.register(ModelSchema::new("User").reference("todos", "Todo"))?;
/// let todos = store.register(ModelSchema::new("Todo"))?;
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    pub fn new(config: InMemoryStoreConfig) -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner {
                config,
                collections: atomic(HashMap::new()),
            }),
        }
    }

    /// Registers a model and returns a handle to it.
    ///
    /// Registering an existing name keeps its documents and replaces its
    /// schema.
    pub fn register(&self, schema: ModelSchema) -> PopulateResult<Model> {
        self.inner.register(schema)
    }

    /// Looks up a registered model.
    ///
    /// # Errors
    ///
    /// `ModelNotFound` when no model of that name is registered.
    pub fn model(&self, name: &str) -> PopulateResult<Model> {
        self.inner.model(name)
    }

    pub fn model_names(&self) -> Vec<String> {
        self.inner.collections.read_with(|collections| {
            let mut names: Vec<String> = collections.keys().cloned().collect();
            names.sort();
            names
        })
    }

    pub fn config(&self) -> &InMemoryStoreConfig {
        &self.inner.config
    }
}

struct InMemoryStoreInner {
    config: InMemoryStoreConfig,
    collections: Atomic<Collections>,
}

impl InMemoryStoreInner {
    fn register(&self, schema: ModelSchema) -> PopulateResult<Model> {
        if schema.name().trim().is_empty() {
            log::error!("Model name cannot be empty");
            return Err(PopulateError::new(
                "Model name cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        let name = schema.name().to_string();
        self.collections.write_with(|collections| match collections.get_mut(&name) {
            Some(collection) => {
                if collection.schema != schema {
                    log::debug!("Replacing schema of model {}", name);
                }
                collection.schema = schema;
            }
            None => {
                log::debug!("Registering model {}", name);
                collections.insert(
                    name.clone(),
                    ModelCollection {
                        schema,
                        docs: IndexMap::new(),
                    },
                );
            }
        });
        Ok(self.create_model(&name))
    }

    fn model(&self, name: &str) -> PopulateResult<Model> {
        self.collections
            .read_with(|collections| collection_of(collections, name).map(|_| ()))?;
        Ok(self.create_model(name))
    }

    fn create_model(&self, name: &str) -> Model {
        Model::new(InMemoryModel::new(
            name,
            self.config.clone(),
            self.collections.clone(),
        ))
    }
}
