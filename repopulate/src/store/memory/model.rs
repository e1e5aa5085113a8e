use async_trait::async_trait;
use std::cmp::Ordering;

use crate::collection::{Document, EntityId, FindOptions, Update, WriteResult};
use crate::common::{Atomic, ReadExecutor, SortOrder, Value, WriteExecutor};
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::filter::{id_of, is_all_filter, Filter};
use crate::query::{ModelProvider, Query, QueryOp};
use crate::store::memory::populate::Populator;
use crate::store::memory::selection::Selection;
use crate::store::memory::store::{collection_of, collection_of_mut, Collections, ModelCollection};
use crate::store::memory::InMemoryStoreConfig;

/// One model of an [super::InMemoryStore].
///
/// Writes happen under the store's write lock; selection and population
/// happen afterwards under a single read lock.
pub(crate) struct InMemoryModel {
    name: String,
    config: InMemoryStoreConfig,
    collections: Atomic<Collections>,
}

impl InMemoryModel {
    pub(crate) fn new(name: &str, config: InMemoryStoreConfig, collections: Atomic<Collections>) -> Self {
        InMemoryModel {
            name: name.to_string(),
            config,
            collections,
        }
    }

    fn read<R>(&self, f: impl FnOnce(&ModelCollection) -> PopulateResult<R>) -> PopulateResult<R> {
        self.collections
            .read_with(|collections| f(collection_of(collections, &self.name)?))
    }

    fn write<R>(&self, f: impl FnOnce(&mut ModelCollection) -> PopulateResult<R>) -> PopulateResult<R> {
        self.collections
            .write_with(|collections| f(collection_of_mut(collections, &self.name)?))
    }

    /// Runs the operation of `query` and returns the raw matching documents.
    fn run(&self, op: &QueryOp) -> PopulateResult<Vec<Document>> {
        match op {
            QueryOp::Find { filter, options } => self.read(|collection| {
                let found = matching(collection, filter)?;
                page(found, options)
            }),
            QueryOp::FindById(id) => self.read(|collection| Ok(collection.docs.get(id.as_str()).cloned().into_iter().collect())),
            QueryOp::FindOne(filter) => self.read(|collection| {
                let found = first_matching(collection, filter)?;
                Ok(found.and_then(|key| collection.docs.get(&key)).cloned().into_iter().collect())
            }),
            QueryOp::FindByIdAndUpdate { id, update } => {
                self.write(|collection| update_one(collection, Some(id.as_str().to_string()), update))
            }
            QueryOp::FindOneAndUpdate { filter, update } => self.write(|collection| {
                let key = first_matching(collection, filter)?;
                update_one(collection, key, update)
            }),
            QueryOp::FindByIdAndDelete(id) => {
                self.write(|collection| Ok(collection.docs.shift_remove(id.as_str()).into_iter().collect()))
            }
        }
    }

    /// Applies the selection and population plan of `query` to `documents`.
    fn shape(&self, query: &Query, documents: Vec<Document>) -> PopulateResult<Vec<Document>> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let selection = Selection::from_projection(query.selection())
            .with_paths(query.population().iter().map(|it| it.path()));
        self.collections.read_with(|collections| {
            let populator = Populator::new(collections, self.config.is_strict_populate());
            documents
                .iter()
                .map(|document| {
                    let selected = selection.apply(document)?;
                    populator.populate(&self.name, selected, query.population())
                })
                .collect()
        })
    }
}

#[async_trait]
impl ModelProvider for InMemoryModel {
    fn model_name(&self) -> String {
        self.name.clone()
    }

    async fn insert(&self, document: Document) -> PopulateResult<Document> {
        let mut document = document;
        let id = match document.id() {
            Some(id) => id,
            None => {
                let id = EntityId::new();
                document.set_id(&id);
                id
            }
        };

        self.write(|collection| {
            if collection.docs.contains_key(id.as_str()) {
                log::error!("Duplicate id {} in model {}", id, collection.schema.name());
                return Err(PopulateError::new(
                    &format!("Duplicate id {} in model {}", id, collection.schema.name()),
                    ErrorKind::UniqueConstraintViolation,
                ));
            }
            collection.docs.insert(id.to_string(), document.clone());
            Ok(document)
        })
    }

    async fn execute(&self, query: &Query) -> PopulateResult<Vec<Document>> {
        log::trace!("Executing {} on model {}", query, self.name);
        let documents = self.run(query.op())?;
        self.shape(query, documents)
    }

    async fn count(&self, filter: &Filter) -> PopulateResult<u64> {
        self.read(|collection| {
            if is_all_filter(filter) {
                return Ok(collection.docs.len() as u64);
            }
            Ok(matching_keys(collection, filter)?.len() as u64)
        })
    }

    async fn exists(&self, filter: &Filter) -> PopulateResult<bool> {
        self.read(|collection| Ok(first_matching(collection, filter)?.is_some()))
    }

    async fn distinct(&self, filter: &Filter, field: &str) -> PopulateResult<Vec<Value>> {
        self.read(|collection| {
            let mut values: Vec<Value> = Vec::new();
            for document in matching(collection, filter)? {
                let candidates = match document.get(field) {
                    Value::Null => continue,
                    Value::Array(elements) => elements,
                    value => vec![value],
                };
                for candidate in candidates {
                    if !values.contains(&candidate) {
                        values.push(candidate);
                    }
                }
            }
            Ok(values)
        })
    }

    async fn update_many(&self, filter: &Filter, update: &Update) -> PopulateResult<WriteResult> {
        self.write(|collection| {
            let keys = matching_keys(collection, filter)?;
            let mut affected = 0;
            for key in &keys {
                if let Some(document) = collection.docs.get_mut(key) {
                    let updated = update.apply_to(document)?;
                    if updated != *document {
                        *document = updated;
                        affected += 1;
                    }
                }
            }
            Ok(WriteResult::new(keys.len() as u64, affected))
        })
    }

    async fn delete_many(&self, filter: &Filter) -> PopulateResult<WriteResult> {
        self.write(|collection| {
            let keys = matching_keys(collection, filter)?;
            for key in &keys {
                collection.docs.shift_remove(key);
            }
            Ok(WriteResult::new(keys.len() as u64, keys.len() as u64))
        })
    }
}

fn matching_keys(collection: &ModelCollection, filter: &Filter) -> PopulateResult<Vec<String>> {
    if let Some(id) = id_of(filter) {
        return Ok(collection
            .docs
            .get_key_value(id.as_str())
            .map(|(key, _)| key.clone())
            .into_iter()
            .collect());
    }

    let mut keys = Vec::new();
    for (key, document) in &collection.docs {
        if filter.apply(document)? {
            keys.push(key.clone());
        }
    }
    Ok(keys)
}

fn first_matching(collection: &ModelCollection, filter: &Filter) -> PopulateResult<Option<String>> {
    if id_of(filter).is_some() {
        return Ok(matching_keys(collection, filter)?.into_iter().next());
    }

    for (key, document) in &collection.docs {
        if filter.apply(document)? {
            return Ok(Some(key.clone()));
        }
    }
    Ok(None)
}

fn matching<'a>(collection: &'a ModelCollection, filter: &Filter) -> PopulateResult<Vec<&'a Document>> {
    Ok(matching_keys(collection, filter)?
        .iter()
        .filter_map(|key| collection.docs.get(key))
        .collect())
}

fn update_one(collection: &mut ModelCollection, key: Option<String>, update: &Update) -> PopulateResult<Vec<Document>> {
    let document = match key.and_then(|key| collection.docs.get_mut(&key)) {
        Some(document) => document,
        None => return Ok(Vec::new()),
    };
    *document = update.apply_to(document)?;
    Ok(vec![document.clone()])
}

/// Sorts, skips and limits matches.
///
/// A limit of zero means no limit and a negative limit counts as its
/// absolute value; a negative skip is rejected.
fn page(mut found: Vec<&Document>, options: &FindOptions) -> PopulateResult<Vec<Document>> {
    if let Some(sort) = options.sort_spec() {
        found.sort_by(|a, b| {
            sort.iter()
                .map(|(field, order)| {
                    let ordering = a.get(field).cmp(&b.get(field));
                    match order {
                        SortOrder::Ascending => ordering,
                        SortOrder::Descending => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    let skip = match options.skip_value() {
        Some(skip) if skip < 0 => {
            log::error!("Skip must not be negative, found {}", skip);
            return Err(PopulateError::new(
                &format!("Skip must not be negative, found {}", skip),
                ErrorKind::ValidationError,
            ));
        }
        Some(skip) => skip as usize,
        None => 0,
    };
    let limit = match options.limit_value() {
        None | Some(0) => usize::MAX,
        Some(limit) => limit.unsigned_abs() as usize,
    };

    Ok(found.into_iter().skip(skip).take(limit).cloned().collect())
}
