use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, PopulateError, PopulateResult};
use crate::query::PopulateOptions;
use crate::store::memory::selection::Selection;
use crate::store::memory::store::{collection_of, Collections};

/// Resolves population plans against a snapshot of the store.
pub(crate) struct Populator<'a> {
    collections: &'a Collections,
    strict: bool,
}

impl<'a> Populator<'a> {
    pub(crate) fn new(collections: &'a Collections, strict: bool) -> Self {
        Populator { collections, strict }
    }

    /// Replaces every planned relation field of `document` with the
    /// referenced document(s), recursing into each clause's children.
    pub(crate) fn populate(
        &self,
        model_name: &str,
        mut document: Document,
        plan: &[PopulateOptions],
    ) -> PopulateResult<Document> {
        let schema = &collection_of(self.collections, model_name)?.schema;

        for options in plan {
            let target = match schema.reference_target(options.path()) {
                Some(target) => target,
                None if self.strict => {
                    log::error!(
                        "Cannot populate path {} of model {}, it is not a declared relation",
                        options.path(),
                        model_name
                    );
                    return Err(PopulateError::new(
                        &format!(
                            "Cannot populate path {} of model {}, it is not a declared relation",
                            options.path(),
                            model_name
                        ),
                        ErrorKind::InvalidFieldName,
                    ));
                }
                None => {
                    log::warn!(
                        "Skipping population of undeclared path {} of model {}",
                        options.path(),
                        model_name
                    );
                    continue;
                }
            };

            let resolved = match document.get(options.path()) {
                Value::Null => continue,
                Value::Array(references) => {
                    let mut found = Vec::with_capacity(references.len());
                    for reference in &references {
                        match reference {
                            Value::String(_) => {
                                if let Some(referenced) = self.resolve(target, reference, options)? {
                                    found.push(Value::Document(referenced));
                                }
                            }
                            other => found.push(other.clone()),
                        }
                    }
                    Value::Array(found)
                }
                reference @ Value::String(_) => match self.resolve(target, &reference, options)? {
                    Some(referenced) => Value::Document(referenced),
                    None => Value::Null,
                },
                // already a document, or not a reference at all
                _ => continue,
            };
            document.put(options.path(), resolved)?;
        }
        Ok(document)
    }

    fn resolve(&self, target: &str, reference: &Value, options: &PopulateOptions) -> PopulateResult<Option<Document>> {
        let id = match reference.as_entity_id() {
            Some(id) => id,
            None => return Ok(None),
        };

        let referenced = match collection_of(self.collections, target)?.docs.get(id.as_str()) {
            Some(referenced) => referenced,
            None => {
                log::debug!("Reference {} to {} is dangling", id, target);
                return Ok(None);
            }
        };

        let selection = Selection::parse(options.selection())
            .with_paths(options.nested().iter().map(PopulateOptions::path));
        let selected = selection.apply(referenced)?;
        self.populate(target, selected, options.nested()).map(Some)
    }
}
