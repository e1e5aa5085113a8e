use crate::collection::Document;
use crate::common::{DOC_ID, EXCLUDE_PREFIX, INCLUDE_PREFIX};
use crate::errors::PopulateResult;
use crate::projection::Projection;

/// A resolved field selection, ready to apply to stored documents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selection {
    All,
    /// Only the named fields, plus `_id` when `id` is set.
    Include { fields: Vec<String>, id: bool },
    /// Every field except the named ones.
    Exclude(Vec<String>),
}

impl Selection {
    /// Resolves a root projection. No projection, or an empty one, selects
    /// every field.
    pub(crate) fn from_projection(projection: Option<&Projection>) -> Selection {
        match projection {
            None => Selection::All,
            Some(projection) => {
                Selection::from_flags(projection.iter().map(|(field, flag)| (field, flag.is_truthy())))
            }
        }
    }

    /// Resolves a selection string such as `"title -done"`.
    ///
    /// `None` selects every field and `""` only the identifier. A `-` prefix
    /// excludes a field, a `+` prefix (or none) includes it.
    pub(crate) fn parse(select: Option<&str>) -> Selection {
        let select = match select {
            None => return Selection::All,
            Some(select) => select.trim(),
        };
        if select.is_empty() {
            return Selection::Include {
                fields: Vec::new(),
                id: true,
            };
        }

        Selection::from_flags(select.split_whitespace().map(|token| {
            if let Some(field) = token.strip_prefix(EXCLUDE_PREFIX) {
                (field, false)
            } else if let Some(field) = token.strip_prefix(INCLUDE_PREFIX) {
                (field, true)
            } else {
                (token, true)
            }
        }))
    }

    fn from_flags<'a>(flags: impl Iterator<Item = (&'a str, bool)>) -> Selection {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();
        let mut id = None;

        for (field, include) in flags {
            if field.is_empty() {
                continue;
            }
            if field == DOC_ID {
                id = Some(include);
            } else if include {
                includes.push(field.to_string());
            } else {
                excludes.push(field.to_string());
            }
        }

        if !includes.is_empty() {
            if !excludes.is_empty() {
                log::warn!(
                    "Ignoring exclusions {:?} in an inclusive selection of {:?}",
                    excludes,
                    includes
                );
            }
            return Selection::Include {
                fields: includes,
                id: id != Some(false),
            };
        }

        if id == Some(false) {
            excludes.push(DOC_ID.to_string());
        }
        match (excludes.is_empty(), id) {
            (true, Some(true)) => Selection::Include {
                fields: Vec::new(),
                id: true,
            },
            (true, _) => Selection::All,
            (false, _) => Selection::Exclude(excludes),
        }
    }

    /// Makes sure an inclusive selection keeps the given relation paths.
    pub(crate) fn with_paths<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Selection {
        match self {
            Selection::Include { mut fields, id } => {
                for path in paths {
                    if !fields.iter().any(|it| it == path) {
                        fields.push(path.to_string());
                    }
                }
                Selection::Include { fields, id }
            }
            other => other,
        }
    }

    pub(crate) fn apply(&self, document: &Document) -> PopulateResult<Document> {
        match self {
            Selection::All => Ok(document.clone()),
            Selection::Include { fields, id } => {
                let mut selected = Document::new();
                if *id {
                    if let Some(doc_id) = document.id() {
                        selected.set_id(&doc_id);
                    }
                }
                for field in fields {
                    let value = document.get(field);
                    if !value.is_null() {
                        selected.put(field, value)?;
                    }
                }
                Ok(selected)
            }
            Selection::Exclude(fields) => {
                let mut selected = document.clone();
                for field in fields {
                    selected.remove(field)?;
                }
                Ok(selected)
            }
        }
    }
}
