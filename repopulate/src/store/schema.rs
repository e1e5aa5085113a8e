use indexmap::IndexMap;

/// Describes one model registered in a store: its name and the fields that
/// reference other models.
///
/// ```rust,ignore
/// let schema = ModelSchema::new("User").reference("todos", "Todo");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    references: IndexMap<String, String>,
}

impl ModelSchema {
    pub fn new(name: &str) -> Self {
        ModelSchema {
            name: name.to_string(),
            references: IndexMap::new(),
        }
    }

    /// Declares `field` as holding the id (or an array of ids) of `target`
    /// documents.
    pub fn reference(mut self, field: &str, target: &str) -> Self {
        self.references.insert(field.to_string(), target.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model referenced by `field`, if it is a relation field.
    pub fn reference_target(&self, field: &str) -> Option<&str> {
        self.references.get(field).map(String::as_str)
    }

    pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.references
            .iter()
            .map(|(field, target)| (field.as_str(), target.as_str()))
    }
}
