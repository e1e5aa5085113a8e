/// Configuration for an [super::InMemoryStore].
///
/// ```text
/// let config = InMemoryStoreConfig::new().strict_populate(false);
/// let store = InMemoryStore::new(config);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStoreConfig {
    strict_populate: bool,
}

impl InMemoryStoreConfig {
    pub fn new() -> InMemoryStoreConfig {
        InMemoryStoreConfig {
            strict_populate: true,
        }
    }

    /// When set (the default), populating a path the schema does not declare
    /// as a relation fails with `InvalidFieldName`; otherwise the path is
    /// skipped with a warning.
    pub fn strict_populate(mut self, strict: bool) -> Self {
        self.strict_populate = strict;
        self
    }

    pub fn is_strict_populate(&self) -> bool {
        self.strict_populate
    }
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        InMemoryStoreConfig::new()
    }
}
