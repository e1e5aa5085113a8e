/// The outcome of a bulk write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteResult {
    matched: u64,
    affected: u64,
}

impl WriteResult {
    pub fn new(matched: u64, affected: u64) -> Self {
        Self { matched, affected }
    }

    /// Number of documents the filter matched.
    pub fn matched_count(&self) -> u64 {
        self.matched
    }

    /// Number of documents actually modified or removed.
    pub fn affected_count(&self) -> u64 {
        self.affected
    }
}
