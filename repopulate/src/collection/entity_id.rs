use std::fmt::{Debug, Display};
use uuid::Uuid;

/// A unique identifier for a stored entity.
///
/// Identifiers are opaque strings. The in-memory store generates random
/// UUIDs, but any non-empty string supplied by the caller is accepted.
///
/// ```rust,ignore
/// use repopulate::collection::EntityId;
///
/// let generated = EntityId::new();
/// let known = EntityId::from("5f1d7a");
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a new random identifier.
    pub fn new() -> Self {
        EntityId(Uuid::new_v4().simple().to_string())
    }

    /// Returns `true` when the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::new()
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId(value)
    }
}

impl From<&EntityId> for EntityId {
    fn from(value: &EntityId) -> Self {
        value.clone()
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// Returns `true` when both identifiers are present, non-blank and equal.
pub fn compare_ids(first: Option<&EntityId>, second: Option<&EntityId>) -> bool {
    match (first, second) {
        (Some(a), Some(b)) if !a.is_blank() && !b.is_blank() => a == b,
        _ => false,
    }
}
