use crate::collection::Document;
use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, PopulateError, PopulateResult};

#[derive(Debug, Clone, PartialEq)]
enum UpdateOp {
    Set(String, Value),
    Unset(String),
    Inc(String, Value),
    Push(String, Value),
    Pull(String, Value),
}

impl UpdateOp {
    fn field(&self) -> &str {
        match self {
            UpdateOp::Set(field, _)
            | UpdateOp::Unset(field)
            | UpdateOp::Inc(field, _)
            | UpdateOp::Push(field, _)
            | UpdateOp::Pull(field, _) => field,
        }
    }
}

/// A description of changes to apply to matching documents.
///
/// Operations are applied in the order they were added. The `_id` field is
/// immutable and cannot be the target of any operation.
///
/// ```rust,ignore
/// use repopulate::collection::Update;
///
/// let update = Update::new()
///     .set("title", "Buy milk")
///     .inc("version", 1)
///     .push("comments", comment_id);
/// ```
///
/// A [Document] converts into an update that sets each of its fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    operations: Vec<UpdateOp>,
}

impl Update {
    pub fn new() -> Self {
        Update::default()
    }

    /// Sets `field` to `value`, creating intermediate documents as needed.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.operations.push(UpdateOp::Set(field.to_string(), value.into()));
        self
    }

    /// Removes `field`.
    pub fn unset(mut self, field: &str) -> Self {
        self.operations.push(UpdateOp::Unset(field.to_string()));
        self
    }

    /// Adds `amount` to a numeric field; a missing field is set to `amount`.
    pub fn inc(mut self, field: &str, amount: impl Into<Value>) -> Self {
        self.operations.push(UpdateOp::Inc(field.to_string(), amount.into()));
        self
    }

    /// Appends `value` to an array field; a missing field becomes `[value]`.
    pub fn push(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.operations.push(UpdateOp::Push(field.to_string(), value.into()));
        self
    }

    /// Removes every element equal to `value` from an array field.
    pub fn pull(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.operations.push(UpdateOp::Pull(field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Applies this update to a copy of `document` and returns the copy.
    pub fn apply_to(&self, document: &Document) -> PopulateResult<Document> {
        let mut updated = document.clone();
        for operation in &self.operations {
            if operation.field() == DOC_ID {
                log::error!("Document id is immutable and cannot be updated");
                return Err(PopulateError::new(
                    "Document id is immutable and cannot be updated",
                    ErrorKind::InvalidOperation,
                ));
            }

            match operation {
                UpdateOp::Set(field, value) => updated.put(field, value.clone())?,
                UpdateOp::Unset(field) => updated.remove(field)?,
                UpdateOp::Inc(field, amount) => {
                    let current = updated.get(field);
                    let value = increment(field, &current, amount)?;
                    updated.put(field, value)?;
                }
                UpdateOp::Push(field, value) => match updated.get(field) {
                    Value::Null => updated.put(field, Value::Array(vec![value.clone()]))?,
                    Value::Array(mut values) => {
                        values.push(value.clone());
                        updated.put(field, Value::Array(values))?;
                    }
                    other => return Err(not_an_array(field, &other)),
                },
                UpdateOp::Pull(field, value) => match updated.get(field) {
                    Value::Null => {}
                    Value::Array(mut values) => {
                        values.retain(|it| it != value);
                        updated.put(field, Value::Array(values))?;
                    }
                    other => return Err(not_an_array(field, &other)),
                },
            }
        }
        Ok(updated)
    }
}

fn increment(field: &str, current: &Value, amount: &Value) -> PopulateResult<Value> {
    match (current, amount) {
        (Value::Null, amount) if amount.is_number() => Ok(amount.clone()),
        (Value::I64(a), Value::I64(b)) => Ok(Value::I64(a.wrapping_add(*b))),
        (current, amount) if current.is_number() && amount.is_number() => {
            let sum = current.as_number().unwrap_or_default() + amount.as_number().unwrap_or_default();
            Ok(Value::F64(sum))
        }
        _ => {
            log::error!("Cannot increment field {} holding {} by {}", field, current, amount);
            Err(PopulateError::new(
                &format!("Cannot increment field {} holding {} by {}", field, current, amount),
                ErrorKind::InvalidDataType,
            ))
        }
    }
}

fn not_an_array(field: &str, value: &Value) -> PopulateError {
    log::error!("Field {} holds {} which is not an array", field, value);
    PopulateError::new(
        &format!("Field {} holds {} which is not an array", field, value),
        ErrorKind::InvalidDataType,
    )
}

impl From<Document> for Update {
    fn from(document: Document) -> Self {
        let operations = document
            .iter()
            .map(|(key, value)| UpdateOp::Set(key.clone(), value.clone()))
            .collect();
        Update { operations }
    }
}
