use std::any::Any;
use std::cmp::Ordering;
use std::fmt::Display;

use crate::collection::Document;
use crate::common::Value;
use crate::errors::PopulateResult;

use super::FilterProvider;

/// Matches when `value` equals `target`, or `value` is an array holding it.
fn matches_value(value: &Value, target: &Value) -> bool {
    if value == target {
        return true;
    }
    match value {
        Value::Array(values) => values.iter().any(|it| it == target),
        _ => false,
    }
}

pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> PopulateResult<bool> {
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        EqualsFilter {
            field_name,
            field_value,
        }
    }

    pub(crate) fn field_name(&self) -> &str {
        &self.field_name
    }

    pub(crate) fn field_value(&self) -> &Value {
        &self.field_value
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        let value = entry.get(&self.field_name);
        Ok(matches_value(&value, &self.field_value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) struct NotEqualsFilter {
    field_name: String,
    field_value: Value,
}

impl NotEqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        NotEqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field_name, self.field_value)
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        let value = entry.get(&self.field_name);
        Ok(!matches_value(&value, &self.field_value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The comparison a [ComparisonFilter] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::Greater => write!(f, ">"),
            ComparisonMode::GreaterEqual => write!(f, ">="),
            ComparisonMode::Lesser => write!(f, "<"),
            ComparisonMode::LesserEqual => write!(f, "<="),
        }
    }
}

/// Compares a field against a value of the same type family.
///
/// Numbers compare with numbers and strings with strings; values of other
/// type families never match. Array fields match when any element does.
pub(crate) struct ComparisonFilter {
    field_name: String,
    field_value: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    pub(crate) fn new(field_name: String, field_value: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field_name,
            field_value,
            mode,
        }
    }

    fn compare(&self, value: &Value) -> bool {
        let comparable = (value.is_number() && self.field_value.is_number())
            || (value.is_string() && self.field_value.is_string());
        comparable && self.mode.accepts(value.cmp(&self.field_value))
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.field_name, self.mode, self.field_value)
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        match entry.get(&self.field_name) {
            Value::Array(values) => Ok(values.iter().any(|it| self.compare(it))),
            value => Ok(self.compare(&value)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) struct InFilter {
    field_name: String,
    field_values: Vec<Value>,
}

impl InFilter {
    pub(crate) fn new(field_name: String, field_values: Vec<Value>) -> Self {
        InFilter {
            field_name,
            field_values,
        }
    }
}

impl Display for InFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} in {})", self.field_name, Value::Array(self.field_values.clone()))
    }
}

impl FilterProvider for InFilter {
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        let value = entry.get(&self.field_name);
        Ok(self.field_values.iter().any(|it| matches_value(&value, it)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) struct NotInFilter {
    field_name: String,
    field_values: Vec<Value>,
}

impl NotInFilter {
    pub(crate) fn new(field_name: String, field_values: Vec<Value>) -> Self {
        NotInFilter {
            field_name,
            field_values,
        }
    }
}

impl Display for NotInFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} not in {})", self.field_name, Value::Array(self.field_values.clone()))
    }
}

impl FilterProvider for NotInFilter {
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        let value = entry.get(&self.field_name);
        Ok(!self.field_values.iter().any(|it| matches_value(&value, it)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub(crate) struct ExistsFilter {
    field_name: String,
    exists: bool,
}

impl ExistsFilter {
    pub(crate) fn new(field_name: String, exists: bool) -> Self {
        ExistsFilter { field_name, exists }
    }
}

impl Display for ExistsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} exists {})", self.field_name, self.exists)
    }
}

impl FilterProvider for ExistsFilter {
    fn apply(&self, entry: &Document) -> PopulateResult<bool> {
        Ok(entry.contains_field(&self.field_name) == self.exists)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::doc;
    use crate::filter::field;

    #[test]
    fn test_equals_scalar_and_array() {
        let doc = doc! { title: "a", todos: ["t1", "t2"], count: 3 };
        assert!(field("title").eq("a").apply(&doc).unwrap());
        assert!(field("todos").eq("t2").apply(&doc).unwrap());
        assert!(field("count").eq(3.0).apply(&doc).unwrap());
        assert!(!field("todos").eq("t3").apply(&doc).unwrap());
        assert!(field("missing").eq(()).apply(&doc).unwrap());
    }

    #[test]
    fn test_not_equals() {
        let doc = doc! { title: "a", todos: ["t1"] };
        assert!(field("title").ne("b").apply(&doc).unwrap());
        assert!(!field("todos").ne("t1").apply(&doc).unwrap());
    }

    #[test]
    fn test_comparisons() {
        let doc = doc! { age: 30, name: "m", scores: [1, 9] };
        assert!(field("age").gt(29).apply(&doc).unwrap());
        assert!(field("age").gte(30).apply(&doc).unwrap());
        assert!(!field("age").lt(30).apply(&doc).unwrap());
        assert!(field("age").lte(30.5).apply(&doc).unwrap());
        assert!(field("name").gt("a").apply(&doc).unwrap());
        assert!(field("scores").gt(5).apply(&doc).unwrap());
        // different type families never match
        assert!(!field("name").gt(1).apply(&doc).unwrap());
        assert!(!field("missing").lt(100).apply(&doc).unwrap());
    }

    #[test]
    fn test_in_and_not_in() {
        let doc = doc! { status: "open", tags: ["x", "y"] };
        assert!(field("status").in_array(vec!["open", "closed"]).apply(&doc).unwrap());
        assert!(field("tags").in_array(vec!["y"]).apply(&doc).unwrap());
        assert!(!field("status").not_in_array(vec!["open"]).apply(&doc).unwrap());
        assert!(field("status").not_in_array(vec!["done"]).apply(&doc).unwrap());
    }

    #[test]
    fn test_exists() {
        let doc = doc! { a: { b: 1 } };
        assert!(field("a.b").exists(true).apply(&doc).unwrap());
        assert!(field("c").exists(false).apply(&doc).unwrap());
        assert!(!field("c").exists(true).apply(&doc).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", field("a").eq(1)), "(a == 1)");
        assert_eq!(format!("{}", field("a").gte(2)), "(a >= 2)");
    }
}
