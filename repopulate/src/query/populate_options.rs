use std::fmt::{Display, Formatter};

/// One population clause: which relation to resolve and how.
///
/// `select` follows store selection-string conventions: `None` returns every
/// field, `""` only the identifier, otherwise space-separated field names
/// where a `-` prefix excludes the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateOptions {
    path: String,
    select: Option<String>,
    populate: Vec<PopulateOptions>,
    lean: bool,
}

impl PopulateOptions {
    pub fn new(path: &str) -> Self {
        PopulateOptions {
            path: path.to_string(),
            select: None,
            populate: Vec::new(),
            lean: false,
        }
    }

    pub fn select(mut self, select: Option<String>) -> Self {
        self.select = select;
        self
    }

    /// Adds a nested population clause, resolved on the populated documents.
    pub fn populate(mut self, child: PopulateOptions) -> Self {
        self.populate.push(child);
        self
    }

    pub fn children(mut self, children: Vec<PopulateOptions>) -> Self {
        self.populate = children;
        self
    }

    pub fn lean(mut self, lean: bool) -> Self {
        self.lean = lean;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn selection(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn nested(&self) -> &[PopulateOptions] {
        &self.populate
    }

    pub fn is_lean(&self) -> bool {
        self.lean
    }
}

impl Display for PopulateOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(select) = &self.select {
            write!(f, "[{:?}]", select)?;
        }
        if !self.populate.is_empty() {
            write!(f, " -> (")?;
            for (index, child) in self.populate.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
