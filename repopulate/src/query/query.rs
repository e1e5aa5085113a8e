use std::fmt::{Display, Formatter};

use crate::collection::{EntityId, FindOptions, Update};
use crate::filter::Filter;
use crate::projection::Projection;
use crate::query::PopulateOptions;

/// The store operation a [Query] runs.
#[derive(Debug, Clone)]
pub enum QueryOp {
    /// All documents matching the filter, paged and sorted.
    Find { filter: Filter, options: FindOptions },
    FindById(EntityId),
    /// The first document matching the filter.
    FindOne(Filter),
    /// Applies the update and returns the updated document.
    FindByIdAndUpdate { id: EntityId, update: Update },
    /// Applies the update to the first match and returns the updated document.
    FindOneAndUpdate { filter: Filter, update: Update },
    /// Removes the document and returns it.
    FindByIdAndDelete(EntityId),
}

impl QueryOp {
    /// `true` for operations that yield at most one document.
    pub fn is_singular(&self) -> bool {
        !matches!(self, QueryOp::Find { .. })
    }
}

impl Display for QueryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryOp::Find { filter, options } => write!(f, "find({}, {:?})", filter, options),
            QueryOp::FindById(id) => write!(f, "findById({})", id),
            QueryOp::FindOne(filter) => write!(f, "findOne({})", filter),
            QueryOp::FindByIdAndUpdate { id, .. } => write!(f, "findByIdAndUpdate({})", id),
            QueryOp::FindOneAndUpdate { filter, .. } => write!(f, "findOneAndUpdate({})", filter),
            QueryOp::FindByIdAndDelete(id) => write!(f, "findByIdAndDelete({})", id),
        }
    }
}

/// A description of one store call.
///
/// A query carries the operation, the field selection for the root
/// documents, the population plan applied to them and whether results come
/// back as detached (lean) documents.
///
/// ```rust,ignore
/// let query = Query::find_by_id(id, Some(projection! { title: true }))
///     .populate(PopulateOptions::new("comments").select(Some("text".into())))
///     .lean();
/// let todo = model.fetch_one(&query).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    op: QueryOp,
    selection: Option<Projection>,
    populate: Vec<PopulateOptions>,
    lean: bool,
}

impl Query {
    pub fn new(op: QueryOp, selection: Option<Projection>) -> Self {
        Query {
            op,
            selection,
            populate: Vec::new(),
            lean: false,
        }
    }

    pub fn find(filter: Filter, options: FindOptions, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::Find { filter, options }, selection)
    }

    pub fn find_by_id(id: EntityId, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::FindById(id), selection)
    }

    pub fn find_one(filter: Filter, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::FindOne(filter), selection)
    }

    pub fn find_by_id_and_update(id: EntityId, update: Update, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::FindByIdAndUpdate { id, update }, selection)
    }

    pub fn find_one_and_update(filter: Filter, update: Update, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::FindOneAndUpdate { filter, update }, selection)
    }

    pub fn find_by_id_and_delete(id: EntityId, selection: Option<Projection>) -> Self {
        Query::new(QueryOp::FindByIdAndDelete(id), selection)
    }

    /// Appends a population clause.
    pub fn populate(mut self, options: PopulateOptions) -> Self {
        self.populate.push(options);
        self
    }

    /// Appends a population clause for `path` with an optional selection.
    pub fn populate_path(self, path: &str, select: Option<String>) -> Self {
        self.populate(PopulateOptions::new(path).select(select))
    }

    /// Marks the query to return detached documents.
    pub fn lean(mut self) -> Self {
        self.lean = true;
        self
    }

    pub fn op(&self) -> &QueryOp {
        &self.op
    }

    pub fn selection(&self) -> Option<&Projection> {
        self.selection.as_ref()
    }

    pub fn population(&self) -> &[PopulateOptions] {
        &self.populate
    }

    pub fn is_lean(&self) -> bool {
        self.lean
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(selection) = &self.selection {
            write!(f, " select {}", selection)?;
        }
        for options in &self.populate {
            write!(f, " populate {}", options)?;
        }
        if self.lean {
            write!(f, " lean")?;
        }
        Ok(())
    }
}
