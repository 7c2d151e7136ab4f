use crate::tree::{Identifier, NodeId, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ordering {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullOrdering {
    First,
    Last,
    #[default]
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub sort_key: NodeId,
    pub ordering: Ordering,
    pub null_ordering: NullOrdering,
}

impl SortItem {
    pub fn ascending(sort_key: NodeId) -> Self {
        Self { sort_key, ordering: Ordering::Ascending, null_ordering: NullOrdering::Undefined }
    }

    pub fn descending(sort_key: NodeId) -> Self {
        Self { sort_key, ordering: Ordering::Descending, null_ordering: NullOrdering::Undefined }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBy {
    pub sort_items: Vec<SortItem>,
}

impl OrderBy {
    pub fn new(sort_items: Vec<SortItem>) -> Self {
        Self { sort_items }
    }

    pub fn sort_keys(&self) -> Vec<NodeId> {
        self.sort_items.iter().map(|item| item.sort_key).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupingElement {
    Simple(Vec<NodeId>),
    Cube(Vec<NodeId>),
    Rollup(Vec<NodeId>),
    GroupingSets(Vec<Vec<NodeId>>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupBy {
    pub distinct: bool,
    pub elements: Vec<GroupingElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Single { expression: NodeId, alias: Option<Identifier> },
    /// `*` or `prefix.*`
    AllColumns { prefix: Option<QualifiedName> },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub distinct: bool,
    pub items: Vec<SelectItem>,
}

/// One `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... ORDER BY` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpecification {
    pub select: Select,
    pub from: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    pub group_by: Option<GroupBy>,
    pub having: Option<NodeId>,
    pub order_by: Option<OrderBy>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithQuery {
    pub name: Identifier,
    /// points at a `Query` node
    pub query: NodeId,
    pub column_names: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct With {
    pub recursive: bool,
    pub queries: Vec<WithQuery>,
}

/// A full query: optional `WITH`, a body relation, and the trailing
/// `ORDER BY`/`OFFSET`/`LIMIT` that apply to the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub with: Option<With>,
    pub body: NodeId,
    pub order_by: Option<OrderBy>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl Query {
    pub fn of(body: NodeId) -> Self {
        Self { with: None, body, order_by: None, offset: None, limit: None }
    }
}
