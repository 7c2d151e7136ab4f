use crate::tree::{Identifier, NodeId, QualifiedName, QuerySpecification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Cross,
    Inner,
    Left,
    Right,
    Full,
    Implicit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCriteria {
    /// points at a boolean expression
    On(NodeId),
    /// points at `Identifier` expressions
    Using(Vec<NodeId>),
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    Bernoulli,
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    QuerySpecification(QuerySpecification),
    /// Named table, view or reference to a `WITH` query.
    Table { name: QualifiedName },
    /// `( query )` in a FROM clause; points at a `Query` node.
    TableSubquery { query: NodeId },
    Aliased { relation: NodeId, alias: Identifier, column_names: Vec<Identifier> },
    Sampled { relation: NodeId, sample_type: SampleType, sample_percentage: NodeId },
    /// `LATERAL ( query )`; points at a `Query` node.
    Lateral { query: NodeId },
    Join { join_type: JoinType, left: NodeId, right: NodeId, criteria: Option<JoinCriteria> },
    Union { relations: Vec<NodeId>, distinct: bool },
    Intersect { relations: Vec<NodeId>, distinct: bool },
    Except { left: NodeId, right: NodeId, distinct: bool },
    Unnest { expressions: Vec<NodeId>, with_ordinality: bool },
    /// `VALUES` rows; each row is an expression (usually a `Row`).
    Values { rows: Vec<NodeId> },
}

impl Relation {
    pub fn kind(&self) -> &'static str {
        match self {
            Relation::QuerySpecification(_) => "QuerySpecification",
            Relation::Table { .. } => "Table",
            Relation::TableSubquery { .. } => "TableSubquery",
            Relation::Aliased { .. } => "AliasedRelation",
            Relation::Sampled { .. } => "SampledRelation",
            Relation::Lateral { .. } => "Lateral",
            Relation::Join { .. } => "Join",
            Relation::Union { .. } => "Union",
            Relation::Intersect { .. } => "Intersect",
            Relation::Except { .. } => "Except",
            Relation::Unnest { .. } => "Unnest",
            Relation::Values { .. } => "Values",
        }
    }
}
