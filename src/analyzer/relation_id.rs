use std::fmt;

use crate::tree::NodeId;

/// Identity of a relation node. Two equal-looking subqueries are two relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(NodeId);

impl RelationId {
    pub fn of(node: NodeId) -> Self {
        Self(node)
    }

    pub fn source_node(&self) -> NodeId {
        self.0
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relation {}", self.0)
    }
}

/// Position `field_index` in the row type of `relation_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    relation_id: RelationId,
    field_index: usize,
}

impl FieldId {
    pub fn new(relation_id: RelationId, field_index: usize) -> Self {
        Self { relation_id, field_index }
    }

    pub fn of(node: NodeId, field_index: usize) -> Self {
        Self::new(RelationId::of(node), field_index)
    }

    pub fn relation_id(&self) -> RelationId {
        self.relation_id
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }
}
