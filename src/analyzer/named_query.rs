use crate::tree::NodeId;

/// What a `Table` reference resolved to when it is not a plain table:
/// either a `WITH` query or a view definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedQuery {
    /// points at a `Query` node
    pub query: NodeId,
    pub from_view: bool,
}

impl NamedQuery {
    pub fn with_query(query: NodeId) -> Self {
        Self { query, from_view: false }
    }

    pub fn view(query: NodeId) -> Self {
        Self { query, from_view: true }
    }
}
