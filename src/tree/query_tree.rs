use crate::tree::{Expression, Identifier, Literal, NodeId, QualifiedName, Query, Relation};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Query(Query),
    Relation(Relation),
    Expression(Expression),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Query(_) => "Query",
            Node::Relation(relation) => relation.kind(),
            Node::Expression(_) => "Expression",
        }
    }
}

/// Arena owning every node of a resolved statement.
///
/// Children are inserted before their parents, so a parent only ever
/// refers to ids that already exist.
#[derive(Debug, Clone, Default)]
pub struct QueryTree {
    nodes: Vec<Node>,
}

impl QueryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    pub fn add_query(&mut self, query: Query) -> NodeId {
        self.push(Node::Query(query))
    }

    pub fn add_relation(&mut self, relation: Relation) -> NodeId {
        self.push(Node::Relation(relation))
    }

    pub fn add_expression(&mut self, expression: Expression) -> NodeId {
        self.push(Node::Expression(expression))
    }

    /// Shorthand for a `Table` relation named by a dotted path.
    pub fn add_table(&mut self, dotted_name: &str) -> Option<NodeId> {
        let name = QualifiedName::from_dotted(dotted_name)?;
        Some(self.add_relation(Relation::Table { name }))
    }

    pub fn add_identifier(&mut self, name: &str) -> NodeId {
        self.add_expression(Expression::Identifier(Identifier::new(name)))
    }

    pub fn add_literal(&mut self, literal: Literal) -> NodeId {
        self.add_expression(Expression::Literal(literal))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn query(&self, id: NodeId) -> Option<&Query> {
        match self.node(id)? {
            Node::Query(query) => Some(query),
            _ => None,
        }
    }

    pub fn relation(&self, id: NodeId) -> Option<&Relation> {
        match self.node(id)? {
            Node::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    pub fn expression(&self, id: NodeId) -> Option<&Expression> {
        match self.node(id)? {
            Node::Expression(expression) => Some(expression),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{Expression, Literal, Query, QuerySpecification, Relation};

    use super::*;

    #[test]
    fn identical_subtrees_get_distinct_ids() {
        let mut tree = QueryTree::new();
        let first = tree.add_table("nation").unwrap();
        let second = tree.add_table("nation").unwrap();

        assert_ne!(first, second);
        assert_eq!(tree.relation(first), tree.relation(second));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn typed_lookups_check_node_kind() {
        let mut tree = QueryTree::new();
        let one = tree.add_literal(Literal::Long(1));
        let spec = tree.add_relation(Relation::QuerySpecification(QuerySpecification::default()));
        let query = tree.add_query(Query::of(spec));

        assert!(matches!(tree.expression(one), Some(Expression::Literal(Literal::Long(1)))));
        assert!(tree.relation(one).is_none());
        assert!(tree.query(query).is_some());
        assert!(tree.query(spec).is_none());
        assert_eq!(tree.node(spec).map(Node::kind), Some("QuerySpecification"));
        assert!(tree.node(NodeId::new(99)).is_none());
    }

    #[test]
    fn add_table_rejects_malformed_names() {
        let mut tree = QueryTree::new();
        assert!(tree.add_table("a..b").is_none());
        assert!(tree.is_empty());
    }
}
