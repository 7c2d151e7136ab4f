use std::{cell::RefCell, rc::Rc};

use indexmap::{IndexMap, IndexSet};

use crate::{
    analyzer::{AnalyzerError, Field, FieldId, RelationId},
    tree::{NodeId, QualifiedName, QueryTree, Relation, WithQuery},
};

#[derive(Debug, Default)]
struct TraversalState {
    /// every field found to affect the result
    utilized_fields: IndexSet<Field>,
    /// demanded field positions, by the relation they belong to
    fields_to_explore: IndexMap<RelationId, IndexSet<FieldId>>,
}

/// Per-walk state. Clones share the utilized fields and the demands; only
/// `prunable` is private to each clone.
#[derive(Debug, Clone)]
pub struct Context {
    state: Rc<RefCell<TraversalState>>,
    /// When set, a query specification only explores the select items that were demanded.
    prunable: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Root context: nothing demanded yet and nothing pruned.
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(TraversalState::default())), prunable: false }
    }

    pub fn as_prunable(&self) -> Self {
        Self { state: Rc::clone(&self.state), prunable: true }
    }

    pub fn as_unprunable(&self) -> Self {
        Self { state: Rc::clone(&self.state), prunable: false }
    }

    pub fn is_prunable(&self) -> bool {
        self.prunable
    }

    /// Snapshot of the demands on `relation`, in the order they were added.
    pub fn field_ids_to_explore(&self, relation: RelationId) -> Vec<FieldId> {
        self.state
            .borrow()
            .fields_to_explore
            .get(&relation)
            .map(|field_ids| field_ids.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn add_field_id_to_explore(&self, field_id: FieldId) {
        self.state
            .borrow_mut()
            .fields_to_explore
            .entry(field_id.relation_id())
            .or_default()
            .insert(field_id);
    }

    pub fn add_utilized_field(&self, field: &Field) {
        self.state.borrow_mut().utilized_fields.insert(field.clone());
    }

    pub fn utilized_fields(&self) -> Vec<Field> {
        self.state.borrow().utilized_fields.iter().cloned().collect()
    }

    /// Moves the demands collected on every `Table` reference named like
    /// `with_query` onto the body of its defining query.
    ///
    /// All references with a matching name are merged, whether they are
    /// several uses of the same WITH query or different WITH queries that
    /// share a name. Returns the number of references merged.
    pub fn copy_field_ids_to_explore_for_with_query(&self, tree: &QueryTree, with_query: &WithQuery) -> Result<usize, AnalyzerError> {
        let name = QualifiedName::of(with_query.name.value.clone());
        let body = tree
            .query(with_query.query)
            .ok_or_else(|| unexpected_node(tree, with_query.query, "Query"))?
            .body;
        let target = RelationId::of(body);

        let mut state = self.state.borrow_mut();
        let mut uses = 0;
        let mut field_indexes = Vec::new();
        for (relation_id, field_ids) in &state.fields_to_explore {
            let references_with_query = matches!(
                tree.relation(relation_id.source_node()),
                Some(Relation::Table { name: table_name }) if *table_name == name
            );
            if references_with_query {
                uses += 1;
                field_indexes.extend(field_ids.iter().map(FieldId::field_index));
            }
        }

        let demands = state.fields_to_explore.entry(target).or_default();
        for index in field_indexes {
            demands.insert(FieldId::new(target, index));
        }

        Ok(uses)
    }
}

pub(crate) fn unexpected_node(tree: &QueryTree, node: NodeId, expected: &'static str) -> AnalyzerError {
    match tree.node(node) {
        Some(found) => AnalyzerError::UnexpectedNode { node, expected, found: found.kind() },
        None => AnalyzerError::UnknownNode(node),
    }
}
