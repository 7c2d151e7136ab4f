use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;

use crate::{
    analyzer::{AccessControlInfo, FieldId, NamedQuery, QualifiedObjectName, RelationType, Type},
    tree::NodeId,
};

/// Columns referenced per table, for one access-control check.
pub type TableColumnReferences = IndexMap<QualifiedObjectName, BTreeSet<String>>;

/// Side table produced by name resolution.
///
/// Everything except the utilized references is filled in by the binder
/// before the utilized-column analysis runs, and only read by it.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// relation node -> output row type
    relation_types: HashMap<NodeId, RelationType>,
    /// query specification -> resolved select list (wildcards expanded)
    output_expressions: HashMap<NodeId, Vec<NodeId>>,
    /// expression -> fields it resolved to
    column_reference_fields: HashMap<NodeId, Vec<FieldId>>,
    types: HashMap<NodeId, Type>,
    /// `Table` node -> the WITH query or view it names
    named_queries: HashMap<NodeId, NamedQuery>,
    scalar_subqueries: HashSet<NodeId>,
    table_column_references: IndexMap<AccessControlInfo, TableColumnReferences>,
    utilized_table_column_references: IndexMap<AccessControlInfo, TableColumnReferences>,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_relation_type(&mut self, relation: NodeId, relation_type: RelationType) {
        self.relation_types.insert(relation, relation_type);
    }

    pub fn relation_type(&self, relation: NodeId) -> Option<&RelationType> {
        self.relation_types.get(&relation)
    }

    pub fn set_output_expressions(&mut self, query_specification: NodeId, expressions: Vec<NodeId>) {
        self.output_expressions.insert(query_specification, expressions);
    }

    pub fn output_expressions(&self, query_specification: NodeId) -> Option<&[NodeId]> {
        self.output_expressions.get(&query_specification).map(Vec::as_slice)
    }

    pub fn add_column_reference(&mut self, expression: NodeId, field_id: FieldId) {
        let fields = self.column_reference_fields.entry(expression).or_default();
        if !fields.contains(&field_id) {
            fields.push(field_id);
        }
    }

    /// Fields the expression refers to; empty for anything that is not a column reference.
    pub fn column_reference_fields(&self, expression: NodeId) -> &[FieldId] {
        self.column_reference_fields.get(&expression).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_type(&mut self, expression: NodeId, ty: Type) {
        self.types.insert(expression, ty);
    }

    pub fn type_of(&self, expression: NodeId) -> Option<&Type> {
        self.types.get(&expression)
    }

    pub fn register_named_query(&mut self, table: NodeId, named_query: NamedQuery) {
        self.named_queries.insert(table, named_query);
    }

    pub fn named_query(&self, table: NodeId) -> Option<&NamedQuery> {
        self.named_queries.get(&table)
    }

    pub fn mark_scalar_subquery(&mut self, subquery: NodeId) {
        self.scalar_subqueries.insert(subquery);
    }

    pub fn is_scalar_subquery(&self, subquery: NodeId) -> bool {
        self.scalar_subqueries.contains(&subquery)
    }

    /// Records that `columns` of `table` are referenced and must be checked by `access_control_info`.
    pub fn add_table_column_references<I, S>(&mut self, access_control_info: AccessControlInfo, table: QualifiedObjectName, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_column_references
            .entry(access_control_info)
            .or_default()
            .entry(table)
            .or_default()
            .extend(columns.into_iter().map(Into::into));
    }

    pub fn table_column_references(&self) -> &IndexMap<AccessControlInfo, TableColumnReferences> {
        &self.table_column_references
    }

    /// Installs the columns to check for one access control, replacing any earlier set.
    pub fn add_utilized_table_column_references(&mut self, access_control_info: AccessControlInfo, utilized: TableColumnReferences) {
        self.utilized_table_column_references.insert(access_control_info, utilized);
    }

    pub fn utilized_table_column_references(&self) -> &IndexMap<AccessControlInfo, TableColumnReferences> {
        &self.utilized_table_column_references
    }
}
