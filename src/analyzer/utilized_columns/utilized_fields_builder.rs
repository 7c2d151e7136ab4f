use tracing::trace;

use crate::{
    analyzer::{
        utilized_columns::{unexpected_node, Context},
        Analysis, AnalyzerError, FieldId, RelationId, RelationType,
    },
    tree::{
        Expression, GroupBy, GroupingElement, JoinCriteria, Node, NodeId, OrderBy, Query, QuerySpecification,
        QueryTree, Relation, With, WithQuery,
    },
};

/// Walks a resolved query tree from the root down, turning demanded output
/// positions into demands on child relations and recording every field a
/// demand lands on.
///
/// ORDER BY is explored before the relation it sorts, the select items
/// before the FROM clause, and the WITH clause after the body, so a
/// relation has received all of its demands by the time it is visited.
pub struct UtilizedFieldsBuilder<'a> {
    tree: &'a QueryTree,
    analysis: &'a Analysis,
    max_depth: usize,
    depth: usize,
}

impl<'a> UtilizedFieldsBuilder<'a> {
    pub fn new(tree: &'a QueryTree, analysis: &'a Analysis, max_depth: usize) -> Self {
        Self { tree, analysis, max_depth, depth: 0 }
    }

    /// Visits any node. Used for the root, whose kind is not known up front.
    pub fn process(&mut self, node: NodeId, context: &Context) -> Result<(), AnalyzerError> {
        let tree = self.tree;
        match tree.node(node).ok_or(AnalyzerError::UnknownNode(node))? {
            Node::Query(_) => self.process_query(node, context),
            Node::Relation(_) => self.process_relation(node, context),
            Node::Expression(_) => self.process_expression(node, context),
        }
    }

    fn descend(&mut self, visit: impl FnOnce(&mut Self) -> Result<(), AnalyzerError>) -> Result<(), AnalyzerError> {
        if self.depth >= self.max_depth {
            return Err(AnalyzerError::DepthLimitExceeded { limit: self.max_depth });
        }
        self.depth += 1;
        let result = visit(self);
        self.depth -= 1;
        result
    }

    fn process_query(&mut self, node: NodeId, context: &Context) -> Result<(), AnalyzerError> {
        let tree = self.tree;
        let query = tree.query(node).ok_or_else(|| unexpected_node(tree, node, "Query"))?;
        self.descend(|this| this.visit_query(query, context))
    }

    fn process_relation(&mut self, node: NodeId, context: &Context) -> Result<(), AnalyzerError> {
        let tree = self.tree;
        let relation = tree.relation(node).ok_or_else(|| unexpected_node(tree, node, "Relation"))?;
        self.descend(|this| this.visit_relation(node, relation, context))
    }

    fn process_expression(&mut self, node: NodeId, context: &Context) -> Result<(), AnalyzerError> {
        let tree = self.tree;
        let expression = tree.expression(node).ok_or_else(|| unexpected_node(tree, node, "Expression"))?;
        self.descend(|this| this.visit_expression(node, expression, context))
    }

    fn process_expressions(&mut self, nodes: &[NodeId], context: &Context) -> Result<(), AnalyzerError> {
        for node in nodes {
            self.process_expression(*node, context)?;
        }
        Ok(())
    }

    fn visit_query(&mut self, query: &'a Query, context: &Context) -> Result<(), AnalyzerError> {
        // sort keys resolve to fields of the body, so they must be demanded before the body is visited
        if let Some(order_by) = &query.order_by {
            self.process_order_by(order_by, context)?;
        }
        self.process_relation(query.body, context)?;
        // WITH goes last: its queries only receive demands once the body has been explored
        if let Some(with) = &query.with {
            self.visit_with(with, &context.as_prunable())?;
        }
        Ok(())
    }

    fn visit_with(&mut self, with: &'a With, context: &Context) -> Result<(), AnalyzerError> {
        if with.recursive {
            let name = with.queries.first().map(|query| query.name.value.clone()).unwrap_or_default();
            return Err(AnalyzerError::RecursiveWithUnsupported(name));
        }
        // later WITH queries may reference earlier ones
        for with_query in with.queries.iter().rev() {
            self.visit_with_query(with_query, context)?;
        }
        Ok(())
    }

    fn visit_with_query(&mut self, with_query: &'a WithQuery, context: &Context) -> Result<(), AnalyzerError> {
        let uses = context.copy_field_ids_to_explore_for_with_query(self.tree, with_query)?;
        trace!(with_query = %with_query.name, uses, "merged demands for WITH query");
        self.process_query(with_query.query, context)
    }

    fn visit_relation(&mut self, node: NodeId, relation: &'a Relation, context: &Context) -> Result<(), AnalyzerError> {
        match relation {
            Relation::QuerySpecification(query_specification) => {
                self.visit_query_specification(node, query_specification, context)
            }
            Relation::Table { .. } => self.visit_table(node, context),
            Relation::TableSubquery { query } | Relation::Lateral { query } => {
                let body = self.query_body(*query)?;
                self.handle_relation(node, context, &[body])?;
                self.process_query(*query, context)
            }
            Relation::Aliased { relation, .. } => {
                self.handle_relation(node, context, &[*relation])?;
                self.process_relation(*relation, context)
            }
            Relation::Sampled { relation, sample_percentage, .. } => {
                self.handle_relation(node, context, &[*relation])?;
                self.process_expression(*sample_percentage, context)?;
                self.process_relation(*relation, context)
            }
            Relation::Join { left, right, criteria, .. } => {
                self.visit_join(node, *left, *right, criteria.as_ref(), context)
            }
            Relation::Union { relations, .. } | Relation::Intersect { relations, .. } => {
                self.handle_relation(node, context, relations)?;
                for relation in relations {
                    self.process_relation(*relation, context)?;
                }
                Ok(())
            }
            Relation::Except { left, right, .. } => {
                self.handle_relation(node, context, &[*left, *right])?;
                self.process_relation(*left, context)?;
                self.process_relation(*right, context)
            }
            Relation::Unnest { expressions, with_ordinality } => {
                self.visit_unnest(node, expressions, *with_ordinality, context)
            }
            Relation::Values { rows } => {
                self.handle_relation(node, context, &[])?;
                self.process_expressions(rows, context)
            }
        }
    }

    fn visit_query_specification(&mut self, node: NodeId, query_specification: &'a QuerySpecification, context: &Context) -> Result<(), AnalyzerError> {
        // an alias in ORDER BY resolves to this specification's own output, ahead of pruning
        if let Some(order_by) = &query_specification.order_by {
            self.process_order_by(order_by, context)?;
        }
        self.handle_relation(node, context, &[])?;

        // the select items in the tree still hold unexpanded wildcards
        let analysis = self.analysis;
        let select_items = analysis
            .output_expressions(node)
            .ok_or(AnalyzerError::MissingOutputExpressions(node))?;
        if !context.is_prunable() {
            self.process_expressions(select_items, context)?;
        } else {
            for field_id in context.field_ids_to_explore(RelationId::of(node)) {
                let index = field_id.field_index();
                let expression = select_items.get(index).ok_or(AnalyzerError::FieldIndexOutOfBounds {
                    relation: node,
                    index,
                    field_count: select_items.len(),
                })?;
                self.process_expression(*expression, context)?;
            }
        }

        let unprunable = context.as_unprunable();
        if let Some(where_clause) = query_specification.where_clause {
            self.process_expression(where_clause, &unprunable)?;
        }
        if let Some(group_by) = &query_specification.group_by {
            self.process_group_by(group_by, &unprunable)?;
        }
        if let Some(having) = query_specification.having {
            self.process_expression(having, &unprunable)?;
        }

        // FROM last, once every other clause has registered its demands
        if let Some(from) = query_specification.from {
            self.process_relation(from, &context.as_prunable())?;
        }
        Ok(())
    }

    fn visit_table(&mut self, node: NodeId, context: &Context) -> Result<(), AnalyzerError> {
        let named_query = self.analysis.named_query(node).copied();
        match named_query {
            Some(named_query) if named_query.from_view => {
                let view_query = named_query.query;
                let body = self.query_body(view_query)?;
                self.handle_relation(node, context, &[body])?;
                self.process_query(view_query, context)
            }
            // base table, or a WITH query reference whose body is explored with the WITH clause
            _ => self.handle_relation(node, context, &[]),
        }
    }

    fn visit_join(&mut self, node: NodeId, left: NodeId, right: NodeId, criteria: Option<&'a JoinCriteria>, context: &Context) -> Result<(), AnalyzerError> {
        self.handle_relation(node, context, &[])?;

        let unprunable = context.as_unprunable();
        match criteria {
            Some(JoinCriteria::On(expression)) => self.process_expression(*expression, &unprunable)?,
            Some(JoinCriteria::Using(columns)) => self.process_expressions(columns, &unprunable)?,
            Some(JoinCriteria::Natural) | None => {}
        }

        let demanded = context.field_ids_to_explore(RelationId::of(node));
        if !demanded.is_empty() {
            let left_field_count = self.relation_type(left)?.all_field_count();
            for field_id in demanded {
                let index = field_id.field_index();
                if index < left_field_count {
                    context.add_field_id_to_explore(FieldId::of(left, index));
                } else {
                    context.add_field_id_to_explore(FieldId::of(right, index - left_field_count));
                }
            }
        }

        // right first: a lateral or unnest on the right may reference the left
        self.process_relation(right, context)?;
        self.process_relation(left, context)
    }

    fn visit_unnest(&mut self, node: NodeId, expressions: &'a [NodeId], with_ordinality: bool, context: &Context) -> Result<(), AnalyzerError> {
        self.handle_relation(node, context, &[])?;

        let demanded = context.field_ids_to_explore(RelationId::of(node));
        if demanded.is_empty() {
            return Ok(());
        }

        // one entry per output column, so maps and arrays of rows repeat their input
        let analysis = self.analysis;
        let mut expanded = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let ty = analysis.type_of(*expression).ok_or(AnalyzerError::MissingType(*expression))?;
            expanded.extend(std::iter::repeat_n(*expression, ty.unnest_width()));
        }

        for field_id in demanded {
            let index = field_id.field_index();
            match expanded.get(index) {
                Some(expression) => self.process_expression(*expression, context)?,
                // ordinality column
                None if with_ordinality && index == expanded.len() => {}
                None => {
                    return Err(AnalyzerError::FieldIndexOutOfBounds {
                        relation: node,
                        index,
                        field_count: expanded.len() + usize::from(with_ordinality),
                    });
                }
            }
        }
        Ok(())
    }

    fn visit_expression(&mut self, node: NodeId, expression: &'a Expression, context: &Context) -> Result<(), AnalyzerError> {
        match expression {
            // the only expressions that can be column references
            Expression::Identifier(_) | Expression::FieldReference { .. } => {
                self.handle_expression(node, context);
                Ok(())
            }
            Expression::Dereference { base, .. } => {
                self.handle_expression(node, context);
                self.process_expression(*base, context)
            }
            // only row existence matters, so the subquery's select items are not demanded
            Expression::Exists { subquery } => self.process_expression(*subquery, &context.as_prunable()),
            Expression::InPredicate { value, value_list } => {
                let unprunable = context.as_unprunable();
                self.process_expression(*value, &unprunable)?;
                self.process_expression(*value_list, &unprunable)
            }
            Expression::QuantifiedComparison { value, subquery, .. } => {
                let unprunable = context.as_unprunable();
                self.process_expression(*value, &unprunable)?;
                self.process_expression(*subquery, &unprunable)
            }
            Expression::Subquery { query } => {
                if self.analysis.is_scalar_subquery(node) {
                    self.process_query(*query, &context.as_unprunable())
                } else {
                    self.process_query(*query, context)
                }
            }
            Expression::Lambda { body, .. } => self.process_expression(*body, &context.as_unprunable()),
            other => {
                for child in other.children() {
                    self.process_expression(child, context)?;
                }
                Ok(())
            }
        }
    }

    fn process_group_by(&mut self, group_by: &'a GroupBy, context: &Context) -> Result<(), AnalyzerError> {
        for element in &group_by.elements {
            match element {
                GroupingElement::Simple(expressions) => self.process_expressions(expressions, context)?,
                GroupingElement::Cube(expressions) | GroupingElement::Rollup(expressions) => {
                    self.process_expressions(expressions, &context.as_unprunable())?
                }
                GroupingElement::GroupingSets(sets) => {
                    let unprunable = context.as_unprunable();
                    for set in sets {
                        self.process_expressions(set, &unprunable)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn process_order_by(&mut self, order_by: &'a OrderBy, context: &Context) -> Result<(), AnalyzerError> {
        for sort_item in &order_by.sort_items {
            self.process_expression(sort_item.sort_key, context)?;
        }
        Ok(())
    }

    /// Records the fields demanded from `relation` and forwards each demand,
    /// at the same position, to every child in `children`.
    fn handle_relation(&self, relation: NodeId, context: &Context, children: &[NodeId]) -> Result<(), AnalyzerError> {
        let demanded = context.field_ids_to_explore(RelationId::of(relation));
        if demanded.is_empty() {
            return Ok(());
        }

        let relation_type = self.relation_type(relation)?;
        for field_id in demanded {
            let index = field_id.field_index();
            let field = relation_type.field_by_index(index).ok_or(AnalyzerError::FieldIndexOutOfBounds {
                relation,
                index,
                field_count: relation_type.all_field_count(),
            })?;
            context.add_utilized_field(field);
            for child in children {
                context.add_field_id_to_explore(FieldId::of(*child, index));
            }
        }
        Ok(())
    }

    fn handle_expression(&self, expression: NodeId, context: &Context) {
        let analysis = self.analysis;
        for field_id in analysis.column_reference_fields(expression) {
            context.add_field_id_to_explore(*field_id);
        }
    }

    fn relation_type(&self, relation: NodeId) -> Result<&'a RelationType, AnalyzerError> {
        let analysis = self.analysis;
        analysis.relation_type(relation).ok_or(AnalyzerError::MissingRelationType(relation))
    }

    fn query_body(&self, query: NodeId) -> Result<NodeId, AnalyzerError> {
        let tree = self.tree;
        tree.query(query)
            .map(|query| query.body)
            .ok_or_else(|| unexpected_node(tree, query, "Query"))
    }
}
