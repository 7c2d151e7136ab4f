use std::fmt;

use crate::tree::{Identifier, Literal, NodeId, OrderBy, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    IsDistinctFrom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    All,
    Any,
    Some,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::IsDistinctFrom => "IS DISTINCT FROM",
        };
        write!(f, "{}", symbol)
    }
}

/// `OVER (PARTITION BY ... ORDER BY ...)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Window {
    pub partition_by: Vec<NodeId>,
    pub order_by: Option<OrderBy>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub arguments: Vec<NodeId>,
    pub distinct: bool,
    /// `FILTER (WHERE ...)` on aggregates
    pub filter: Option<NodeId>,
    /// ordered-set aggregates, e.g. `array_agg(x ORDER BY y)`
    pub order_by: Option<OrderBy>,
    pub window: Option<Window>,
}

impl FunctionCall {
    pub fn new(name: QualifiedName, arguments: Vec<NodeId>) -> Self {
        Self { name, arguments, distinct: false, filter: None, order_by: None, window: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub operand: NodeId,
    pub result: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    /// Unqualified name, e.g. a column or a lambda argument.
    Identifier(Identifier),
    /// Positional reference produced by the binder (e.g. for `SELECT *`).
    FieldReference { field_index: usize },
    /// `base.field`, either a qualified column or a row field access.
    Dereference { base: NodeId, field: Identifier },
    FunctionCall(FunctionCall),
    Arithmetic { operator: ArithmeticOperator, left: NodeId, right: NodeId },
    ArithmeticUnary { sign: Sign, value: NodeId },
    Comparison { operator: ComparisonOperator, left: NodeId, right: NodeId },
    Logical { operator: LogicalOperator, terms: Vec<NodeId> },
    Not(NodeId),
    IsNull { value: NodeId, negated: bool },
    Between { value: NodeId, min: NodeId, max: NodeId },
    Like { value: NodeId, pattern: NodeId, escape: Option<NodeId> },
    Cast { expression: NodeId, target: String },
    /// Simple case when `operand` is set, searched case otherwise.
    Case { operand: Option<NodeId>, when_clauses: Vec<WhenClause>, default: Option<NodeId> },
    /// `value IN value_list`; the list is either an `InList` or a `Subquery`.
    InPredicate { value: NodeId, value_list: NodeId },
    InList(Vec<NodeId>),
    /// `EXISTS (subquery)`; points at a `Subquery` expression.
    Exists { subquery: NodeId },
    /// Subquery used as an expression; points at a `Query` node.
    Subquery { query: NodeId },
    /// `value op ANY|SOME|ALL (subquery)`
    QuantifiedComparison { operator: ComparisonOperator, quantifier: Quantifier, value: NodeId, subquery: NodeId },
    Lambda { arguments: Vec<Identifier>, body: NodeId },
    Row(Vec<NodeId>),
    Subscript { base: NodeId, index: NodeId },
    Array(Vec<NodeId>),
}

impl Expression {
    /// Direct sub-expressions in evaluation order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Expression::Literal(_)
            | Expression::Identifier(_)
            | Expression::FieldReference { .. }
            | Expression::Subquery { .. } => vec![],
            Expression::Dereference { base, .. } => vec![*base],
            Expression::FunctionCall(call) => {
                let mut children = call.arguments.clone();
                children.extend(call.filter);
                if let Some(order_by) = &call.order_by {
                    children.extend(order_by.sort_keys());
                }
                if let Some(window) = &call.window {
                    children.extend(window.partition_by.iter().copied());
                    if let Some(order_by) = &window.order_by {
                        children.extend(order_by.sort_keys());
                    }
                }
                children
            }
            Expression::Arithmetic { left, right, .. }
            | Expression::Comparison { left, right, .. } => vec![*left, *right],
            Expression::ArithmeticUnary { value, .. }
            | Expression::Not(value)
            | Expression::IsNull { value, .. } => vec![*value],
            Expression::Logical { terms, .. } => terms.clone(),
            Expression::Between { value, min, max } => vec![*value, *min, *max],
            Expression::Like { value, pattern, escape } => {
                let mut children = vec![*value, *pattern];
                children.extend(*escape);
                children
            }
            Expression::Cast { expression, .. } => vec![*expression],
            Expression::Case { operand, when_clauses, default } => {
                let mut children: Vec<NodeId> = operand.iter().copied().collect();
                for clause in when_clauses {
                    children.push(clause.operand);
                    children.push(clause.result);
                }
                children.extend(*default);
                children
            }
            Expression::InPredicate { value, value_list } => vec![*value, *value_list],
            Expression::Exists { subquery } => vec![*subquery],
            Expression::QuantifiedComparison { value, subquery, .. } => vec![*value, *subquery],
            Expression::Lambda { body, .. } => vec![*body],
            Expression::InList(values)
            | Expression::Row(values)
            | Expression::Array(values) => values.clone(),
            Expression::Subscript { base, index } => vec![*base, *index],
        }
    }
}
