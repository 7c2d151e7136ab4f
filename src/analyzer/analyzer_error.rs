use std::fmt;

use crate::tree::NodeId;

/// Anything that stops the utilized-column analysis. Callers only care that
/// it failed; the variants exist so the fallback warning says why.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    UnknownNode(NodeId),
    UnexpectedNode { node: NodeId, expected: &'static str, found: &'static str },
    MissingRelationType(NodeId),
    MissingOutputExpressions(NodeId),
    MissingType(NodeId),
    FieldIndexOutOfBounds { relation: NodeId, index: usize, field_count: usize },
    RecursiveWithUnsupported(String),
    DepthLimitExceeded { limit: usize },
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::UnknownNode(node) => write!(f, "node {} is not part of the query tree", node),
            AnalyzerError::UnexpectedNode { node, expected, found } => {
                write!(f, "expected {} at node {}, found {}", expected, node, found)
            }
            AnalyzerError::MissingRelationType(node) => write!(f, "no relation type recorded for node {}", node),
            AnalyzerError::MissingOutputExpressions(node) => {
                write!(f, "no output expressions recorded for query specification {}", node)
            }
            AnalyzerError::MissingType(node) => write!(f, "no type recorded for expression {}", node),
            AnalyzerError::FieldIndexOutOfBounds { relation, index, field_count } => write!(
                f,
                "field index {} out of bounds for node {} with {} fields",
                index, relation, field_count
            ),
            AnalyzerError::RecursiveWithUnsupported(name) => {
                write!(f, "recursive WITH query '{}' is not supported", name)
            }
            AnalyzerError::DepthLimitExceeded { limit } => write!(f, "query tree nesting exceeds {} levels", limit),
        }
    }
}

impl std::error::Error for AnalyzerError {}
