pub mod node_id;
pub use node_id::*;

pub mod qualified_name;
pub use qualified_name::*;

pub mod literal;
pub use literal::*;

pub mod expression;
pub use expression::*;

pub mod query;
pub use query::*;

pub mod relation;
pub use relation::*;

pub mod query_tree;
pub use query_tree::*;
