pub mod types;
pub use types::*;

pub mod qualified_object_name;
pub use qualified_object_name::*;

pub mod field;
pub use field::*;

pub mod relation_type;
pub use relation_type::*;

pub mod relation_id;
pub use relation_id::*;

pub mod named_query;
pub use named_query::*;

pub mod access_control_info;
pub use access_control_info::*;

pub mod analysis;
pub use analysis::*;

pub mod analyzer_error;
pub use analyzer_error::*;

pub mod warnings;
pub use warnings::*;

pub mod utilized_columns;
pub use utilized_columns::{UtilizedColumns, UtilizedColumnsAnalyzer, UtilizedColumnsOutcome};
