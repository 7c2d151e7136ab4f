pub mod context;
pub use context::*;

pub mod utilized_fields_builder;
pub use utilized_fields_builder::*;

pub mod utilized_columns_analyzer;
pub use utilized_columns_analyzer::*;
