pub mod tree;
pub use tree::{NodeId, QualifiedName, QueryTree};

pub mod analyzer;
pub use analyzer::{
    AccessControlInfo, Analysis, AnalysisWarning, AnalyzerError, DefaultWarningCollector, QualifiedObjectName,
    UtilizedColumns, UtilizedColumnsAnalyzer, UtilizedColumnsOutcome, WarningCollector,
};

pub mod config;
pub use config::UtilizedColumnsConfig;
