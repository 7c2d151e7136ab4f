use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Settings for the utilized-column analysis.
///
/// - `enabled`: when false, every referenced column is checked and the tree walk is skipped.
/// - `max_depth`: nesting limit for the tree walk; deeper trees fall back to checking all columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilizedColumnsConfig {
    pub enabled: bool,
    pub max_depth: usize,
}

impl Default for UtilizedColumnsConfig {
    fn default() -> Self {
        Self { enabled: true, max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl UtilizedColumnsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::default() }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth, ..Self::default() }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
