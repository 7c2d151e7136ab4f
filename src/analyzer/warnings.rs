use std::fmt;

use serde::Serialize;

/// Stable code attached to a warning so clients can match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WarningCode {
    pub code: u32,
    pub name: &'static str,
}

impl WarningCode {
    pub const fn new(code: u32, name: &'static str) -> Self {
        Self { code, name }
    }
}

pub const UTILIZED_COLUMN_ANALYSIS_FAILED: WarningCode = WarningCode::new(0x0000_0011, "UTILIZED_COLUMN_ANALYSIS_FAILED");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisWarning {
    pub code: WarningCode,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.name, self.message)
    }
}

pub trait WarningCollector {
    fn add(&mut self, warning: AnalysisWarning);
    fn warnings(&self) -> Vec<AnalysisWarning>;
}

/// Keeps warnings in arrival order, dropping any beyond `max_warnings`.
#[derive(Debug, Clone)]
pub struct DefaultWarningCollector {
    warnings: Vec<AnalysisWarning>,
    max_warnings: usize,
}

impl DefaultWarningCollector {
    pub fn new(max_warnings: usize) -> Self {
        Self { warnings: Vec::new(), max_warnings }
    }
}

impl Default for DefaultWarningCollector {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl WarningCollector for DefaultWarningCollector {
    fn add(&mut self, warning: AnalysisWarning) {
        if self.warnings.len() < self.max_warnings {
            self.warnings.push(warning);
        }
    }

    fn warnings(&self) -> Vec<AnalysisWarning> {
        self.warnings.clone()
    }
}
