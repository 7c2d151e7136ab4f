use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    analyzer::{
        utilized_columns::{Context, UtilizedFieldsBuilder},
        AccessControlInfo, Analysis, AnalysisWarning, AnalyzerError, Field, TableColumnReferences,
        WarningCollector, UTILIZED_COLUMN_ANALYSIS_FAILED,
    },
    config::UtilizedColumnsConfig,
    tree::{NodeId, QueryTree},
};

/// What the analysis found for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizedColumns {
    utilized_fields: Vec<Field>,
    utilized_table_columns: TableColumnReferences,
    refined_references: IndexMap<AccessControlInfo, TableColumnReferences>,
}

impl UtilizedColumns {
    /// Every field that affects the result, computed ones included.
    pub fn utilized_fields(&self) -> &[Field] {
        &self.utilized_fields
    }

    /// Table columns that affect the result, regardless of access control.
    pub fn utilized_table_columns(&self) -> &TableColumnReferences {
        &self.utilized_table_columns
    }

    /// Candidate columns of each access-control check, narrowed to the utilized ones.
    pub fn refined_references(&self) -> &IndexMap<AccessControlInfo, TableColumnReferences> {
        &self.refined_references
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UtilizedColumnsOutcome {
    /// Refined references were installed.
    Refined(UtilizedColumns),
    /// The analysis failed; all referenced columns were installed and a warning was raised.
    FellBack(AnalysisWarning),
    /// The analysis is turned off; all referenced columns were installed.
    Disabled,
}

/// Finds the columns that have an impact on a query's result.
///
/// In `SELECT nationkey FROM (SELECT * FROM nation WHERE name = 'USA')` every
/// column of `nation` is referenced, but only `nationkey` and `name` change
/// what the query returns.
///
/// Demands start at the outermost select list. Each relation records the
/// fields demanded from it and hands the demands down to the relations it
/// reads from. A query specification only follows the select items that were
/// demanded, which is where unused columns get pruned; its other clauses are
/// always followed in full.
pub struct UtilizedColumnsAnalyzer<'a> {
    tree: &'a QueryTree,
    analysis: &'a Analysis,
    config: &'a UtilizedColumnsConfig,
}

impl<'a> UtilizedColumnsAnalyzer<'a> {
    pub fn new(tree: &'a QueryTree, analysis: &'a Analysis, config: &'a UtilizedColumnsConfig) -> Self {
        Self { tree, analysis, config }
    }

    /// Computes utilized columns without touching the analysis.
    pub fn analyze(&self, root: NodeId) -> Result<UtilizedColumns, AnalyzerError> {
        let context = Context::new();
        UtilizedFieldsBuilder::new(self.tree, self.analysis, self.config.max_depth).process(root, &context)?;
        let utilized_fields = context.utilized_fields();

        // only fields backed by a table column matter to access control
        let mut utilized_table_columns = TableColumnReferences::new();
        for field in &utilized_fields {
            if let Some((table, column)) = field.table_column() {
                utilized_table_columns.entry(table.clone()).or_default().insert(column.to_string());
            }
        }

        let mut refined_references = IndexMap::new();
        for (access_control_info, table_columns) in self.analysis.table_column_references() {
            let refined = Self::intersect(table_columns, &utilized_table_columns);
            refined_references.insert(access_control_info.clone(), refined);
        }

        Ok(UtilizedColumns { utilized_fields, utilized_table_columns, refined_references })
    }

    fn intersect(candidates: &TableColumnReferences, utilized: &TableColumnReferences) -> TableColumnReferences {
        let mut refined = TableColumnReferences::new();
        for (table, columns) in candidates {
            let kept: BTreeSet<String> = match utilized.get(table) {
                Some(utilized_columns) => columns.intersection(utilized_columns).cloned().collect(),
                None => BTreeSet::new(),
            };
            // the table stays even when no column is left: table-level access is still checked
            refined.insert(table.clone(), kept);
        }
        refined
    }

    /// Runs the analysis and installs its result into `analysis`.
    ///
    /// On failure every check keeps its full candidate column set and a
    /// warning is added; a failed analysis must never narrow what is checked.
    pub fn analyze_for_utilized_columns(
        tree: &QueryTree,
        analysis: &mut Analysis,
        root: NodeId,
        warning_collector: &mut dyn WarningCollector,
        config: &UtilizedColumnsConfig,
    ) -> UtilizedColumnsOutcome {
        if !config.enabled {
            Self::install_all_referenced_columns(analysis);
            return UtilizedColumnsOutcome::Disabled;
        }

        debug!(root = %root, nodes = tree.len(), "analyzing utilized columns");
        let result = UtilizedColumnsAnalyzer::new(tree, analysis, config).analyze(root);
        match result {
            Ok(utilized) => {
                debug!(
                    utilized_fields = utilized.utilized_fields().len(),
                    tables = utilized.utilized_table_columns().len(),
                    "utilized column analysis complete"
                );
                for (access_control_info, references) in utilized.refined_references() {
                    analysis.add_utilized_table_column_references(access_control_info.clone(), references.clone());
                }
                UtilizedColumnsOutcome::Refined(utilized)
            }
            Err(error) => {
                warn!(%error, "utilized column analysis failed, checking access on all referenced columns");
                let warning = AnalysisWarning::new(
                    UTILIZED_COLUMN_ANALYSIS_FAILED,
                    format!(
                        "Error in analyzing utilized columns for access control, falling back to checking access on all columns: {}",
                        error
                    ),
                );
                warning_collector.add(warning.clone());
                Self::install_all_referenced_columns(analysis);
                UtilizedColumnsOutcome::FellBack(warning)
            }
        }
    }

    fn install_all_referenced_columns(analysis: &mut Analysis) {
        let all_references: Vec<(AccessControlInfo, TableColumnReferences)> = analysis
            .table_column_references()
            .iter()
            .map(|(info, references)| (info.clone(), references.clone()))
            .collect();
        for (access_control_info, references) in all_references {
            analysis.add_utilized_table_column_references(access_control_info, references);
        }
    }
}
