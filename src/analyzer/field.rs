use crate::{analyzer::{QualifiedObjectName, Type}, tree::QualifiedName};

/// One column of a relation's output row type.
///
/// `origin_table`/`origin_column_name` are set when the column is a base-table
/// column, or passes one through unchanged. Computed columns carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub relation_alias: Option<QualifiedName>,
    pub name: Option<String>,
    pub ty: Type,
    pub hidden: bool,
    pub origin_table: Option<QualifiedObjectName>,
    pub origin_column_name: Option<String>,
    pub aliased: bool,
}

impl Field {
    /// Column read straight from a table.
    pub fn new_qualified(relation_alias: QualifiedName, name: impl Into<String>, ty: Type, origin_table: QualifiedObjectName) -> Self {
        let name = name.into();
        Self {
            relation_alias: Some(relation_alias),
            origin_column_name: Some(name.clone()),
            name: Some(name),
            ty,
            hidden: false,
            origin_table: Some(origin_table),
            aliased: false,
        }
    }

    /// Column with no table origin, e.g. an expression or a literal.
    pub fn new_unqualified(name: Option<String>, ty: Type) -> Self {
        Self {
            relation_alias: None,
            name,
            ty,
            hidden: false,
            origin_table: None,
            origin_column_name: None,
            aliased: false,
        }
    }

    /// Same column seen through an alias (`FROM t AS x`); origin is kept.
    pub fn with_alias(&self, relation_alias: QualifiedName, name: Option<String>) -> Self {
        Self {
            relation_alias: Some(relation_alias),
            name: name.or_else(|| self.name.clone()),
            aliased: true,
            ..self.clone()
        }
    }

    /// `(table, column)` when this field maps to a real table column.
    pub fn table_column(&self) -> Option<(&QualifiedObjectName, &str)> {
        match (&self.origin_table, &self.origin_column_name) {
            (Some(table), Some(column)) => Some((table, column.as_str())),
            _ => None,
        }
    }
}
