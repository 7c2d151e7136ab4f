use std::fmt;

use serde::{Deserialize, Serialize};

/// Value types as far as the utilized-column analysis cares about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Type {
    Boolean,
    Bigint,
    Double,
    Varchar,
    Date,
    Timestamp,
    Array(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Row(Vec<Type>),
    #[default]
    Unknown,
}

impl Type {
    /// Number of columns `UNNEST` produces for one input of this type:
    /// key and value for a map, one per field for an array of rows, one otherwise.
    pub fn unnest_width(&self) -> usize {
        match self {
            Type::Map(..) => 2,
            Type::Array(element) => match element.as_ref() {
                Type::Row(fields) if !fields.is_empty() => fields.len(),
                _ => 1,
            },
            _ => 1,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Bigint => write!(f, "bigint"),
            Type::Double => write!(f, "double"),
            Type::Varchar => write!(f, "varchar"),
            Type::Date => write!(f, "date"),
            Type::Timestamp => write!(f, "timestamp"),
            Type::Array(element) => write!(f, "array({})", element),
            Type::Map(key, value) => write!(f, "map({}, {})", key, value),
            Type::Row(fields) => {
                let fields: Vec<String> = fields.iter().map(Type::to_string).collect();
                write!(f, "row({})", fields.join(", "))
            }
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
