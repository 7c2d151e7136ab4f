use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Fully qualified name of a catalog object: `catalog.schema.object`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedObjectName {
    pub catalog_name: String,
    pub schema_name: String,
    pub object_name: String,
}

impl QualifiedObjectName {
    pub fn new(catalog_name: impl Into<String>, schema_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            schema_name: schema_name.into(),
            object_name: object_name.into(),
        }
    }
}

impl fmt::Display for QualifiedObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.catalog_name, self.schema_name, self.object_name)
    }
}

impl FromStr for QualifiedObjectName {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = text.split('.').collect();
        match parts.as_slice() {
            [catalog, schema, object] if !catalog.is_empty() && !schema.is_empty() && !object.is_empty() => {
                Ok(Self::new(*catalog, *schema, *object))
            }
            _ => Err(format!("Invalid object name '{}', expected catalog.schema.object", text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_three_part_names() {
        let name: QualifiedObjectName = "tpch.tiny.nation".parse().unwrap();
        assert_eq!(name, QualifiedObjectName::new("tpch", "tiny", "nation"));
        assert_eq!(name.to_string(), "tpch.tiny.nation");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!("nation".parse::<QualifiedObjectName>().is_err());
        assert!("tiny.nation".parse::<QualifiedObjectName>().is_err());
        assert!("a.b.c.d".parse::<QualifiedObjectName>().is_err());
        assert!("tpch..nation".parse::<QualifiedObjectName>().is_err());
    }
}
