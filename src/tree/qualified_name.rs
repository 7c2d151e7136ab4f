use std::{fmt, hash::{Hash, Hasher}};

/// A single name part as written in the query, keeping its original casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
    /// true when the identifier was quoted in the source text
    pub delimited: bool,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), delimited: false }
    }

    pub fn delimited(value: impl Into<String>) -> Self {
        Self { value: value.into(), delimited: true }
    }

    /// Lookup form of this part.
    pub fn canonical(&self) -> String {
        self.value.to_lowercase()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delimited {
            write!(f, "\"{}\"", self.value.replace('"', "\"\""))
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Multi-part name such as `catalog.schema.table`.
///
/// Both the original parts and their lowercase forms are retained. Equality
/// and hashing only look at the lowercase parts, so `Nation` and `nation`
/// name the same object.
#[derive(Debug, Clone)]
pub struct QualifiedName {
    parts: Vec<String>,
    original_parts: Vec<Identifier>,
}

impl QualifiedName {
    /// Single-part name.
    pub fn of(name: impl Into<String>) -> Self {
        Self::from_identifiers(vec![Identifier::new(name)])
    }

    /// Builds a name from its parts. Returns `None` for an empty part list.
    pub fn from_parts<I, S>(parts: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let original_parts: Vec<Identifier> = parts.into_iter().map(Identifier::new).collect();
        if original_parts.is_empty() {
            return None;
        }
        Some(Self::from_identifiers(original_parts))
    }

    /// Splits `a.b.c` on dots. Returns `None` if any part is empty.
    pub fn from_dotted(text: &str) -> Option<Self> {
        if text.split('.').any(str::is_empty) {
            return None;
        }
        Self::from_parts(text.split('.'))
    }

    pub fn from_original_parts(original_parts: Vec<Identifier>) -> Option<Self> {
        if original_parts.is_empty() {
            return None;
        }
        Some(Self::from_identifiers(original_parts))
    }

    fn from_identifiers(original_parts: Vec<Identifier>) -> Self {
        let parts = original_parts.iter().map(Identifier::canonical).collect();
        Self { parts, original_parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn original_parts(&self) -> &[Identifier] {
        &self.original_parts
    }

    /// For `a.b.c.d` returns `a.b.c`; for a single-part name returns `None`.
    pub fn prefix(&self) -> Option<QualifiedName> {
        if self.original_parts.len() == 1 {
            return None;
        }
        let head = self.original_parts[..self.original_parts.len() - 1].to_vec();
        Some(Self::from_identifiers(head))
    }

    /// True when `suffix`'s parts are the trailing parts of this name.
    pub fn has_suffix(&self, suffix: &QualifiedName) -> bool {
        if self.parts.len() < suffix.parts.len() {
            return false;
        }
        let start = self.parts.len() - suffix.parts.len();
        self.parts[start..] == suffix.parts[..]
    }

    /// Last part, lowercase.
    pub fn suffix(&self) -> &str {
        // parts is never empty, every constructor checks it
        &self.parts[self.parts.len() - 1]
    }

    /// Last part, as written.
    pub fn original_suffix(&self) -> &Identifier {
        &self.original_parts[self.original_parts.len() - 1]
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}
