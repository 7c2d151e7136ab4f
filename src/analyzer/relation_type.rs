use crate::analyzer::Field;

/// Ordered output columns of a relation. Positions are what the rest of
/// the analysis talks about, names are only informative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationType {
    fields: Vec<Field>,
}

impl RelationType {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field_by_index(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Visible and hidden fields.
    pub fn all_field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn all_fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.hidden)
    }

    /// Output type of `left JOIN right`: left fields followed by right fields.
    pub fn join_with(&self, right: &RelationType) -> RelationType {
        let mut fields = self.fields.clone();
        fields.extend(right.fields.iter().cloned());
        RelationType { fields }
    }
}
