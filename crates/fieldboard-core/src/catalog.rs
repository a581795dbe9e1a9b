//! The field catalog: known field identifiers and which are placed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of known field identifiers plus the subset currently
/// bound to a placed region.
///
/// Insertion order is source-column order and is preserved; duplicate
/// identifiers are dropped on construction. The used subset is driven by
/// the placement engine, never by collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<String>,
    used: HashSet<String>,
}

impl FieldCatalog {
    /// Create a catalog from an ordered list of identifiers.
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let fields = fields
            .into_iter()
            .map(Into::into)
            .filter(|f| seen.insert(f.clone()))
            .collect();
        Self {
            fields,
            used: HashSet::new(),
        }
    }

    /// All known identifiers in catalog order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether the identifier is known.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Whether the identifier is currently placed.
    #[must_use]
    pub fn is_used(&self, field: &str) -> bool {
        self.used.contains(field)
    }

    /// Identifiers without a placed region, in catalog order.
    pub fn unplaced(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| !self.used.contains(*f))
            .map(String::as_str)
    }

    /// Number of placed identifiers.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Mark an identifier as placed. Unknown identifiers are ignored.
    pub fn mark_used(&mut self, field: &str) {
        if self.contains(field) {
            self.used.insert(field.to_string());
        }
    }

    /// Mark an identifier as no longer placed.
    pub fn mark_unused(&mut self, field: &str) {
        self.used.remove(field);
    }

    /// Clear every used mark.
    pub fn clear_used(&mut self) {
        self.used.clear();
    }
}

/// Usage-change notification emitted by the placement engine.
///
/// Collaborators drain these after each operation to keep field-picker
/// UI in sync; this replaces toolkit callback hooks with plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    /// The field whose usage changed or was re-confirmed.
    pub field_id: String,
    /// Whether the field now has a placed region.
    pub used: bool,
}

impl FieldEvent {
    /// Create a usage event.
    #[must_use]
    pub fn new(field_id: impl Into<String>, used: bool) -> Self {
        Self {
            field_id: field_id.into(),
            used,
        }
    }
}
