//! Per-form state held by a container.

use formscope_types::{FieldErrors, ValueSet};
use std::collections::BTreeMap;

/// Metadata for one field, written by validation and interaction events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// The user has interacted with and left the field.
    pub touched: bool,
    /// Current validation error, if any.
    pub error: Option<String>,
}

/// The state of a single form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Whether the container has received its one full initialization.
    pub hydrated: bool,
    /// Defaults accumulated from initialization and later interaction.
    pub default_values: ValueSet,
    /// Field name to metadata. Entries appear on first read of a field.
    pub fields: BTreeMap<String, FieldMeta>,
    pub has_been_submitted: bool,
}

impl FormState {
    /// Creates the state of a never-initialized form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns metadata for a field, if it has been read or written.
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.get(name)
    }

    /// Returns the metadata entry for a field, creating an empty one.
    pub fn field_mut(&mut self, name: &str) -> &mut FieldMeta {
        self.fields.entry(name.to_string()).or_default()
    }

    /// Collects all current field errors.
    pub fn field_errors(&self) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|(name, meta)| meta.error.clone().map(|e| (name.clone(), e)))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|meta| meta.error.is_none())
    }
}
