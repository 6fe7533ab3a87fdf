//! Write handle over a form container.
//!
//! Every method is one logical update: observers are notified once, after
//! the whole change has been applied.

use crate::container::FormContainer;
use crate::state::FormState;
use formscope_types::{FieldErrors, ValueSet};
use tracing::debug;

/// Mutates one form's state on behalf of the form component and the
/// validation subsystem.
#[derive(Debug, Clone)]
pub struct FormUpdater {
    container: FormContainer,
}

impl FormUpdater {
    pub fn new(container: FormContainer) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &FormContainer {
        &self.container
    }

    /// Marks the form hydrated with `defaults`. Later calls are ignored so a
    /// re-render cannot overwrite state accumulated since hydration.
    pub fn hydrate(&self, defaults: ValueSet) -> bool {
        if self.container.read(|state| state.hydrated) {
            return false;
        }
        debug!(form = %self.container.form_id(), "hydrating form");
        self.container.update(|state| {
            state.hydrated = true;
            state.default_values = defaults;
        });
        true
    }

    /// Replaces the stored defaults.
    pub fn set_default_values(&self, defaults: ValueSet) {
        self.container.update(|state| state.default_values = defaults);
    }

    pub fn set_field_error(&self, name: &str, error: impl Into<String>) {
        let error = error.into();
        self.container
            .update(|state| state.field_mut(name).error = Some(error));
    }

    pub fn clear_field_error(&self, name: &str) {
        self.container.update(|state| {
            if let Some(meta) = state.fields.get_mut(name) {
                meta.error = None;
            }
        });
    }

    /// Replaces all field errors with `errors` in a single update.
    pub fn set_field_errors(&self, errors: &FieldErrors) {
        self.container.update(|state| {
            for meta in state.fields.values_mut() {
                meta.error = None;
            }
            for (name, error) in errors {
                state.field_mut(name).error = Some(error.clone());
            }
        });
    }

    pub fn clear_errors(&self) {
        self.container.update(|state| {
            for meta in state.fields.values_mut() {
                meta.error = None;
            }
        });
    }

    pub fn mark_touched(&self, name: &str) {
        self.container
            .update(|state| state.field_mut(name).touched = true);
    }

    pub fn set_submitted(&self, submitted: bool) {
        self.container
            .update(|state| state.has_been_submitted = submitted);
    }

    /// Returns the form to its never-initialized state.
    pub fn reset(&self) {
        debug!(form = %self.container.form_id(), "resetting form");
        self.container.update(|state| *state = FormState::new());
    }
}
