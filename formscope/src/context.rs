//! The context a form provides to everything rendered inside it.

use formscope_types::{FormId, SubmissionChannel, ValueSet};

/// What a form component knows about itself on the current render.
#[derive(Debug, Clone, PartialEq)]
pub struct FormContext {
    pub form_id: FormId,
    /// Present when the form submits through its own channel instead of
    /// page navigation.
    pub channel: Option<SubmissionChannel>,
    pub subaction: Option<String>,
    /// Defaults passed by the caller, authoritative until hydration.
    pub default_values_prop: Option<ValueSet>,
}

impl FormContext {
    /// A context carrying only an identity.
    pub fn new(form_id: FormId) -> Self {
        Self {
            form_id,
            channel: None,
            subaction: None,
            default_values_prop: None,
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: SubmissionChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn with_subaction(mut self, subaction: impl Into<String>) -> Self {
        self.subaction = Some(subaction.into());
        self
    }

    #[must_use]
    pub fn with_default_values(mut self, defaults: ValueSet) -> Self {
        self.default_values_prop = Some(defaults);
        self
    }
}
