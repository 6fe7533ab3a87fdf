//! Default-value precedence.
//!
//! Typical flow: only the caller's defaults exist at first; the container is
//! then hydrated with them; after a failed submit the values the user typed
//! come back in the response and take precedence over both.

use formscope_types::{ValidationErrorResponse, ValueSet};
use serde::Serialize;

/// Which source supplied the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultsSource {
    /// Values restored from a matched failed submission.
    Repopulated,
    /// The hydrated container's stored defaults.
    State,
    /// The caller-supplied defaults.
    Props,
}

/// Defaults together with where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDefaults {
    pub source: DefaultsSource,
    pub values: ValueSet,
}

/// Picks the authoritative defaults; first match wins:
/// repopulated response values, hydrated state, caller defaults.
pub fn resolve_default_values(
    matched: Option<&ValidationErrorResponse>,
    hydrated: bool,
    in_state: &ValueSet,
    prop: Option<&ValueSet>,
) -> ResolvedDefaults {
    if let Some(values) = matched.and_then(|r| r.repopulate_fields.as_ref()) {
        return ResolvedDefaults {
            source: DefaultsSource::Repopulated,
            values: values.clone(),
        };
    }
    if hydrated {
        return ResolvedDefaults {
            source: DefaultsSource::State,
            values: in_state.clone(),
        };
    }
    ResolvedDefaults {
        source: DefaultsSource::Props,
        values: prop.cloned().unwrap_or_default(),
    }
}
