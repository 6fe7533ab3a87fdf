//! Field-level view of a form.

use crate::projection::Projection;
use crate::state::FormState;
use serde_json::Value;

/// What a field component needs to render one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldInfo {
    pub touched: bool,
    pub error: Option<String>,
    /// The field's value within the container's stored defaults.
    pub default_value: Option<Value>,
}

impl FieldInfo {
    pub(crate) fn projection(name: &str) -> Projection<FieldInfo> {
        let name = name.to_string();
        Projection::new(move |state: &FormState| {
            let meta = state.field(&name);
            FieldInfo {
                touched: meta.is_some_and(|m| m.touched),
                error: meta.and_then(|m| m.error.clone()),
                default_value: state.default_values.get_path(&name).cloned(),
            }
        })
    }
}
