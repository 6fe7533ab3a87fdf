//! Action response payloads.
//!
//! The submission layer hands back arbitrary JSON. It is classified exactly
//! once, here, into [`ActionResponse`]: either a validation failure carrying
//! a non-empty field error map, or no response this core cares about.

use crate::{Error, Result, ValueSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to error message.
pub type FieldErrors = BTreeMap<String, String>;

/// Payload describing a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorResponse {
    pub field_errors: FieldErrors,
    /// Values the user submitted, to be restored into the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repopulate_fields: Option<ValueSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subaction: Option<String>,
    /// Set when the failing form was rendered with an explicit id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_identity_tag: Option<String>,
}

impl ValidationErrorResponse {
    /// Creates a response with the given field errors.
    pub fn new(field_errors: FieldErrors) -> Self {
        Self {
            field_errors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_repopulate_fields(mut self, values: ValueSet) -> Self {
        self.repopulate_fields = Some(values);
        self
    }

    #[must_use]
    pub fn with_subaction(mut self, subaction: impl Into<String>) -> Self {
        self.subaction = Some(subaction.into());
        self
    }

    #[must_use]
    pub fn with_form_identity_tag(mut self, tag: impl Into<String>) -> Self {
        self.form_identity_tag = Some(tag.into());
        self
    }

    /// Serializes to the JSON shape the submission layer returns.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A classified action response.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResponse {
    ValidationFailure(ValidationErrorResponse),
    NoResponse,
}

impl ActionResponse {
    /// Classifies raw action data.
    ///
    /// Absent data, non-object data and objects without a non-empty
    /// `fieldErrors` map are all [`ActionResponse::NoResponse`]. A
    /// `fieldErrors` entry that is present but malformed is an error.
    pub fn from_json(raw: Option<&Value>) -> Result<Self> {
        let Some(Value::Object(object)) = raw else {
            return Ok(Self::NoResponse);
        };
        match object.get("fieldErrors") {
            None | Some(Value::Null) => return Ok(Self::NoResponse),
            Some(Value::Object(errors)) => {
                if errors.is_empty() {
                    return Ok(Self::NoResponse);
                }
                if let Some((name, _)) = errors.iter().find(|(_, v)| !v.is_string()) {
                    return Err(Error::InvalidPayload(format!(
                        "field error for `{name}` is not a string"
                    )));
                }
            }
            Some(_) => {
                return Err(Error::InvalidPayload(
                    "fieldErrors must be an object".to_string(),
                ));
            }
        }
        let response = ValidationErrorResponse::deserialize(Value::Object(object.clone()))?;
        Ok(Self::ValidationFailure(response))
    }

    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailure(_))
    }

    /// Returns the failure payload, if any.
    pub fn into_failure(self) -> Option<ValidationErrorResponse> {
        match self {
            Self::ValidationFailure(response) => Some(response),
            Self::NoResponse => None,
        }
    }
}
