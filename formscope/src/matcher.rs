//! Response matching.
//!
//! Page-level action data is shared by every form on the page, so it is only
//! bound to a form when the payload says it belongs there: by explicit form
//! tag for explicitly named forms, by subaction otherwise. A form with its
//! own submission channel needs no disambiguation.

use crate::context::FormContext;
use formscope_types::{ActionResponse, FormId, ValidationErrorResponse};
use serde_json::Value;
use std::fmt;
use tracing::{trace, warn};

/// Why a payload was not bound to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRejection {
    /// No payload, or a payload without field errors.
    NoFieldErrors,
    /// The payload carried a `fieldErrors` entry of the wrong shape.
    MalformedPayload(String),
    /// The form has an explicit id and the payload is tagged for another
    /// form, or not tagged at all.
    FormIdMismatch {
        expected: String,
        found: Option<String>,
    },
    /// The payload is tagged for an explicitly named form, and this form's
    /// id is generated.
    TaggedForOtherForm { tag: String },
    SubactionMismatch {
        expected: Option<String>,
        found: Option<String>,
    },
}

impl fmt::Display for MatchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFieldErrors => f.write_str("payload carries no field errors"),
            Self::MalformedPayload(reason) => write!(f, "malformed payload: {reason}"),
            Self::FormIdMismatch { expected, found } => match found {
                Some(found) => write!(f, "payload is for form `{found}`, not `{expected}`"),
                None => write!(f, "payload has no form tag, form `{expected}` requires one"),
            },
            Self::TaggedForOtherForm { tag } => {
                write!(f, "payload is tagged for explicit form `{tag}`")
            }
            Self::SubactionMismatch { expected, found } => write!(
                f,
                "subaction {} does not match {}",
                found.as_deref().unwrap_or("<none>"),
                expected.as_deref().unwrap_or("<none>")
            ),
        }
    }
}

/// Outcome of matching a payload against a form.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseMatch {
    Accepted(ValidationErrorResponse),
    Rejected(MatchRejection),
}

impl ResponseMatch {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn accepted(self) -> Option<ValidationErrorResponse> {
        match self {
            Self::Accepted(response) => Some(response),
            Self::Rejected(_) => None,
        }
    }
}

/// Decides whether a response belongs to the form in `context`.
///
/// `page_data` is the page-level action data; it is ignored for forms with
/// their own channel.
pub fn evaluate_response(context: &FormContext, page_data: Option<&Value>) -> ResponseMatch {
    if let Some(channel) = &context.channel {
        return match classify(channel.data.as_ref()) {
            Ok(response) => ResponseMatch::Accepted(response),
            Err(rejection) => ResponseMatch::Rejected(rejection),
        };
    }

    let response = match classify(page_data) {
        Ok(response) => response,
        Err(rejection) => return ResponseMatch::Rejected(rejection),
    };

    match &context.form_id {
        FormId::Explicit(id) => {
            if response.form_identity_tag.as_deref() == Some(id.as_str()) {
                ResponseMatch::Accepted(response)
            } else {
                ResponseMatch::Rejected(MatchRejection::FormIdMismatch {
                    expected: id.clone(),
                    found: response.form_identity_tag,
                })
            }
        }
        FormId::Generated(_) => {
            if let Some(tag) = &response.form_identity_tag {
                return ResponseMatch::Rejected(MatchRejection::TaggedForOtherForm {
                    tag: tag.clone(),
                });
            }
            if response.subaction == context.subaction {
                ResponseMatch::Accepted(response)
            } else {
                ResponseMatch::Rejected(MatchRejection::SubactionMismatch {
                    expected: context.subaction.clone(),
                    found: response.subaction,
                })
            }
        }
    }
}

/// Returns the validation failure that belongs to this form, if any.
pub fn match_response(
    context: &FormContext,
    page_data: Option<&Value>,
) -> Option<ValidationErrorResponse> {
    match evaluate_response(context, page_data) {
        ResponseMatch::Accepted(response) => Some(response),
        ResponseMatch::Rejected(rejection) => {
            trace!(form = %context.form_id, %rejection, "response not matched");
            None
        }
    }
}

fn classify(raw: Option<&Value>) -> Result<ValidationErrorResponse, MatchRejection> {
    match ActionResponse::from_json(raw) {
        Ok(ActionResponse::ValidationFailure(response)) => Ok(response),
        Ok(ActionResponse::NoResponse) => Err(MatchRejection::NoFieldErrors),
        Err(e) => {
            warn!(error = %e, "ignoring malformed action response");
            Err(MatchRejection::MalformedPayload(e.to_string()))
        }
    }
}
