//! Core type definitions for formscope.
//!
//! This crate defines the plain data types shared by the state store and the
//! resolution layer:
//! - Form identities (explicit strings or generated UUID v7 tokens)
//! - Value sets used for default and repopulated field values
//! - Action response payloads, classified once at the boundary
//! - Submission channel and navigation transition snapshots
//!
//! Nothing here is reactive; containers and selectors live in
//! `formscope-store`.

mod ids;
mod response;
mod submission;
mod values;

pub use ids::{FormId, FormToken};
pub use response::{ActionResponse, FieldErrors, ValidationErrorResponse};
pub use submission::{ChannelState, NavigationTransition, PendingSubmission, SubmissionChannel};
pub use values::ValueSet;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or decoding form data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No explicit form id was passed and the caller is not nested inside a form.
    #[error(
        "cannot determine form for {hook}; use it inside a form or pass an explicit form id"
    )]
    MissingFormContext { hook: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid form token: {0}")]
    InvalidToken(#[from] uuid::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    /// Builds a [`Error::MissingFormContext`] naming the call site that lacked a form.
    pub fn missing_form_context(hook: impl Into<String>) -> Self {
        Self::MissingFormContext { hook: hook.into() }
    }
}
