//! Scoped form state resolution.
//!
//! Ties the store to the host's render tree:
//! - [`resolve_form_id`] — explicit id, else the ambient form, else an error
//! - [`Scope`] — a component's position in the tree; carries the ambient
//!   [`FormContext`] and owns the component's subscriptions
//! - [`match_response`] — decides whether a response belongs to a form
//! - [`resolve_default_values`] — response > hydrated state > caller defaults
//! - [`has_active_submission`] — per-form channel, else page navigation
//! - [`FormHost`] — the per-render entry points combining all of the above
//!
//! There is no module-level state: the registry lives in a [`FormHost`] and
//! the ambient form is threaded through [`Scope`]s.

mod config;
mod context;
mod defaults;
mod host;
mod identity;
mod matcher;
mod probe;
mod scope;
mod signals;

pub use config::{ConfigError, FormScopeConfig};
pub use context::FormContext;
pub use defaults::{resolve_default_values, DefaultsSource, ResolvedDefaults};
pub use host::FormHost;
pub use identity::{explicit_form_id, resolve_form_id};
pub use matcher::{evaluate_response, match_response, MatchRejection, ResponseMatch};
pub use probe::has_active_submission;
pub use scope::Scope;
pub use signals::{PageSignals, PageState};

pub use formscope_store::{
    FieldInfo, FormContainer, FormRegistry, FormState, FormUpdater, Projection, RetentionPolicy,
    Selector, Subscription,
};
pub use formscope_types::{
    ActionResponse, ChannelState, Error, FieldErrors, FormId, FormToken, NavigationTransition,
    PendingSubmission, Result, SubmissionChannel, ValidationErrorResponse, ValueSet,
};
