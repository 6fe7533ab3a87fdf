//! Snapshots of submission activity supplied by the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a dedicated per-form submission channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelState {
    #[default]
    Idle,
    Submitting,
    /// The submission finished and the host is reloading page data.
    Loading,
}

/// A form's own submission channel, for forms that submit independently of
/// page navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionChannel {
    pub state: ChannelState,
    /// Last payload returned through this channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SubmissionChannel {
    /// An idle channel with no data.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A channel with a submission in flight.
    #[must_use]
    pub fn submitting() -> Self {
        Self {
            state: ChannelState::Submitting,
            data: None,
        }
    }

    /// An idle channel holding the payload of its last submission.
    pub fn completed(data: Value) -> Self {
        Self {
            state: ChannelState::Idle,
            data: Some(data),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == ChannelState::Submitting
    }
}

/// A page-level submission in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSubmission {
    pub action: String,
    pub method: String,
}

/// Page-wide navigation transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTransition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<PendingSubmission>,
}

impl NavigationTransition {
    /// No navigation in progress.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A navigation carrying a submission to `action`.
    pub fn submitting(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            submission: Some(PendingSubmission {
                action: action.into(),
                method: method.into(),
            }),
        }
    }

    pub fn has_active_submission(&self) -> bool {
        self.submission.is_some()
    }
}
