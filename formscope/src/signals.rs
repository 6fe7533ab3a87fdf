//! Page-level signals supplied by the host's submission layer.

use formscope_types::NavigationTransition;
use serde_json::Value;
use std::cell::RefCell;

/// Source of page-wide submission state.
pub trait PageSignals {
    /// Data returned by the last page-level action, if any.
    fn action_data(&self) -> Option<Value>;

    /// The current navigation transition.
    fn transition(&self) -> NavigationTransition;
}

/// In-memory [`PageSignals`] the host updates as submissions progress.
#[derive(Debug, Default)]
pub struct PageState {
    action_data: RefCell<Option<Value>>,
    transition: RefCell<NavigationTransition>,
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_action_data(&self, data: Value) {
        *self.action_data.borrow_mut() = Some(data);
    }

    pub fn clear_action_data(&self) {
        *self.action_data.borrow_mut() = None;
    }

    pub fn set_transition(&self, transition: NavigationTransition) {
        *self.transition.borrow_mut() = transition;
    }

    /// Starts a page-level submission to `action`.
    pub fn begin_submission(&self, action: &str, method: &str) {
        self.set_transition(NavigationTransition::submitting(action, method));
    }

    /// Ends the submission in flight, recording what the action returned.
    pub fn finish_submission(&self, data: Option<Value>) {
        *self.action_data.borrow_mut() = data;
        self.set_transition(NavigationTransition::idle());
    }
}

impl PageSignals for PageState {
    fn action_data(&self) -> Option<Value> {
        self.action_data.borrow().clone()
    }

    fn transition(&self) -> NavigationTransition {
        self.transition.borrow().clone()
    }
}
