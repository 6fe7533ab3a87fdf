//! Submission activity.

use crate::context::FormContext;
use formscope_types::NavigationTransition;

/// Whether the form is currently submitting.
///
/// A form with its own channel only looks at that channel; page navigation
/// is ignored for it. Other forms report any page-level submission.
pub fn has_active_submission(context: &FormContext, transition: &NavigationTransition) -> bool {
    match &context.channel {
        Some(channel) => channel.is_submitting(),
        None => transition.has_active_submission(),
    }
}
