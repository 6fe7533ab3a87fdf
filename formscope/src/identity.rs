//! Identity resolution.

use formscope_types::{Error, FormId, Result};
use tracing::warn;

/// Drops an empty explicit id; a blank `form_id` means "not given".
pub fn explicit_form_id(explicit: Option<&FormId>) -> Option<&FormId> {
    explicit.filter(|id| id.as_explicit() != Some(""))
}

/// Picks the form a call refers to.
///
/// An explicit id always wins, even when the caller is nested inside a
/// different form. Otherwise the ambient form from the caller's position in
/// the tree is used. With neither, the call fails naming `call_site`.
pub fn resolve_form_id(
    explicit: Option<&FormId>,
    ambient: Option<&FormId>,
    call_site: &str,
) -> Result<FormId> {
    if let Some(id) = explicit_form_id(explicit) {
        return Ok(id.clone());
    }
    if let Some(id) = ambient {
        return Ok(id.clone());
    }
    warn!(call_site, "no form id available");
    Err(Error::missing_form_context(call_site))
}
