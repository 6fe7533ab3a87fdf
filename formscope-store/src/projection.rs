//! Projections: pure functions from form state to a derived value.
//!
//! Selectors are memoized by projection *instance*. Build a projection once
//! and clone it; every clone shares the same [`ProjectionId`]. Building a new
//! projection on each call is correct but never hits the selector cache.

use crate::state::FormState;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROJECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a projection instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectionId(u64);

impl ProjectionId {
    fn next() -> Self {
        Self(NEXT_PROJECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projection#{}", self.0)
    }
}

/// A stable, identity-carrying projection of [`FormState`].
pub struct Projection<T> {
    id: ProjectionId,
    project: Rc<dyn Fn(&FormState) -> T>,
}

impl<T> Projection<T> {
    /// Wraps `project` and assigns it a fresh id.
    pub fn new(project: impl Fn(&FormState) -> T + 'static) -> Self {
        Self {
            id: ProjectionId::next(),
            project: Rc::new(project),
        }
    }

    pub fn id(&self) -> ProjectionId {
        self.id
    }

    /// Applies the projection to a state snapshot.
    pub fn project(&self, state: &FormState) -> T {
        (self.project)(state)
    }
}

impl<T> Clone for Projection<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            project: Rc::clone(&self.project),
        }
    }
}

impl<T> fmt::Debug for Projection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection").field("id", &self.id).finish()
    }
}
