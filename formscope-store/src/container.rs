//! Observable per-form state container.
//!
//! A container is shared by every consumer of the same form. Mutations go
//! through [`FormContainer::update`], which notifies observers in two phases:
//! every observer first recomputes against the new state, then the ones whose
//! value changed deliver it to their listeners.

use crate::state::FormState;
use formscope_types::FormId;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a container instance, unique within the process.
///
/// A form that is dropped and later recreated under the same [`FormId`] gets
/// a new container id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Something derived from a container's state.
pub(crate) trait StateObserver {
    /// Recomputes from the post-mutation state. Returns true if the derived
    /// value changed.
    fn refresh(&self, state: &FormState) -> bool;

    /// Delivers the current derived value to listeners.
    fn emit(&self);
}

pub(crate) struct ContainerInner {
    id: ContainerId,
    form_id: FormId,
    state: RefCell<FormState>,
    observers: RefCell<Vec<Weak<dyn StateObserver>>>,
}

/// Shared handle to one form's state. Clones refer to the same container.
#[derive(Clone)]
pub struct FormContainer {
    inner: Rc<ContainerInner>,
}

impl FormContainer {
    pub(crate) fn new(form_id: FormId) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                id: ContainerId::next(),
                form_id,
                state: RefCell::new(FormState::new()),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<ContainerInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<ContainerInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    pub fn form_id(&self) -> &FormId {
        &self.inner.form_id
    }

    /// Returns true if both handles refer to the same container instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> FormState {
        self.inner.state.borrow().clone()
    }

    /// Reads the current state. `f` must not mutate this container.
    pub fn read<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Applies one logical update and notifies observers synchronously.
    pub fn update<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state)
        };
        self.notify();
        result
    }

    /// Creates the metadata entry for a field. Creating one is an update like
    /// any other: observers of the field map see it.
    pub(crate) fn ensure_field(&self, name: &str) {
        if self.read(|state| state.field(name).is_some()) {
            return;
        }
        self.update(|state| {
            state.field_mut(name);
        });
    }

    pub(crate) fn observe(&self, observer: Weak<dyn StateObserver>) {
        self.inner.observers.borrow_mut().push(observer);
    }

    /// Number of live observers (selectors) attached to this container.
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let observers: Vec<Rc<dyn StateObserver>> = {
            let mut observers = self.inner.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        let changed: Vec<Rc<dyn StateObserver>> = {
            let state = self.inner.state.borrow();
            observers
                .into_iter()
                .filter(|observer| observer.refresh(&state))
                .collect()
        };

        trace!(
            container = %self.inner.id,
            form = %self.inner.form_id,
            changed = changed.len(),
            "container updated"
        );

        for observer in changed {
            observer.emit();
        }
    }
}

impl fmt::Debug for FormContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormContainer")
            .field("id", &self.inner.id)
            .field("form_id", &self.inner.form_id)
            .finish_non_exhaustive()
    }
}
