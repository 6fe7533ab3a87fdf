//! Selectors: memoized, subscribable views over a container.
//!
//! A selector caches the projected value and recomputes it whenever its
//! container is updated. Listeners fire only when the value changed.
//! Selectors stay alive while a [`Selector`] handle or a [`Subscription`]
//! refers to them; the registry cache holds them weakly.

use crate::container::{ContainerId, FormContainer, StateObserver};
use crate::projection::{Projection, ProjectionId};
use crate::state::FormState;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// What a selector derives from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorSource {
    Projection(ProjectionId),
    /// Field info for a named field.
    Field(String),
}

/// Cache key of a selector: one container plus one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorKey {
    pub container: ContainerId,
    pub source: SelectorSource,
}

impl SelectorKey {
    pub fn projection(container: ContainerId, projection: ProjectionId) -> Self {
        Self {
            container,
            source: SelectorSource::Projection(projection),
        }
    }

    pub fn field(container: ContainerId, name: impl Into<String>) -> Self {
        Self {
            container,
            source: SelectorSource::Field(name.into()),
        }
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

pub(crate) struct SelectorInner<T> {
    key: SelectorKey,
    container: FormContainer,
    projection: Projection<T>,
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener: Cell<u64>,
}

impl<T: Clone + PartialEq + 'static> StateObserver for SelectorInner<T> {
    fn refresh(&self, state: &FormState) -> bool {
        let next = self.projection.project(state);
        let mut value = self.value.borrow_mut();
        if *value == next {
            return false;
        }
        *value = next;
        true
    }

    fn emit(&self) {
        let value = self.value.borrow().clone();
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&value);
        }
    }
}

pub(crate) trait Unsubscribe {
    fn unsubscribe(&self, listener: u64);
}

impl<T> Unsubscribe for SelectorInner<T> {
    fn unsubscribe(&self, listener: u64) {
        self.listeners.borrow_mut().retain(|(id, _)| *id != listener);
    }
}

/// Read handle over a derived slice of one form's state.
pub struct Selector<T> {
    inner: Rc<SelectorInner<T>>,
}

impl<T: Clone + PartialEq + 'static> Selector<T> {
    /// Builds a selector and attaches it to the container.
    pub(crate) fn attach(key: SelectorKey, container: &FormContainer, projection: Projection<T>) -> Self {
        let value = container.read(|state| projection.project(state));
        let inner = Rc::new(SelectorInner {
            key,
            container: container.clone(),
            projection,
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        });
        let observer: Rc<dyn StateObserver> = inner.clone();
        container.observe(Rc::downgrade(&observer));
        Self { inner }
    }

    pub(crate) fn from_inner(inner: Rc<SelectorInner<T>>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<SelectorInner<T>> {
        Rc::downgrade(&self.inner)
    }

    /// Returns the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Subscribes to future changes. The listener runs after every update
    /// that changes this selector's value, until the subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        let source: Rc<dyn Unsubscribe> = self.inner.clone();
        Subscription {
            source: Some(source),
            listener: id,
        }
    }
}

impl<T> Selector<T> {
    pub fn key(&self) -> &SelectorKey {
        &self.inner.key
    }

    pub fn container(&self) -> &FormContainer {
        &self.inner.container
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Returns true if both handles refer to the same selector instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("key", &self.inner.key)
            .field("value", &self.inner.value.borrow())
            .finish_non_exhaustive()
    }
}

/// Keeps a listener attached to a selector. Dropping it detaches the
/// listener and releases the selector.
#[must_use = "dropping a subscription detaches its listener"]
pub struct Subscription {
    source: Option<Rc<dyn Unsubscribe>>,
    listener: u64,
}

impl Subscription {
    /// Detaches the listener now.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.take() {
            source.unsubscribe(self.listener);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
