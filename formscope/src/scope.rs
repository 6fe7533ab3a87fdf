//! Render scopes.
//!
//! A [`Scope`] stands for one component's place in the host's render tree.
//! It replaces an ambient global: the form context a component sees is the
//! one provided by its nearest enclosing form scope. A scope also owns the
//! subscriptions its component made while rendering, and drops them when the
//! host ends the scope.

use crate::context::FormContext;
use formscope_store::{Selector, SelectorKey, Subscription};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

type Invalidate = Rc<dyn Fn()>;

struct ScopeInner {
    label: String,
    parent: Option<Scope>,
    form: Option<FormContext>,
    invalidate: RefCell<Option<Invalidate>>,
    subscriptions: RefCell<HashMap<SelectorKey, Subscription>>,
    ended: Cell<bool>,
}

/// A component's position in the render tree.
#[derive(Clone)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

impl Scope {
    /// Creates a top-level scope with no ambient form.
    pub fn root(label: impl Into<String>) -> Self {
        Self::build(label.into(), None, None)
    }

    /// Creates a nested scope inheriting this scope's form context.
    pub fn child(&self, label: impl Into<String>) -> Self {
        Self::build(label.into(), Some(self.clone()), None)
    }

    /// Creates a nested scope that provides `context` to everything below it.
    pub fn provide_form(&self, label: impl Into<String>, context: FormContext) -> Self {
        Self::build(label.into(), Some(self.clone()), Some(context))
    }

    fn build(label: String, parent: Option<Scope>, form: Option<FormContext>) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                label,
                parent,
                form,
                invalidate: RefCell::new(None),
                subscriptions: RefCell::new(HashMap::new()),
                ended: Cell::new(false),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Sets the callback the host uses to re-render this scope's component.
    /// Scopes without one defer to their nearest ancestor's.
    pub fn set_invalidate(&self, invalidate: impl Fn() + 'static) {
        *self.inner.invalidate.borrow_mut() = Some(Rc::new(invalidate));
    }

    /// The form context provided by the nearest enclosing form scope.
    pub fn form_context(&self) -> Option<&FormContext> {
        self.inner
            .form
            .as_ref()
            .or_else(|| self.inner.parent.as_ref().and_then(Scope::form_context))
    }

    /// Subscribes this scope to `selector` until the scope ends. Repeated
    /// calls for the same selector (every render) subscribe once.
    pub(crate) fn watch<T>(&self, selector: &Selector<T>)
    where
        T: Clone + PartialEq + 'static,
    {
        if self.inner.ended.get() || self.inner.subscriptions.borrow().contains_key(selector.key()) {
            return;
        }
        let scope: Weak<ScopeInner> = Rc::downgrade(&self.inner);
        let subscription = selector.subscribe(move |_| {
            if let Some(inner) = scope.upgrade() {
                Scope { inner }.invalidate();
            }
        });
        self.inner
            .subscriptions
            .borrow_mut()
            .insert(selector.key().clone(), subscription);
    }

    fn invalidator(&self) -> Option<Invalidate> {
        if let Some(invalidate) = self.inner.invalidate.borrow().as_ref() {
            return Some(Rc::clone(invalidate));
        }
        self.inner.parent.as_ref().and_then(Scope::invalidator)
    }

    fn invalidate(&self) {
        trace!(scope = %self.inner.label, "scope invalidated");
        if let Some(invalidate) = self.invalidator() {
            invalidate();
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.borrow().len()
    }

    /// Ends the scope, disposing its subscriptions. Idempotent; a scope that
    /// has ended takes no new subscriptions.
    pub fn end(&self) {
        if self.inner.ended.replace(true) {
            return;
        }
        let subscriptions = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
        trace!(scope = %self.inner.label, count = subscriptions.len(), "scope ended");
        drop(subscriptions);
    }

    pub fn is_ended(&self) -> bool {
        self.inner.ended.get()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("label", &self.inner.label)
            .field("form", &self.inner.form.as_ref().map(|c| &c.form_id))
            .field("subscriptions", &self.subscription_count())
            .field("ended", &self.inner.ended.get())
            .finish()
    }
}
