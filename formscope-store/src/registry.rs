//! Form registry: one container per form id, plus the selector cache.

use crate::container::{ContainerInner, FormContainer};
use crate::field::FieldInfo;
use crate::projection::Projection;
use crate::selector::{Selector, SelectorInner, SelectorKey};
use crate::state::FormState;
use formscope_types::{FieldErrors, FormId, ValueSet};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Entry count after which dead entries are swept on insert.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 64;

/// Sweep trigger for one map. Doubles when a sweep leaves the map at or above
/// it, so inserts into a map of live entries stay amortized O(1).
struct SweepTrigger {
    base: usize,
    at: Cell<usize>,
}

impl SweepTrigger {
    fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            base: threshold,
            at: Cell::new(threshold),
        }
    }

    fn due(&self, len: usize) -> bool {
        len >= self.at.get()
    }

    fn rearm(&self, len: usize) {
        let mut at = self.base;
        while len >= at {
            at = at.saturating_mul(2);
        }
        self.at.set(at);
    }

    fn current(&self) -> usize {
        self.at.get()
    }
}

/// How long the registry keeps containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// A container lives while some consumer holds it (a handle, selector or
    /// subscription). A form recreated after that gets a fresh container.
    #[default]
    Weak,
    /// Containers live as long as the registry.
    Pinned,
}

/// Projections over [`FormState`] that every form uses. Created once per
/// registry so their selectors are shared.
#[derive(Debug, Clone)]
pub struct BuiltinProjections {
    pub hydrated: Projection<bool>,
    pub default_values: Projection<ValueSet>,
    pub field_errors: Projection<FieldErrors>,
    pub has_been_submitted: Projection<bool>,
}

impl BuiltinProjections {
    fn new() -> Self {
        Self {
            hydrated: Projection::new(|state: &FormState| state.hydrated),
            default_values: Projection::new(|state: &FormState| state.default_values.clone()),
            field_errors: Projection::new(FormState::field_errors),
            has_been_submitted: Projection::new(|state: &FormState| state.has_been_submitted),
        }
    }
}

/// Maps form ids to their containers and memoizes selectors.
pub struct FormRegistry {
    retention: RetentionPolicy,
    entry_sweep: SweepTrigger,
    selector_sweep: SweepTrigger,
    entries: RefCell<HashMap<FormId, Weak<ContainerInner>>>,
    pinned: RefCell<Vec<FormContainer>>,
    selectors: RefCell<HashMap<SelectorKey, Weak<dyn Any>>>,
    builtins: BuiltinProjections,
}

impl FormRegistry {
    /// Creates a registry with weak retention.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(RetentionPolicy::Weak, DEFAULT_SWEEP_THRESHOLD)
    }

    pub fn with_retention(retention: RetentionPolicy, sweep_threshold: usize) -> Self {
        Self {
            retention,
            entry_sweep: SweepTrigger::new(sweep_threshold),
            selector_sweep: SweepTrigger::new(sweep_threshold),
            entries: RefCell::new(HashMap::new()),
            pinned: RefCell::new(Vec::new()),
            selectors: RefCell::new(HashMap::new()),
            builtins: BuiltinProjections::new(),
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    pub fn builtins(&self) -> &BuiltinProjections {
        &self.builtins
    }

    /// Returns the live container for `form_id` without creating one.
    pub fn get(&self, form_id: &FormId) -> Option<FormContainer> {
        self.entries
            .borrow()
            .get(form_id)
            .and_then(Weak::upgrade)
            .map(FormContainer::from_inner)
    }

    /// Returns the container for `form_id`, creating an unhydrated one on
    /// first access. Repeated calls return the same instance.
    pub fn get_or_create(&self, form_id: &FormId) -> FormContainer {
        if let Some(existing) = self.get(form_id) {
            return existing;
        }

        if self.entry_sweep.due(self.entries.borrow().len()) {
            self.sweep_entries();
        }

        let container = FormContainer::new(form_id.clone());
        debug!(form = %form_id, container = %container.id(), "created form container");
        self.entries
            .borrow_mut()
            .insert(form_id.clone(), container.downgrade());
        if self.retention == RetentionPolicy::Pinned {
            self.pinned.borrow_mut().push(container.clone());
        }
        container
    }

    /// Returns the selector for `(container, projection)`, reusing a live one
    /// built from the same projection instance.
    pub fn select<T>(&self, container: &FormContainer, projection: &Projection<T>) -> Selector<T>
    where
        T: Clone + PartialEq + 'static,
    {
        let key = SelectorKey::projection(container.id(), projection.id());
        self.cached(key, container, || projection.clone())
    }

    /// Returns the field info selector for `name`, creating the field's
    /// metadata entry on first read.
    pub fn field_info(&self, container: &FormContainer, name: &str) -> Selector<FieldInfo> {
        let key = SelectorKey::field(container.id(), name);
        container.ensure_field(name);
        self.cached(key, container, || FieldInfo::projection(name))
    }

    fn cached<T>(
        &self,
        key: SelectorKey,
        container: &FormContainer,
        projection: impl FnOnce() -> Projection<T>,
    ) -> Selector<T>
    where
        T: Clone + PartialEq + 'static,
    {
        let live = self.selectors.borrow().get(&key).and_then(Weak::upgrade);
        if let Some(inner) = live.and_then(|any| any.downcast::<SelectorInner<T>>().ok()) {
            return Selector::from_inner(inner);
        }

        debug!(?key, "selector cache miss");
        let selector = Selector::attach(key.clone(), container, projection());
        if self.selector_sweep.due(self.selectors.borrow().len()) {
            self.sweep_selectors();
        }
        let weak: Weak<dyn Any> = selector.downgrade();
        self.selectors.borrow_mut().insert(key, weak);
        selector
    }

    /// Number of forms whose container is still alive.
    pub fn live_count(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|e| e.strong_count() > 0)
            .count()
    }

    /// Number of selector cache entries, live or not yet swept.
    pub fn selector_entry_count(&self) -> usize {
        self.selectors.borrow().len()
    }

    /// Entry counts at which the next automatic sweep of the container map
    /// and the selector cache happen.
    pub fn sweep_thresholds(&self) -> (usize, usize) {
        (self.entry_sweep.current(), self.selector_sweep.current())
    }

    /// Number of cached selectors still alive.
    pub fn cached_selector_count(&self) -> usize {
        self.selectors
            .borrow()
            .values()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    /// Drops registry entries and cached selectors that are no longer alive.
    /// Returns the number of container entries removed.
    pub fn sweep(&self) -> usize {
        self.sweep_selectors();
        self.sweep_entries()
    }

    fn sweep_entries(&self) -> usize {
        let (removed, remaining) = {
            let mut entries = self.entries.borrow_mut();
            let before = entries.len();
            entries.retain(|_, e| e.strong_count() > 0);
            (before - entries.len(), entries.len())
        };
        self.entry_sweep.rearm(remaining);
        if removed > 0 {
            debug!(removed, remaining, "swept dead form containers");
        }
        removed
    }

    fn sweep_selectors(&self) -> usize {
        let (removed, remaining) = {
            let mut selectors = self.selectors.borrow_mut();
            let before = selectors.len();
            selectors.retain(|_, s| s.strong_count() > 0);
            (before - selectors.len(), selectors.len())
        };
        self.selector_sweep.rearm(remaining);
        if removed > 0 {
            debug!(removed, remaining, "swept dead selectors");
        }
        removed
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}
