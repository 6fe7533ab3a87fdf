use formscope_store::{FormContainer, FormRegistry, FormState, Projection, RetentionPolicy, Selector};
use formscope_types::FormId;
use proptest::prelude::*;

// ── Identity guarantees ──────────────────────────────────────────

#[test]
fn same_id_returns_same_container() {
    let registry = FormRegistry::new();
    let id = FormId::explicit("login");
    let a = registry.get_or_create(&id);
    let b = registry.get_or_create(&id);
    assert!(FormContainer::ptr_eq(&a, &b));
    assert_eq!(a.id(), b.id());
}

#[test]
fn distinct_ids_return_distinct_containers() {
    let registry = FormRegistry::new();
    let a = registry.get_or_create(&FormId::explicit("a"));
    let b = registry.get_or_create(&FormId::explicit("b"));
    let c = registry.get_or_create(&FormId::generate());
    assert!(!FormContainer::ptr_eq(&a, &b));
    assert!(!FormContainer::ptr_eq(&a, &c));
    assert_ne!(a.id(), c.id());
}

#[test]
fn new_container_is_unhydrated_and_empty() {
    let registry = FormRegistry::new();
    let container = registry.get_or_create(&FormId::generate());
    let state = container.snapshot();
    assert!(!state.hydrated);
    assert!(state.default_values.is_empty());
    assert!(state.fields.is_empty());
    assert!(!state.has_been_submitted);
}

#[test]
fn container_remembers_its_form_id() {
    let registry = FormRegistry::new();
    let id = FormId::explicit("profile");
    assert_eq!(registry.get_or_create(&id).form_id(), &id);
}

#[test]
fn mutations_are_visible_through_every_handle() {
    let registry = FormRegistry::new();
    let id = FormId::explicit("shared");
    let writer = registry.get_or_create(&id);
    let reader = registry.get_or_create(&id);
    writer.update(|state| state.hydrated = true);
    assert!(reader.read(|state| state.hydrated));
}

// ── Retention ────────────────────────────────────────────────────

#[test]
fn weak_retention_releases_unreferenced_containers() {
    let registry = FormRegistry::new();
    let id = FormId::explicit("short-lived");
    let first = registry.get_or_create(&id);
    let first_id = first.id();
    first.update(|state| state.hydrated = true);
    drop(first);

    assert_eq!(registry.live_count(), 0);
    assert!(registry.get(&id).is_none());
    let second = registry.get_or_create(&id);
    assert_ne!(second.id(), first_id);
    assert!(!second.read(|state| state.hydrated));
}

#[test]
fn pinned_retention_keeps_containers() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Pinned, 4);
    let id = FormId::explicit("kept");
    let first_id = registry.get_or_create(&id).id();
    assert_eq!(registry.live_count(), 1);
    assert_eq!(registry.get_or_create(&id).id(), first_id);
}

#[test]
fn sweep_removes_dead_entries() {
    let registry = FormRegistry::new();
    let kept = registry.get_or_create(&FormId::explicit("kept"));
    for _ in 0..5 {
        registry.get_or_create(&FormId::generate());
    }
    assert_eq!(registry.sweep(), 5);
    assert_eq!(registry.live_count(), 1);
    assert!(registry.get(kept.form_id()).is_some());
}

#[test]
fn inserts_past_threshold_sweep_automatically() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Weak, 3);
    for _ in 0..10 {
        registry.get_or_create(&FormId::generate());
    }
    // The last insert swept everything before it.
    assert_eq!(registry.sweep(), 1);
}

#[test]
fn pinned_inserts_raise_the_sweep_threshold() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Pinned, 2);
    for _ in 0..10 {
        registry.get_or_create(&FormId::generate());
    }
    assert_eq!(registry.live_count(), 10);
    assert_eq!(registry.sweep_thresholds().0, 16);
}

#[test]
fn threshold_falls_back_once_entries_die() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Weak, 2);
    let held: Vec<_> = (0..5)
        .map(|_| registry.get_or_create(&FormId::generate()))
        .collect();
    assert_eq!(registry.sweep_thresholds().0, 8);
    drop(held);
    registry.sweep();
    assert_eq!(registry.sweep_thresholds().0, 2);
}

// ── Selector cache growth ────────────────────────────────────────

#[test]
fn throwaway_projections_do_not_grow_the_cache() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Weak, 8);
    let container = registry.get_or_create(&FormId::explicit("long-lived"));
    for _ in 0..10_000 {
        let value = registry
            .select(&container, &Projection::new(|s: &FormState| s.hydrated))
            .get();
        assert!(!value);
    }
    assert!(registry.selector_entry_count() <= 8);
    assert_eq!(registry.cached_selector_count(), 0);
}

#[test]
fn live_selectors_survive_cache_sweeps() {
    let registry = FormRegistry::with_retention(RetentionPolicy::Weak, 4);
    let container = registry.get_or_create(&FormId::explicit("f"));
    let projections: Vec<_> = (0..20)
        .map(|i| Projection::new(move |s: &FormState| s.fields.len() + i))
        .collect();
    let selectors: Vec<_> = projections
        .iter()
        .map(|p| registry.select(&container, p))
        .collect();

    for _ in 0..50 {
        drop(registry.select(&container, &Projection::new(|s: &FormState| s.hydrated)));
    }

    assert_eq!(registry.cached_selector_count(), 20);
    for (projection, selector) in projections.iter().zip(&selectors) {
        assert!(Selector::ptr_eq(&registry.select(&container, projection), selector));
    }
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn containers_are_one_per_id(names in prop::collection::vec("[a-z]{1,6}", 1..20)) {
        let registry = FormRegistry::with_retention(RetentionPolicy::Pinned, 64);
        for a in &names {
            for b in &names {
                let ca = registry.get_or_create(&FormId::explicit(a.clone()));
                let cb = registry.get_or_create(&FormId::explicit(b.clone()));
                prop_assert_eq!(FormContainer::ptr_eq(&ca, &cb), a == b);
            }
        }
    }
}
