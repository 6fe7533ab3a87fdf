//! Reactive form state for formscope.
//!
//! - [`FormState`] — the per-form data: hydration flag, defaults, field metadata
//! - [`FormContainer`] — shared, observable holder of one form's state
//! - [`FormRegistry`] — one container per [`FormId`](formscope_types::FormId)
//! - [`Projection`] / [`Selector`] — memoized derived views with push updates
//! - [`FormUpdater`] — write handle used by validation and form components
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). A mutation is one
//! logical update: all selectors of the container are recomputed before any
//! listener runs, so listeners never see a mix of old and new values.

mod container;
mod field;
mod projection;
mod registry;
mod selector;
mod state;
mod updater;

pub use container::{ContainerId, FormContainer};
pub use field::FieldInfo;
pub use projection::{Projection, ProjectionId};
pub use registry::{BuiltinProjections, FormRegistry, RetentionPolicy, DEFAULT_SWEEP_THRESHOLD};
pub use selector::{Selector, SelectorKey, SelectorSource, Subscription};
pub use state::{FieldMeta, FormState};
pub use updater::FormUpdater;
