//! Per-render entry points.
//!
//! A [`FormHost`] owns the registry for one page and reads page-level
//! signals from the host's submission layer. Components call into it on
//! every render, passing their [`Scope`].

use crate::config::FormScopeConfig;
use crate::context::FormContext;
use crate::defaults::{resolve_default_values, ResolvedDefaults};
use crate::identity::{explicit_form_id, resolve_form_id};
use crate::matcher::match_response;
use crate::probe::has_active_submission;
use crate::scope::Scope;
use crate::signals::PageSignals;
use formscope_store::{FieldInfo, FormRegistry, FormUpdater, Projection, Selector};
use formscope_types::{FormId, Result, ValidationErrorResponse, ValueSet};
use std::rc::Rc;
use tracing::debug;

/// Form state resolution for one page.
pub struct FormHost {
    registry: FormRegistry,
    page: Rc<dyn PageSignals>,
}

impl FormHost {
    /// Creates a host with the default configuration.
    pub fn new(page: Rc<dyn PageSignals>) -> Self {
        Self::with_config(&FormScopeConfig::default(), page)
    }

    pub fn with_config(config: &FormScopeConfig, page: Rc<dyn PageSignals>) -> Self {
        debug!(
            retention = ?config.retention,
            sweep_threshold = config.sweep_threshold,
            "creating form host"
        );
        Self {
            registry: FormRegistry::with_retention(config.retention, config.sweep_threshold),
            page,
        }
    }

    pub fn registry(&self) -> &FormRegistry {
        &self.registry
    }

    pub fn page(&self) -> &dyn PageSignals {
        self.page.as_ref()
    }

    /// Resolves the form a hook refers to.
    ///
    /// With an explicit `form_id` the result carries only that id; otherwise
    /// it is the full context of the enclosing form.
    pub fn internal_form_context(
        &self,
        scope: &Scope,
        form_id: Option<&FormId>,
        hook: &str,
    ) -> Result<FormContext> {
        let form_id = explicit_form_id(form_id);
        let ambient = scope.form_context();
        let resolved = resolve_form_id(form_id, ambient.map(|c| &c.form_id), hook)?;
        match (form_id, ambient) {
            (None, Some(context)) => Ok(context.clone()),
            _ => Ok(FormContext::new(resolved)),
        }
    }

    /// Returns the selector for `projection` over the form's container and
    /// subscribes `scope` to it.
    pub fn context_selector<T>(
        &self,
        scope: &Scope,
        form_id: &FormId,
        projection: &Projection<T>,
    ) -> Selector<T>
    where
        T: Clone + PartialEq + 'static,
    {
        let container = self.registry.get_or_create(form_id);
        let selector = self.registry.select(&container, projection);
        scope.watch(&selector);
        selector
    }

    /// Reads `projection` for the form, subscribing `scope` to changes.
    pub fn context_select<T>(&self, scope: &Scope, form_id: &FormId, projection: &Projection<T>) -> T
    where
        T: Clone + PartialEq + 'static,
    {
        self.context_selector(scope, form_id, projection).get()
    }

    /// Resolves the form, then reads `projection` for it.
    pub fn unknown_form_context_select<T>(
        &self,
        scope: &Scope,
        form_id: Option<&FormId>,
        projection: &Projection<T>,
        hook: &str,
    ) -> Result<T>
    where
        T: Clone + PartialEq + 'static,
    {
        let context = self.internal_form_context(scope, form_id, hook)?;
        Ok(self.context_select(scope, &context.form_id, projection))
    }

    /// The validation failure that belongs to this form, if any.
    pub fn error_response_for_form(&self, context: &FormContext) -> Option<ValidationErrorResponse> {
        let page_data = match context.channel {
            Some(_) => None,
            None => self.page.action_data(),
        };
        match_response(context, page_data.as_ref())
    }

    /// The authoritative defaults for this form and where they came from.
    pub fn resolved_defaults_for_form(&self, scope: &Scope, context: &FormContext) -> ResolvedDefaults {
        let builtins = self.registry.builtins();
        let hydrated = self.context_select(scope, &context.form_id, &builtins.hydrated);
        let matched = self.error_response_for_form(context);
        let in_state = self.context_select(scope, &context.form_id, &builtins.default_values);
        resolve_default_values(
            matched.as_ref(),
            hydrated,
            &in_state,
            context.default_values_prop.as_ref(),
        )
    }

    /// The authoritative defaults for this form.
    pub fn default_values_for_form(&self, scope: &Scope, context: &FormContext) -> ValueSet {
        self.resolved_defaults_for_form(scope, context).values
    }

    /// Whether this form is submitting right now.
    pub fn has_active_form_submit(&self, context: &FormContext) -> bool {
        has_active_submission(context, &self.page.transition())
    }

    /// Reads field info for `name`, subscribing `scope` to changes.
    pub fn field_info(&self, scope: &Scope, form_id: &FormId, name: &str) -> FieldInfo {
        let container = self.registry.get_or_create(form_id);
        let selector = self.registry.field_info(&container, name);
        scope.watch(&selector);
        selector.get()
    }

    /// Write handle for the form's container.
    pub fn form_updater(&self, form_id: &FormId) -> FormUpdater {
        FormUpdater::new(self.registry.get_or_create(form_id))
    }
}
