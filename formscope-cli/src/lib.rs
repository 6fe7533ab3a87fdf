//! Library half of the `formscope` inspector binary.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use formscope::{
    evaluate_response, ChannelState, FieldErrors, FormContext, FormHost, FormId, FormScopeConfig,
    PageSignals, PageState, ResolvedDefaults, ResponseMatch, Scope, SubmissionChannel, ValueSet,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "formscope")]
#[command(about = "Show how a form resolves page signals into its render state")]
pub struct Args {
    /// Page-level action data (JSON file)
    #[arg(long)]
    pub action_data: Option<PathBuf>,

    /// Explicit form id; a generated id is used when omitted
    #[arg(long)]
    pub form_id: Option<String>,

    /// The form's subaction
    #[arg(long)]
    pub subaction: Option<String>,

    /// Submit through a dedicated channel in this state
    #[arg(long, value_enum)]
    pub channel: Option<ChannelArg>,

    /// Data returned through the dedicated channel (JSON file)
    #[arg(long, requires = "channel")]
    pub channel_data: Option<PathBuf>,

    /// A page-level submission is in flight
    #[arg(long)]
    pub navigating: bool,

    /// Caller-supplied default values (JSON file)
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Hydrate the form with these stored defaults (JSON file) first
    #[arg(long)]
    pub hydrate: Option<PathBuf>,

    /// Path to the formscope config file
    #[arg(long, default_value = "formscope.toml")]
    pub config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    Idle,
    Submitting,
    Loading,
}

impl From<ChannelArg> for ChannelState {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Idle => ChannelState::Idle,
            ChannelArg::Submitting => ChannelState::Submitting,
            ChannelArg::Loading => ChannelState::Loading,
        }
    }
}

/// What the form would see on this render.
#[derive(Debug, Serialize)]
pub struct Report {
    pub form_id: String,
    pub explicit: bool,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
    pub field_errors: FieldErrors,
    pub defaults: ResolvedDefaults,
    pub submitting: bool,
}

/// Builds the page and form described by `args` and resolves them.
pub fn inspect(args: &Args) -> Result<Report> {
    let config = FormScopeConfig::load_from(&args.config);

    let page = Rc::new(PageState::new());
    if let Some(path) = &args.action_data {
        page.set_action_data(read_json(path)?);
    }
    if args.navigating {
        page.begin_submission("(inspect)", "post");
    }
    let host = FormHost::with_config(&config, page.clone());

    let form_id = args
        .form_id
        .clone()
        .map(FormId::Explicit)
        .unwrap_or_else(FormId::generate);
    let mut context = FormContext::new(form_id.clone());
    context.subaction = args.subaction.clone();
    if let Some(path) = &args.defaults {
        context.default_values_prop = Some(read_values(path)?);
    }
    if let Some(state) = args.channel {
        let data = args.channel_data.as_deref().map(read_json).transpose()?;
        context.channel = Some(SubmissionChannel {
            state: state.into(),
            data,
        });
    }
    debug!(form = %form_id, "inspecting form");

    let scope = Scope::root("inspect").provide_form("form", context.clone());
    let updater = host.form_updater(&form_id);
    if let Some(path) = &args.hydrate {
        updater.hydrate(read_values(path)?);
    }

    let page_data = match context.channel {
        Some(_) => None,
        None => page.action_data(),
    };
    let (matched, rejection, field_errors) = match evaluate_response(&context, page_data.as_ref()) {
        ResponseMatch::Accepted(response) => (true, None, response.field_errors),
        ResponseMatch::Rejected(reason) => (false, Some(reason.to_string()), FieldErrors::new()),
    };

    let report = Report {
        form_id: form_id.to_string(),
        explicit: form_id.is_explicit(),
        matched,
        rejection,
        field_errors,
        defaults: host.resolved_defaults_for_form(&scope, &context),
        submitting: host.has_active_form_submit(&context),
    };
    scope.end();
    Ok(report)
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn read_values(path: &Path) -> Result<ValueSet> {
    let value = read_json(path)?;
    ValueSet::from_json(value).with_context(|| format!("invalid value set in {}", path.display()))
}
