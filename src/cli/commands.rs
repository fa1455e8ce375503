//! Command handlers: wire the CLI's collaborators into the draft workflow.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::render;
use super::{Cli, Commands, CreateArgs, EditArgs, ShowArgs};
use crate::api::{CancelToken, HttpPostApi, PostApi};
use crate::config::{self, Config};
use crate::context::{AppContext, CurrentUser, Navigator, NoticeSink, Session, Severity};
use crate::core::{AuthToken, DraftState, PostId, RequestId, Username};
use crate::workflow::{DraftEditor, WorkflowError};
use crate::{Error, Result};

/// Session resolved once from flags/environment.
struct StaticSession {
    user: Option<CurrentUser>,
}

impl Session for StaticSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}

/// Flash messages land on stderr.
struct StderrNotices;

impl NoticeSink for StderrNotices {
    fn notify(&self, message: &str, severity: Severity) {
        eprintln!("[{}] {message}", severity.as_str());
    }
}

/// Records where the app would have navigated.
#[derive(Default)]
struct RecordedNav {
    paths: Mutex<Vec<String>>,
}

impl RecordedNav {
    fn last(&self) -> Option<String> {
        self.paths.lock().ok().and_then(|paths| paths.last().cloned())
    }

    fn any(&self) -> bool {
        self.paths.lock().map(|paths| !paths.is_empty()).unwrap_or(false)
    }
}

impl Navigator for RecordedNav {
    fn navigate(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }
}

pub(super) fn run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_or_init();
    config::apply_env_overrides(&mut cfg);
    if let Some(server) = &cli.server {
        cfg.server.base_url = server.clone();
    }

    let api: Arc<dyn PostApi> = Arc::new(HttpPostApi::new(&cfg.server));

    match &cli.command {
        Commands::Create(args) => create(&cli, &cfg, api, args),
        Commands::Edit(args) => edit(&cli, &cfg, api, args),
        Commands::Show(args) => show(&cli, api, args),
    }
}

fn create(cli: &Cli, cfg: &Config, api: Arc<dyn PostApi>, args: &CreateArgs) -> Result<()> {
    let (ctx, nav) = build_context(cli)?;
    let mut editor = DraftEditor::create(ctx, api, cfg.recovery);
    if !editor.is_active() {
        return Err(WorkflowError::NotLoggedIn.into());
    }

    editor.edit_title(args.title.clone());
    editor.blur_title();
    editor.edit_body(args.body.clone());
    editor.blur_body();

    if !editor.submit() {
        return Err(save_refused(editor.state()));
    }
    if !editor.pump_one(save_timeout(cfg)) {
        return Err(WorkflowError::SaveIncomplete {
            reason: "timed out waiting for the server".into(),
        }
        .into());
    }
    if editor.state().cant_save {
        return Err(WorkflowError::SaveIncomplete {
            reason: "the server rejected the save".into(),
        }
        .into());
    }

    let path = nav.last().unwrap_or_default();
    if cli.json {
        println!("{}", serde_json::json!({ "created": path }));
    } else {
        println!("created {path}");
    }
    Ok(())
}

fn edit(cli: &Cli, cfg: &Config, api: Arc<dyn PostApi>, args: &EditArgs) -> Result<()> {
    let id = PostId::new(args.id.clone())?;
    let (ctx, nav) = build_context(cli)?;
    let viewer = ctx
        .session
        .current_user()
        .map(|user| user.username)
        .ok_or(WorkflowError::NotLoggedIn)?;

    let mut editor = DraftEditor::edit(ctx, api, cfg.recovery, id.clone());
    if !editor.is_active() {
        return Err(WorkflowError::NotLoggedIn.into());
    }

    if !editor.pump_one(save_timeout(cfg)) {
        return Err(WorkflowError::LoadFailed {
            id,
            reason: "timed out waiting for the record".into(),
        }
        .into());
    }
    if editor.state().not_found {
        return Err(WorkflowError::PostMissing { id }.into());
    }
    // The hydration handler redirects on an ownership mismatch.
    if nav.any() {
        return Err(WorkflowError::NotOwner { viewer, id }.into());
    }

    if let Some(title) = &args.title {
        editor.edit_title(title.clone());
        editor.blur_title();
    }
    if let Some(body) = &args.body {
        editor.edit_body(body.clone());
        editor.blur_body();
    }

    if !editor.submit() {
        if !editor.state().is_dirty() {
            if !cli.json {
                println!("nothing to update");
            }
            return Ok(());
        }
        return Err(save_refused(editor.state()));
    }
    if !editor.pump_one(save_timeout(cfg)) {
        return Err(WorkflowError::SaveIncomplete {
            reason: "timed out waiting for the server".into(),
        }
        .into());
    }
    if editor.state().cant_save {
        return Err(WorkflowError::SaveIncomplete {
            reason: "the server rejected the save".into(),
        }
        .into());
    }

    if cli.json {
        println!("{}", serde_json::json!({ "updated": id.as_str() }));
    } else {
        println!("updated {id}");
    }
    Ok(())
}

fn show(cli: &Cli, api: Arc<dyn PostApi>, args: &ShowArgs) -> Result<()> {
    let id = PostId::new(args.id.clone())?;
    let record = api.fetch_post(&id, RequestId::new(), &CancelToken::new())?;
    let Some(record) = record else {
        return Err(WorkflowError::PostMissing { id }.into());
    };
    if cli.json {
        println!("{}", render::record_json(&record));
    } else {
        println!("{}", render::record_text(&record));
    }
    Ok(())
}

fn build_context(cli: &Cli) -> Result<(AppContext, Arc<RecordedNav>)> {
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("INKPOST_TOKEN").ok());
    let username = cli
        .user
        .clone()
        .or_else(|| std::env::var("INKPOST_USER").ok());

    let user = match (username, token) {
        (Some(name), Some(token)) => Some(CurrentUser {
            username: Username::new(name)?,
            token: AuthToken::new(token)?,
        }),
        _ => None,
    };

    let nav = Arc::new(RecordedNav::default());
    let ctx = AppContext::new(
        Arc::new(StaticSession { user }),
        Arc::new(StderrNotices),
        nav.clone(),
    );
    Ok((ctx, nav))
}

fn save_timeout(cfg: &Config) -> Duration {
    Duration::from_millis(cfg.server.timeout_ms.saturating_add(2_000))
}

fn save_refused(state: &DraftState) -> Error {
    let mut reasons = Vec::new();
    if state.title.has_errors {
        reasons.push(state.title.message.clone());
    }
    if state.body.has_errors {
        reasons.push(state.body.message.clone());
    }
    if reasons.is_empty() {
        reasons.push("draft is not saveable".into());
    }
    WorkflowError::SaveIncomplete {
        reason: reasons.join(" "),
    }
    .into()
}
