//! The session file every command works on, plus the shared plumbing for
//! loading module content and choosing a content generator.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use bloom_core::{ContentGenerator, InvalidationReport, ObjectiveStatus, Session};
use bloom_generate::{MockGenerator, ModelGenerator, ScriptedProvider};
use bloom_ingest::{Extraction, IngestError, SourceFile, extract};
use bloom_model::{ObjectiveId, SessionConfig};
use bloom_persist::{PersistError, load_snapshot, restore_into, save_snapshot};

/// Session file used when `--session` is not given.
pub const DEFAULT_SESSION_PATH: &str = "session.json";

/// A session loaded from (and saved back to) a snapshot file.
#[derive(Debug)]
pub struct SessionFile {
    path: PathBuf,
    pub session: Session,
}

impl SessionFile {
    /// Start a new session and write it to `path`.
    pub fn create(path: &Path, config: SessionConfig, force: bool) -> Result<Self> {
        if path.exists() && !force {
            bail!(
                "session file {} already exists (pass --force to start over)",
                path.display()
            );
        }
        let file = Self {
            path: path.to_path_buf(),
            session: Session::new(config),
        };
        file.save()?;
        Ok(file)
    }

    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "no session at {}; run `bloom-author init` first",
                path.display()
            );
        }
        let snapshot = load_snapshot(path).map_err(persist_error)?;
        let mut session = Session::default();
        restore_into(&mut session, snapshot).map_err(persist_error)?;
        Ok(Self {
            path: path.to_path_buf(),
            session,
        })
    }

    pub fn save(&self) -> Result<()> {
        save_snapshot(&self.session, &self.path).map_err(persist_error)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn persist_error(error: PersistError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(suggestion) => format!("{} {suggestion}", error.user_message()),
        None => error.user_message(),
    };
    anyhow::Error::new(error).context(message)
}

pub fn parse_objective_id(raw: &str) -> Result<ObjectiveId> {
    ObjectiveId::new(raw).map_err(|error| anyhow!(error))
}

/// Pick the generator for one command.
///
/// Captured model responses take precedence: each file holds one raw model
/// answer and they are served in order. Otherwise mock mode answers with
/// canned data; live mode without captured responses is refused.
pub fn build_generator(
    config: &SessionConfig,
    seed: u64,
    responses: &[PathBuf],
) -> Result<Box<dyn ContentGenerator>> {
    if !responses.is_empty() {
        let raw = responses
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("read model response {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        info!(
            responses = raw.len(),
            model = %config.model,
            "validating captured model responses"
        );
        let provider = ScriptedProvider::new(raw);
        return Ok(Box::new(ModelGenerator::new(provider, config.model.clone())));
    }
    if config.mock_mode {
        return Ok(Box::new(MockGenerator::new(seed)));
    }
    bail!(
        "live mode needs captured model output: pass --response FILE, \
         or switch to mock mode with `bloom-author config --mock`"
    )
}

/// Outcome of uploading module files.
#[derive(Debug)]
pub struct ModuleLoad {
    pub extraction: Extraction,
    pub invalidation: Option<InvalidationReport>,
}

/// Read, extract and apply module files.
///
/// Files that cannot be read or extracted are reported and skipped; the
/// upload fails only when nothing usable is left or the combined text is
/// over the session's token limit.
pub fn load_module(session: &mut Session, paths: &[PathBuf]) -> Result<ModuleLoad> {
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for path in paths {
        match SourceFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(error) => unreadable.push(error),
        }
    }

    let mut extraction = extract(&files);
    extraction.failures.extend(unreadable);
    for failure in &extraction.failures {
        warn!(%failure, "skipped module file");
    }
    if extraction.is_empty() {
        bail!("none of the {} file(s) could be read", paths.len());
    }
    extraction
        .ensure_within(session.config().module_token_limit)
        .map_err(|error: IngestError| anyhow!(error.user_message()))?;

    let invalidation = session.apply_module_content(
        extraction.text.clone(),
        extraction.token_count,
        extraction.file_names.clone(),
    );
    Ok(ModuleLoad {
        extraction,
        invalidation,
    })
}

/// Ids of the objectives currently in `status`, in session order.
pub fn objectives_with_status(session: &Session, status: ObjectiveStatus) -> Vec<ObjectiveId> {
    session
        .objectives()
        .iter()
        .filter(|objective| session.status(&objective.id).ok() == Some(status))
        .map(|objective| objective.id.clone())
        .collect()
}

/// Draft objectives that have both text and a level, so can be aligned.
pub fn ready_for_alignment(session: &Session) -> Vec<ObjectiveId> {
    objectives_with_status(session, ObjectiveStatus::Draft)
        .into_iter()
        .filter(|id| {
            session.objective(id).is_ok_and(|objective| {
                !objective.text.trim().is_empty() && objective.intended_level.is_some()
            })
        })
        .collect()
}
