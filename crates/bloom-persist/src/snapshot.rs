//! The snapshot document and its conversion to and from a session.

use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use bloom_core::{DomainState, Session};

use crate::error::{PersistError, Result};

/// Current snapshot schema version.
pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// A saved session.
///
/// ```text
/// { "saved_at": "...", "version": 1, "state": { <domain keys> } }
/// ```
///
/// `state` carries only the allow-listed domain keys of [`DomainState`].
/// Unknown keys inside it are ignored and missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO-8601 timestamp of the save.
    pub saved_at: String,
    pub version: u32,
    pub state: DomainState,
}

impl Snapshot {
    pub fn new(state: DomainState) -> Self {
        Self {
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: CURRENT_SNAPSHOT_VERSION,
            state,
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| PersistError::Serialization { source })
    }

    /// Check structural invariants a session relies on.
    pub fn validate(&self) -> Result<()> {
        if self.version > CURRENT_SNAPSHOT_VERSION {
            return Err(PersistError::UnsupportedVersion {
                found: u64::from(self.version),
                max_supported: CURRENT_SNAPSHOT_VERSION,
            });
        }

        let mut seen = HashSet::new();
        for objective in &self.state.objectives {
            if !seen.insert(&objective.id) {
                return Err(PersistError::DuplicateObjective {
                    id: objective.id.clone(),
                });
            }
        }
        if let Some(orphan) = self.state.questions.keys().find(|id| !seen.contains(id)) {
            return Err(PersistError::invalid(format!(
                "questions stored for unknown objective {orphan}"
            )));
        }
        Ok(())
    }
}

/// Snapshot of the session's durable domain state.
pub fn exportable_snapshot(session: &Session) -> Snapshot {
    Snapshot::new(session.domain_state())
}

/// Replace the session with the snapshot's state.
///
/// The snapshot is validated first; on error the session is untouched.
/// Stored signatures are restored as they are, so nothing is invalidated,
/// and the workflow returns to its first step.
pub fn restore_into(session: &mut Session, snapshot: Snapshot) -> Result<()> {
    snapshot.validate()?;
    info!(
        saved_at = %snapshot.saved_at,
        objectives = snapshot.state.objectives.len(),
        "restoring session"
    );
    *session = Session::from_domain_state(snapshot.state);
    Ok(())
}
