//! Snapshot saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bloom_core::Session;

use crate::error::{PersistError, Result};
use crate::snapshot::{Snapshot, exportable_snapshot};

/// Save the session to a JSON snapshot file.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a half-written snapshot behind.
pub fn save_snapshot(session: &Session, path: &Path) -> Result<Snapshot> {
    let snapshot = exportable_snapshot(session);
    let json = snapshot.to_json()?;

    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| PersistError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| PersistError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Saved session to {}", path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_snapshot_writes_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let snapshot = save_snapshot(&Session::default(), &path).unwrap();
        assert_eq!(snapshot.version, 1);

        let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert!(json["state"]["objectives"].as_array().unwrap().is_empty());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
