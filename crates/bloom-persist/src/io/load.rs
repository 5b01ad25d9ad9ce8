//! Snapshot loading.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{PersistError, Result};
use crate::snapshot::{CURRENT_SNAPSHOT_VERSION, Snapshot};

/// Load a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path).map_err(|e| PersistError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let snapshot = parse_snapshot(&bytes)?;
    tracing::info!("Loaded session from {}", path.display());
    Ok(snapshot)
}

/// Parse and validate snapshot bytes.
///
/// The envelope is checked before the state is decoded, so a file from a
/// newer version reports its version rather than a decoding error.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| PersistError::invalid(format!("not JSON ({e})")))?;
    let Value::Object(mut envelope) = document else {
        return Err(PersistError::invalid("top level is not an object"));
    };

    let version = match envelope.get("version") {
        None => CURRENT_SNAPSHOT_VERSION,
        Some(Value::Number(number)) => {
            let found = number
                .as_u64()
                .ok_or_else(|| PersistError::invalid(format!("bad version {number}")))?;
            u32::try_from(found)
                .ok()
                .filter(|version| *version <= CURRENT_SNAPSHOT_VERSION)
                .ok_or(PersistError::UnsupportedVersion {
                    found,
                    max_supported: CURRENT_SNAPSHOT_VERSION,
                })?
        }
        Some(_) => return Err(PersistError::invalid("version is not a number")),
    };

    let state = match envelope.remove("state") {
        Some(state @ Value::Object(_)) => state,
        Some(_) => return Err(PersistError::invalid("'state' payload is not an object")),
        None => return Err(PersistError::invalid("missing 'state' payload")),
    };
    let state =
        serde_json::from_value(state).map_err(|source| PersistError::Deserialization { source })?;

    let saved_at = match envelope.get("saved_at") {
        Some(Value::String(saved_at)) => saved_at.clone(),
        _ => String::new(),
    };

    let snapshot = Snapshot {
        saved_at,
        version,
        state,
    };
    snapshot.validate()?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_snapshot(b"[1, 2, 3]"),
            Err(PersistError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_snapshot(b"not json"),
            Err(PersistError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_missing_state() {
        let err = parse_snapshot(br#"{"version": 1}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid snapshot format: missing 'state' payload"
        );
    }

    #[test]
    fn test_parse_future_version() {
        let err = parse_snapshot(br#"{"version": 7, "state": {"objectives": "later"}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion {
                found: 7,
                max_supported: 1
            }
        ));
    }
}
