//! Save and restore Bloom authoring sessions.
//!
//! # Features
//!
//! - **Allow-listed state**: only the durable domain keys are written;
//!   workflow step, notices and export bytes never are
//! - **Atomic writes** to prevent half-written saves
//! - **Validated restore**: a bad snapshot is rejected before the current
//!   session is replaced
//!
//! # File Format
//!
//! ```text
//! {
//!   "saved_at": "2025-01-01T10:00:00Z",
//!   "version": 1,
//!   "state": {
//!     "config": {...}, "module": {...}, "outline_guidance": "...",
//!     "outline": {...}, "objectives": [...], "questions": {...},
//!     "inclusion_options": {...}
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bloom_persist::{save_snapshot, load_snapshot, restore_into};
//!
//! save_snapshot(&session, Path::new("session.json"))?;
//!
//! let snapshot = load_snapshot(Path::new("session.json"))?;
//! restore_into(&mut session, snapshot)?;
//! ```

mod error;
mod io;
mod snapshot;

pub use error::{PersistError, Result};
pub use io::{load_snapshot, parse_snapshot, save_snapshot};
pub use snapshot::{CURRENT_SNAPSHOT_VERSION, Snapshot, exportable_snapshot, restore_into};
