//! File I/O for session snapshots.
//!
//! This module handles:
//! - Saving snapshots with atomic writes
//! - Loading snapshots with format and version validation

mod load;
mod save;

pub use load::{load_snapshot, parse_snapshot};
pub use save::save_snapshot;
