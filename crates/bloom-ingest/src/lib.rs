//! Module content extraction.
//!
//! Turns uploaded files into the single module text that every learning
//! objective depends on.
//!
//! # Features
//!
//! - **Formats**: plain text and Markdown, Word (`.docx`) and PowerPoint
//!   (`.pptx`) documents
//! - **Per-file failures**: unsupported or corrupt files are reported and
//!   skipped, the rest still extract
//! - **Normalisation**: unified line endings, collapsed horizontal space
//! - **Token budget**: word-based estimate checked against a limit
//!
//! # Example
//!
//! ```ignore
//! use bloom_ingest::{SourceFile, extract};
//!
//! let files = vec![SourceFile::from_path(Path::new("week1.txt"))?];
//! let extraction = extract(&files);
//! extraction.ensure_within(27_000)?;
//! ```

mod error;
mod extract;
mod office;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Extraction ===
pub use extract::{Extraction, FILE_BREAK, estimate_tokens, extract, extract_file, normalize};

// === Source Files ===
pub use source::{FileKind, SourceFile};
