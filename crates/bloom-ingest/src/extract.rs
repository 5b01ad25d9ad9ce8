//! Combine uploaded files into one normalised module text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::office::{docx_text, pptx_text};
use crate::source::{FileKind, SourceFile};

/// Separator placed between the wrapped text of consecutive files.
pub const FILE_BREAK: &str = "\n\n----- FILE BREAK -----\n\n";

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n?").expect("Invalid line break regex"));
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid whitespace regex"));

/// Unify line endings, collapse runs of spaces and tabs, trim.
pub fn normalize(text: &str) -> String {
    let text = LINE_BREAKS.replace_all(text, "\n");
    let text = HORIZONTAL_SPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Token estimate used for the module budget: `ceil(words / 0.75)`.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    (words * 4).div_ceil(3)
}

/// Result of extracting a batch of uploaded files.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Wrapped, normalised text of every file that extracted. File names
    /// never appear here, so the text depends on file contents only.
    pub text: String,
    pub token_count: usize,
    /// Names of the files that contributed to `text`, in upload order.
    pub file_names: Vec<String>,
    /// Files that could not be extracted; the rest are unaffected.
    pub failures: Vec<IngestError>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }

    /// Fail when the combined content is over the token budget.
    pub fn ensure_within(&self, limit: usize) -> Result<()> {
        if self.token_count > limit {
            return Err(IngestError::TokenLimitExceeded {
                tokens: self.token_count,
                limit,
            });
        }
        Ok(())
    }
}

/// Extract the text of one file, normalised.
pub fn extract_file(file: &SourceFile) -> Result<String> {
    let kind = file
        .kind()
        .ok_or_else(|| IngestError::UnsupportedFileType {
            name: file.name.clone(),
        })?;
    let raw = match kind {
        FileKind::Text => String::from_utf8_lossy(&file.bytes).into_owned(),
        FileKind::Docx => docx_text(&file.name, &file.bytes)?,
        FileKind::Pptx => pptx_text(&file.name, &file.bytes)?,
    };
    Ok(normalize(&raw))
}

/// Extract every file, wrapping each in positional `<file N>` markers.
///
/// Files are combined in the order given and numbered from 1 among those
/// that extracted. A file that fails is recorded in
/// [`Extraction::failures`] and skipped.
pub fn extract(files: &[SourceFile]) -> Extraction {
    let mut parts = Vec::new();
    let mut extraction = Extraction::default();

    for file in files {
        match extract_file(file) {
            Ok(text) => {
                debug!(file = %file.name, chars = text.len(), "extracted file");
                let marker = format!("file {}", parts.len() + 1);
                parts.push(format!("<{marker}>\n\n{text}\n\n</{marker}>"));
                extraction.file_names.push(file.name.clone());
            }
            Err(error) => {
                warn!(file = %file.name, %error, "skipping file");
                extraction.failures.push(error);
            }
        }
    }

    extraction.text = parts.join(FILE_BREAK);
    extraction.token_count = estimate_tokens(&extraction.text);
    info!(
        files = extraction.file_names.len(),
        failed = extraction.failures.len(),
        tokens = extraction.token_count,
        "module content extracted"
    );
    extraction
}
