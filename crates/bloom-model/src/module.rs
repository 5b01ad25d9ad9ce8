use serde::{Deserialize, Serialize};

use crate::Signature;

/// Extracted source material for the module under design.
///
/// Replaced wholesale whenever new source files are processed. The
/// signature covers `text` only, never the file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub text: String,
    pub token_count: usize,
    pub source_file_names: Vec<String>,
    pub signature: Signature,
}

impl ModuleContent {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
