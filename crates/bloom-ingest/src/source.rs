//! Uploaded source files.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Extraction strategy chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Plain text or Markdown.
    Text,
    /// WordprocessingML document.
    Docx,
    /// PresentationML deck.
    Pptx,
}

impl FileKind {
    /// Detect the kind from a file name (case-insensitive extension).
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("txt") || extension.eq_ignore_ascii_case("md") {
            Some(FileKind::Text)
        } else if extension.eq_ignore_ascii_case("docx") {
            Some(FileKind::Docx)
        } else if extension.eq_ignore_ascii_case("pptx") {
            Some(FileKind::Pptx)
        } else {
            None
        }
    }
}

/// One uploaded file: its display name and raw bytes.
///
/// Only the bytes feed the module signature; the name is metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after its final path component.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn kind(&self) -> Option<FileKind> {
        FileKind::from_name(&self.name)
    }
}
