//! Export of learning objectives and their questions as a Word document.
//!
//! [`render_document`] is a pure function of the objectives, their question
//! sets and the inclusion options; the same inputs always give the same
//! document body.

pub mod document;
pub mod error;
pub mod package;

use tracing::info;

use bloom_model::{InclusionOptions, LearningObjective, QuestionSets};

pub use document::{DOCUMENT_TITLE, write_document};
pub use error::{ReportError, Result};
pub use package::{DOCUMENT_PART, write_package};

/// Render the assessment document as `.docx` bytes.
pub fn render_document(
    objectives: &[LearningObjective],
    questions: &QuestionSets,
    include: &InclusionOptions,
) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    write_document(&mut body, objectives, questions, include)?;
    let bytes = write_package(&body)?;
    info!(
        objectives = objectives.len(),
        bytes = bytes.len(),
        "rendered assessment document"
    );
    Ok(bytes)
}
