//! Module content store.

use tracing::{debug, info};

use bloom_model::{CourseOutline, ModuleContent};

use crate::error::{GuardFailure, Result, WorkflowError};
use crate::generator::{ContentGenerator, OutlineRequest};
use crate::invalidation::{Change, InvalidationReport, invalidate};
use crate::session::Session;
use crate::signature::signature;

impl Session {
    /// Replace the module content with freshly extracted text.
    ///
    /// The signature covers the text only. When a previous module exists
    /// and its signature differs, every objective is invalidated before the
    /// content is replaced; re-applying identical text (even from files
    /// with other names) invalidates nothing.
    pub fn apply_module_content(
        &mut self,
        text: impl Into<String>,
        token_count: usize,
        file_names: Vec<String>,
    ) -> Option<InvalidationReport> {
        let text = text.into();
        let new_signature = signature(&text);

        let previous = self.module.as_ref().map(|module| module.signature.clone());
        let report = match previous {
            Some(previous) if previous != new_signature => {
                info!(%previous, current = %new_signature, "module signature changed");
                invalidate(self, Change::ModuleChanged)
            }
            Some(_) => {
                debug!("module content unchanged");
                None
            }
            None => None,
        };

        self.module = Some(ModuleContent {
            text,
            token_count,
            source_file_names: file_names,
            signature: new_signature,
        });
        report
    }

    /// Drop the uploaded module; objectives lose their derived state.
    pub fn reset_module_content(&mut self) -> Option<InvalidationReport> {
        let report = match self.module.take() {
            Some(_) => invalidate(self, Change::ModuleChanged),
            None => None,
        };
        self.outline_guidance.clear();
        report
    }

    /// Generate a course outline from the module content and guidance.
    pub fn generate_outline(
        &mut self,
        generator: &mut dyn ContentGenerator,
    ) -> Result<&CourseOutline> {
        if !self.has_module_content() {
            return Err(WorkflowError::SessionGuard {
                action: "generate an outline",
                failure: GuardFailure::MissingModuleContent,
            });
        }
        let request = OutlineRequest {
            guidance: &self.outline_guidance,
            source_material: self.module_text(),
        };
        let outline = generator.generate_outline(&request)?;
        info!(modules = outline.modules.len(), "outline generated");
        Ok(self.outline.insert(outline))
    }
}
