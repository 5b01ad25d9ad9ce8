//! Derived-state core of the Bloom authoring workflow.
//!
//! Source material flows one way:
//!
//! ```text
//! module content -> learning objective -> alignment -> final text
//!                -> question set -> export document
//! ```
//!
//! Every derived artifact stores the signature of the inputs it was
//! produced from. An upstream edit that changes a signature clears exactly
//! the downstream state of the objectives it reaches and nothing else.
//!
//! - `signature` - content signatures and their canonical encoding
//! - `session` - the explicit state container
//! - `objective` - the learning objective state machine
//! - `module_store` - module content replacement
//! - `invalidation` - the cascade rules
//! - `export` - the export readiness gate
//! - `generator` - the seam to the external content generator

pub mod error;
pub mod export;
pub mod generator;
pub mod invalidation;
mod module_store;
pub mod objective;
pub mod session;
pub mod signature;

pub use error::{GuardFailure, Result, WorkflowError};
pub use export::{ExportArtifact, is_export_stale};
pub use generator::{AlignmentRequest, ContentGenerator, OutlineRequest, QuestionRequest};
pub use invalidation::{Change, InvalidationReport, invalidate};
pub use objective::{Acceptance, ObjectiveStatus};
pub use session::{DomainState, Session, WorkflowStep};
pub use signature::{
    alignment_signature, generation_signature, outline_signature, question_set_signature,
    signature,
};
