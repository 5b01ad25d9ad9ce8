//! CLI argument definitions for the Bloom authoring tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bloom_cli::workspace::DEFAULT_SESSION_PATH;
use bloom_model::{BloomLevel, InclusionOptions, SessionConfig};

#[derive(Parser)]
#[command(
    name = "bloom-author",
    version,
    about = "Bloom's Taxonomy authoring workflow - objectives, alignment and assessment questions",
    long_about = "Turn course material into Bloom-aligned learning objectives and \
                  multiple-choice questions.\n\n\
                  Every command reads and writes one session file. Editing module content \
                  or an objective clears everything derived from it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Session snapshot file.
    #[arg(
        long = "session",
        short = 's',
        value_name = "PATH",
        default_value = DEFAULT_SESSION_PATH,
        global = true
    )]
    pub session: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new session file.
    Init(InitArgs),

    /// Upload module content from .txt, .md, .docx or .pptx files.
    Module(ModuleArgs),

    /// Remove the uploaded module content.
    ResetModule,

    /// Generate a course outline from the module content.
    Outline(OutlineArgs),

    /// Add a learning objective.
    Add(AddArgs),

    /// Change an objective's text or intended Bloom level.
    Edit(EditArgs),

    /// Delete an objective and its questions.
    Delete(IdArgs),

    /// Check objectives against their intended Bloom level.
    Align(AlignArgs),

    /// Accept an objective as final.
    Accept(AcceptArgs),

    /// Withdraw an objective's final text.
    Reopen(IdArgs),

    /// Generate questions for finalized objectives.
    Generate(GenerateArgs),

    /// Choose which sections the export document contains.
    Include(IncludeArgs),

    /// Write the assessment document.
    Export(ExportArgs),

    /// Show the session overview.
    Status,

    /// Show one objective with its alignment and questions.
    Show(IdArgs),

    /// Show or change the session configuration.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct InitArgs {
    /// Replace an existing session file.
    #[arg(long = "force")]
    pub force: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser)]
pub struct ModuleArgs {
    /// Files holding the module content, combined in the order given.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Guidance for outline generation.
    #[arg(long = "guidance", value_name = "TEXT")]
    pub guidance: Option<String>,
}

#[derive(Parser)]
pub struct OutlineArgs {
    /// Replace the stored outline guidance first.
    #[arg(long = "guidance", value_name = "TEXT")]
    pub guidance: Option<String>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Id for the new objective (generated when omitted).
    #[arg(long = "id", value_name = "ID")]
    pub id: Option<String>,

    /// Objective text.
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// Intended Bloom level (remember, understand, apply, analyze, evaluate, create).
    #[arg(long = "level", value_name = "LEVEL")]
    pub level: Option<BloomLevel>,
}

#[derive(Parser)]
pub struct EditArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// New objective text.
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// New intended Bloom level.
    #[arg(long = "level", value_name = "LEVEL")]
    pub level: Option<BloomLevel>,

    /// Unset the intended Bloom level.
    #[arg(long = "clear-level", conflicts_with = "level")]
    pub clear_level: bool,
}

#[derive(Parser)]
pub struct IdArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

/// One objective by id, or every objective that is ready.
#[derive(Args)]
pub struct TargetArgs {
    #[arg(value_name = "ID", required_unless_present = "all", conflicts_with = "all")]
    pub id: Option<String>,

    /// Every objective that is ready for this step.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct GenerationArgs {
    /// Captured raw model response to validate instead of generating.
    ///
    /// Repeat for several objectives; responses are used in order.
    #[arg(long = "response", value_name = "FILE")]
    pub responses: Vec<PathBuf>,

    /// Seed for the mock scenario rotation.
    #[arg(long = "seed", value_name = "N", default_value_t = 0)]
    pub seed: u64,
}

#[derive(Parser)]
pub struct AlignArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Parser)]
pub struct AcceptArgs {
    #[arg(value_name = "ID")]
    pub id: String,

    /// Adopt the alignment's suggested rewrite.
    #[arg(long = "suggestion")]
    pub suggestion: bool,

    /// Replace the final text of an already accepted objective.
    #[arg(long = "final-text", value_name = "TEXT", conflicts_with = "suggestion")]
    pub final_text: Option<String>,
}

#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Sections are on unless switched off.
#[derive(Parser)]
pub struct IncludeArgs {
    /// Student copy: stems and options only.
    #[arg(long = "questions-only")]
    pub questions_only: bool,

    #[arg(long = "no-objectives")]
    pub no_objectives: bool,

    #[arg(long = "no-bloom-level")]
    pub no_bloom_level: bool,

    #[arg(long = "no-answer")]
    pub no_answer: bool,

    #[arg(long = "no-feedback")]
    pub no_feedback: bool,

    #[arg(long = "no-content-reference")]
    pub no_content_reference: bool,

    #[arg(long = "no-rationale")]
    pub no_rationale: bool,
}

impl IncludeArgs {
    pub fn options(&self) -> InclusionOptions {
        if self.questions_only {
            return InclusionOptions::questions_only();
        }
        InclusionOptions {
            objectives: !self.no_objectives,
            bloom_level: !self.no_bloom_level,
            answer: !self.no_answer,
            feedback: !self.no_feedback,
            content_reference: !self.no_content_reference,
            cognitive_rationale: !self.no_rationale,
        }
    }
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output .docx path.
    #[arg(value_name = "OUT")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Model identifier for live generation.
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Answer with canned mock data.
    #[arg(long = "mock", conflicts_with = "live")]
    pub mock: bool,

    /// Use real model output (captured with --response).
    #[arg(long = "live")]
    pub live: bool,

    /// Questions generated per objective.
    #[arg(long = "questions", value_name = "N", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub questions: Option<u8>,

    /// Token limit for module content.
    #[arg(long = "token-limit", value_name = "TOKENS")]
    pub token_limit: Option<usize>,
}

impl ConfigArgs {
    /// Apply the given flags; returns whether anything was set.
    pub fn apply(&self, config: &mut SessionConfig) -> bool {
        let mut changed = false;
        if let Some(model) = &self.model {
            config.model = model.clone();
            changed = true;
        }
        if self.mock || self.live {
            config.mock_mode = self.mock;
            changed = true;
        }
        if let Some(count) = self.questions {
            config.questions_per_objective = usize::from(count);
            changed = true;
        }
        if let Some(limit) = self.token_limit {
            config.module_token_limit = limit;
            changed = true;
        }
        changed
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
