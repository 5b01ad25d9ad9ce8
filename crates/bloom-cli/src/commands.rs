use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use bloom_cli::workspace::{
    SessionFile, build_generator, load_module, objectives_with_status, parse_objective_id,
    ready_for_alignment,
};
use bloom_core::{ObjectiveStatus, Session};
use bloom_model::{ObjectiveId, SessionConfig};
use bloom_report::render_document;

use crate::cli::{
    AcceptArgs, AddArgs, AlignArgs, ConfigArgs, EditArgs, ExportArgs, GenerateArgs, IdArgs,
    IncludeArgs, InitArgs, ModuleArgs, OutlineArgs, TargetArgs,
};
use crate::summary::{
    print_alignment, print_config, print_inclusion, print_module_load, print_notice,
    print_objective, print_outline, print_questions, print_status,
};

pub fn run_init(path: &Path, args: &InitArgs) -> Result<()> {
    let mut config = SessionConfig::default();
    args.config.apply(&mut config);
    let file = SessionFile::create(path, config, args.force)?;
    println!("Started session {}", file.path().display());
    print_config(file.session.config());
    Ok(())
}

pub fn run_module(path: &Path, args: &ModuleArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let load = load_module(&mut file.session, &args.files)?;
    if let Some(guidance) = &args.guidance {
        file.session.set_outline_guidance(guidance.as_str());
    }
    file.save()?;
    print_module_load(&load);
    Ok(())
}

pub fn run_reset_module(path: &Path) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    if !file.session.has_module_content() {
        println!("No module content to remove.");
        return Ok(());
    }
    let report = file.session.reset_module_content();
    file.save()?;
    println!("Module content removed.");
    print_notice(report.as_ref());
    Ok(())
}

pub fn run_outline(path: &Path, args: &OutlineArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    if let Some(guidance) = &args.guidance {
        file.session.set_outline_guidance(guidance.as_str());
    }
    let mut generator = build_generator(
        file.session.config(),
        args.generation.seed,
        &args.generation.responses,
    )?;
    let outline = file.session.generate_outline(generator.as_mut())?.clone();
    file.save()?;
    print_outline(&outline);
    Ok(())
}

pub fn run_add(path: &Path, args: &AddArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let id = match &args.id {
        Some(raw) => {
            let id = parse_objective_id(raw)?;
            file.session.add_objective_with_id(id.clone())?;
            id
        }
        None => file.session.add_objective(),
    };
    if args.text.is_some() || args.level.is_some() {
        let text = args.text.clone().unwrap_or_default();
        file.session.edit_objective(&id, text, args.level)?;
    }
    file.save()?;
    println!("Added objective {id}");
    Ok(())
}

pub fn run_edit(path: &Path, args: &EditArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let id = parse_objective_id(&args.id)?;
    let current = file.session.objective(&id)?;
    let text = args.text.clone().unwrap_or_else(|| current.text.clone());
    let level = if args.clear_level {
        None
    } else {
        args.level.or(current.intended_level)
    };

    let report = file.session.edit_objective(&id, text, level)?;
    file.save()?;
    match report {
        Some(report) => print_notice(Some(&report)),
        None => println!("{id} updated; nothing derived was affected."),
    }
    Ok(())
}

pub fn run_delete(path: &Path, args: &IdArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let id = parse_objective_id(&args.id)?;
    file.session.delete_objective(&id)?;
    file.save()?;
    println!("Deleted objective {id}");
    Ok(())
}

pub fn run_align(path: &Path, args: &AlignArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let targets = resolve_targets(&file.session, &args.target, ready_for_alignment)?;
    if targets.is_empty() {
        println!("No draft objectives with text and a Bloom level to align.");
        return Ok(());
    }
    let mut generator = build_generator(
        file.session.config(),
        args.generation.seed,
        &args.generation.responses,
    )?;

    let mut failed = 0usize;
    for id in &targets {
        let span = info_span!("align", objective = %id);
        let _guard = span.enter();
        match file.session.run_alignment(id, generator.as_mut()) {
            Ok(alignment) => print_alignment(id, alignment),
            Err(error) => {
                warn!(%error, "alignment failed");
                eprintln!("error: {id}: {}", error.user_message());
                failed += 1;
            }
        }
    }
    file.save()?;
    if failed > 0 {
        bail!("{failed} of {} alignment check(s) failed", targets.len());
    }
    Ok(())
}

pub fn run_accept(path: &Path, args: &AcceptArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let id = parse_objective_id(&args.id)?;
    let acceptance = if args.suggestion {
        file.session.accept_suggestion(&id)?
    } else if let Some(final_text) = &args.final_text {
        file.session.set_final_text(&id, final_text.as_str())?
    } else {
        file.session.accept_as_final(&id)?
    };
    file.save()?;
    println!("{id} accepted as final: {}", acceptance.final_text);
    print_notice(acceptance.invalidation.as_ref());
    Ok(())
}

pub fn run_reopen(path: &Path, args: &IdArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let id = parse_objective_id(&args.id)?;
    file.session.reopen(&id)?;
    file.save()?;
    println!("{id} reopened ({})", file.session.status(&id)?);
    Ok(())
}

pub fn run_generate(path: &Path, args: &GenerateArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let targets = resolve_targets(&file.session, &args.target, |session| {
        objectives_with_status(session, ObjectiveStatus::Finalized)
    })?;
    if targets.is_empty() {
        println!("No finalized objectives are waiting for questions.");
        return Ok(());
    }
    let mut generator = build_generator(
        file.session.config(),
        args.generation.seed,
        &args.generation.responses,
    )?;

    let mut failed = 0usize;
    for id in &targets {
        let span = info_span!("generate", objective = %id);
        let _guard = span.enter();
        match file.session.generate_questions(id, generator.as_mut()) {
            Ok(questions) => {
                println!("{id}: {} question(s)", questions.len());
                print_questions(questions);
            }
            Err(error) => {
                warn!(%error, "question generation failed");
                eprintln!("error: {id}: {}", error.user_message());
                failed += 1;
            }
        }
    }
    file.save()?;
    if failed > 0 {
        bail!("{failed} of {} question set(s) failed", targets.len());
    }
    Ok(())
}

pub fn run_include(path: &Path, args: &IncludeArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    file.session.set_inclusion_options(args.options());
    file.save()?;
    print_inclusion(file.session.inclusion_options());
    Ok(())
}

pub fn run_export(path: &Path, args: &ExportArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    let session = &mut file.session;

    for objective in session.objectives() {
        let id = &objective.id;
        if objective.final_text.is_none() {
            warn!(objective = %id, "objective is not accepted and is left out of the export");
        } else if session.questions(id).is_empty() {
            warn!(objective = %id, "objective has no questions and is left out of the export");
        }
    }

    session
        .build_export(render_document)
        .context("render assessment document")?;
    let Some(artifact) = session.downloadable_export() else {
        bail!("the export no longer matches the session; run the export again");
    };

    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&args.output, &artifact.bytes)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(path = %args.output.display(), bytes = artifact.bytes.len(), "export written");

    let questions: usize = session.question_sets().values().map(Vec::len).sum();
    println!(
        "Exported {questions} question(s) to {}",
        args.output.display()
    );
    Ok(())
}

pub fn run_status(path: &Path) -> Result<()> {
    let file = SessionFile::open(path)?;
    println!("Session: {}", file.path().display());
    print_status(&file.session);
    Ok(())
}

pub fn run_show(path: &Path, args: &IdArgs) -> Result<()> {
    let file = SessionFile::open(path)?;
    let id = parse_objective_id(&args.id)?;
    print_objective(&file.session, &id)
}

pub fn run_config(path: &Path, args: &ConfigArgs) -> Result<()> {
    let mut file = SessionFile::open(path)?;
    if args.apply(file.session.config_mut()) {
        file.save()?;
    }
    print_config(file.session.config());
    Ok(())
}

/// The objective named on the command line, or every ready one for `--all`.
fn resolve_targets(
    session: &Session,
    target: &TargetArgs,
    ready: impl Fn(&Session) -> Vec<ObjectiveId>,
) -> Result<Vec<ObjectiveId>> {
    match &target.id {
        Some(raw) => {
            let id = parse_objective_id(raw)?;
            session.objective(&id)?;
            Ok(vec![id])
        }
        None => Ok(ready(session)),
    }
}
