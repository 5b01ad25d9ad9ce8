use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use bloom_cli::workspace::ModuleLoad;
use bloom_core::{InvalidationReport, ObjectiveStatus, Session};
use bloom_model::{
    AlignmentLabel, AlignmentResult, CourseOutline, InclusionOptions, ObjectiveId, Question,
    SessionConfig,
};

pub fn print_notice(report: Option<&InvalidationReport>) {
    if let Some(report) = report {
        println!("notice: {}", report.notice());
    }
}

pub fn print_module_load(load: &ModuleLoad) {
    let extraction = &load.extraction;
    println!(
        "Module content: {} file(s), about {} tokens",
        extraction.file_names.len(),
        extraction.token_count
    );
    for name in &extraction.file_names {
        println!("  + {name}");
    }
    for failure in &extraction.failures {
        println!("  ! {}", failure.user_message());
    }
    print_notice(load.invalidation.as_ref());
}

pub fn print_status(session: &Session) {
    match session.module() {
        Some(module) => println!(
            "Module: {} ({} tokens, signature {})",
            module.source_file_names.join(", "),
            module.token_count,
            short_signature(module.signature.as_str())
        ),
        None => println!("Module: none uploaded"),
    }
    match session.outline() {
        Some(outline) => println!(
            "Outline: {} ({} modules, {} units)",
            outline.course_title,
            outline.modules.len(),
            outline.unit_count()
        ),
        None => println!("Outline: none"),
    }

    if session.objectives().is_empty() {
        println!("No learning objectives yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Level"),
        header_cell("Status"),
        header_cell("Alignment"),
        header_cell("Questions"),
        header_cell("Objective"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);

    for objective in session.objectives() {
        let status = session.status(&objective.id).ok();
        let level = match objective.intended_level {
            Some(level) => Cell::new(level),
            None => dim_cell("-"),
        };
        let alignment = match (&objective.alignment, status) {
            (Some(alignment), Some(status)) if status != ObjectiveStatus::Draft => {
                label_cell(alignment.label)
            }
            _ => dim_cell("-"),
        };
        let questions = session.questions(&objective.id).len();
        table.add_row(vec![
            Cell::new(&objective.id).add_attribute(Attribute::Bold),
            level,
            status.map_or_else(|| dim_cell("?"), status_cell),
            alignment,
            if questions == 0 {
                dim_cell("-")
            } else {
                Cell::new(questions)
            },
            Cell::new(objective.display_text()),
        ]);
    }
    println!("{table}");
}

pub fn print_alignment(id: &ObjectiveId, alignment: &AlignmentResult) {
    println!("{id}: {}", alignment.label);
    for reason in &alignment.reasons {
        println!("  - {reason}");
    }
    if let Some(rewrite) = &alignment.suggested_rewrite {
        println!("  suggested: {rewrite}");
    }
}

pub fn print_questions(questions: &[Question]) {
    for (index, question) in questions.iter().enumerate() {
        println!("{}. {}", index + 1, question.stem);
        for (id, option) in question.options.iter() {
            let marker = if id == question.correct_option_id {
                "*"
            } else {
                " "
            };
            println!("  {marker}({id}) {}", option.text);
            println!("       {}", option.rationale);
        }
        println!("  Content reference: {}", question.content_reference);
        println!("  Rationale for Bloom level: {}", question.cognitive_rationale);
    }
}

pub fn print_objective(session: &Session, id: &ObjectiveId) -> anyhow::Result<()> {
    let objective = session.objective(id)?;
    let status = session.status(id)?;
    println!("{id} [{status}]");
    println!("  Text: {}", objective.text);
    match objective.intended_level {
        Some(level) => println!("  Level: {level} ({})", level.definition()),
        None => println!("  Level: not set"),
    }
    if let Some(final_text) = &objective.final_text {
        println!("  Final: {final_text}");
    }
    if let Some(alignment) = &objective.alignment
        && status != ObjectiveStatus::Draft
    {
        print_alignment(id, alignment);
    }
    print_questions(session.questions(id));
    Ok(())
}

pub fn print_outline(outline: &CourseOutline) {
    println!("{}", outline.course_title);
    for objective in &outline.course_level_objectives {
        println!("  * {objective}");
    }
    for module in &outline.modules {
        println!("  {}", module.module_title);
        for section in &module.sections {
            println!("    {}", section.section_title);
            for unit in &section.units {
                println!("      - {}", unit.unit_title);
            }
        }
    }
}

pub fn print_config(config: &SessionConfig) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("model"), Cell::new(&config.model)]);
    table.add_row(vec![
        Cell::new("mode"),
        Cell::new(if config.mock_mode { "mock" } else { "live" }),
    ]);
    table.add_row(vec![
        Cell::new("questions per objective"),
        Cell::new(config.question_count()),
    ]);
    table.add_row(vec![
        Cell::new("module token limit"),
        Cell::new(config.module_token_limit),
    ]);
    println!("{table}");
}

pub fn print_inclusion(options: &InclusionOptions) {
    let sections = [
        ("Learning objectives", options.objectives),
        ("Bloom level", options.bloom_level),
        ("Answer", options.answer),
        ("Feedback", options.feedback),
        ("Content reference", options.content_reference),
        ("Rationale for Bloom level", options.cognitive_rationale),
    ];
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Included")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (label, included) in sections {
        let cell = if included {
            Cell::new("yes").fg(Color::Green)
        } else {
            dim_cell("no")
        };
        table.add_row(vec![Cell::new(label), cell]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(38)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: ObjectiveStatus) -> Cell {
    match status {
        ObjectiveStatus::Draft => Cell::new(status).fg(Color::DarkGrey),
        ObjectiveStatus::Aligned => Cell::new(status).fg(Color::Blue),
        ObjectiveStatus::Finalized => Cell::new(status).fg(Color::Cyan),
        ObjectiveStatus::QuestionsGenerated => Cell::new(status)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    }
}

fn label_cell(label: AlignmentLabel) -> Cell {
    match label {
        AlignmentLabel::Consistent => Cell::new(label).fg(Color::Green),
        AlignmentLabel::Ambiguous => Cell::new(label).fg(Color::Yellow),
        AlignmentLabel::Inconsistent => Cell::new(label).fg(Color::Red),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn short_signature(signature: &str) -> &str {
    signature.get(..12).unwrap_or(signature)
}
