// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod project;
pub mod report;
pub mod types;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_and_validate;
use crate::config::model::ProjectFile;
use crate::dag::{compute_layout, compute_summary, compute_views};
use crate::engine::{EditOutcome, ProjectEdit, Session};
use crate::report::{ActivityTable, Impact, RemovalPreview, render};

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the project file, runs the requested command against
/// it and prints the report on stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let project = load_and_validate(&args.project)?;
    let policy = args
        .cycle_policy
        .unwrap_or(project.analysis.cycle_policy);
    info!(
        project = %args.project.display(),
        activities = project.repository.len(),
        ?policy,
        "project loaded"
    );

    let activities = project.repository.activities();

    let output = match args.command {
        Command::Check => check_report(&project),
        Command::Summary => render(&compute_summary(activities, policy)?, args.format)?,
        Command::Layout => render(
            &compute_layout(activities, &project.layout, policy)?,
            args.format,
        )?,
        Command::Table => {
            let views = compute_views(activities, &project.layout, policy)?;
            render(&ActivityTable::new(activities, &views.metrics), args.format)?
        }
        Command::Impact { code } => {
            if !project.repository.contains(&code) {
                bail!("no activity with code '{code}'");
            }
            let dependents = project.repository.dependents_of(&code);
            render(&Impact { code, dependents }, args.format)?
        }
        Command::Remove { code, confirm } => {
            let preview = preview_removal(project, &code, confirm, policy)?;
            render(&preview, args.format)?
        }
    };

    println!("{output}");
    Ok(())
}

fn check_report(project: &ProjectFile) -> String {
    format!(
        "ok: {} activities (cycle_policy = {:?})",
        project.repository.len(),
        project.analysis.cycle_policy
    )
}

/// Delete `code` in an in-memory session and summarise what remains.
fn preview_removal(
    project: ProjectFile,
    code: &str,
    confirm: bool,
    policy: crate::types::CyclePolicy,
) -> Result<RemovalPreview> {
    let mut session = Session::new(project.repository, project.layout, policy);

    let mut step = session.step(ProjectEdit::Delete(code.to_string()));
    if let EditOutcome::NeedsConfirmation { dependents, .. } = &step.outcome {
        if !confirm {
            bail!(
                "'{code}' is required by {}; pass --confirm to delete it and drop those requirements",
                dependents.join(", ")
            );
        }
        debug!(code = %code, "confirmation given; cascading delete");
        step = session.step(ProjectEdit::ConfirmDelete(code.to_string()));
    }

    match step.outcome {
        EditOutcome::Removed { activity, cascaded } => {
            let summary = match step.views {
                Some(views) => views.summary,
                None => session.views()?.summary,
            };
            Ok(RemovalPreview {
                removed: activity.code,
                cascaded,
                summary,
            })
        }
        EditOutcome::Rejected(err) => Err(err.into()),
        other => bail!("unexpected delete outcome: {other:?}"),
    }
}
