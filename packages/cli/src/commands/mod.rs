pub mod edit;
pub mod export;
pub mod print;
pub mod render;

pub use edit::{edit, EditArgs};
pub use export::{export, ExportArgs};
pub use print::{print, PrintArgs};
pub use render::{render, RenderArgs};

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use quizsheet_editor::{parse_script, EditSession, Mutation, QuizCollection};
use quizsheet_vision::{ExportOutcome, PrintOutcome};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Replay a JSON mutation script on a fresh session and show the preview
pub(crate) fn replay_script(path: &Path) -> Result<EditSession> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Cannot read script {}", path.display()))?;
    let mutations = parse_script(&json)?;

    let mut session = EditSession::start();
    session.replay(mutations)?;
    session.apply(Mutation::SetPreviewVisible { visible: true })?;
    Ok(session)
}

/// 1-based numbers of records that still block export
pub(crate) fn incomplete_records(collection: &QuizCollection) -> Vec<usize> {
    collection
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.is_complete())
        .map(|(index, _)| index + 1)
        .collect()
}

pub(crate) fn ensure_complete(collection: &QuizCollection) -> Result<()> {
    let incomplete = incomplete_records(collection);
    if incomplete.is_empty() {
        return Ok(());
    }

    let numbers: Vec<String> = incomplete.iter().map(|n| n.to_string()).collect();
    Err(anyhow!(
        "Incomplete questions: {}. Every question needs a question text and four options.",
        numbers.join(", ")
    ))
}

/// Cancelled when the process receives Ctrl-C
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    token
}

/// One line describing an export outcome
pub(crate) fn describe_export(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Saved(report) => format!(
            "{} Saved {} ({} page{})",
            "✓".green(),
            report.path.display(),
            report.pages,
            if report.pages == 1 { "" } else { "s" }
        ),
        ExportOutcome::Skipped => format!("{}", "Nothing to export: the preview is not shown.".yellow()),
        ExportOutcome::Cancelled => format!("{}", "Export cancelled.".yellow()),
        ExportOutcome::Failed { notice } => format!("{} {}", "✗".red(), notice),
    }
}

pub(crate) fn describe_print(outcome: &PrintOutcome) -> String {
    match outcome {
        PrintOutcome::Submitted { bytes } => format!("{} Print job submitted ({} bytes)", "✓".green(), bytes),
        PrintOutcome::Skipped => format!("{}", "Nothing to print: the preview is not shown.".yellow()),
        PrintOutcome::Failed { notice } => format!("{} {}", "✗".red(), notice),
    }
}
