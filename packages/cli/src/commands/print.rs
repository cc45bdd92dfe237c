use super::{describe_print, ensure_complete, replay_script};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use quizsheet_compiler_html::{CompileOptions, PreviewDocument};
use quizsheet_vision::{ChromeCapture, PrintOutcome, Printer};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// JSON array of mutations to replay
    pub script: PathBuf,
}

pub async fn print(args: PrintArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = replay_script(&args.script)?;
    ensure_complete(session.collection())?;

    println!("{}", "🖨️  Sending quiz to the printer...".bright_blue().bold());

    let preview = PreviewDocument::from_collection(session.collection(), CompileOptions::default())?;
    let printer = Printer::new(ChromeCapture::new(), config.spooler(), config.capture_options());
    let outcome = printer.print(preview.as_ref()).await;
    println!("{}", describe_print(&outcome));

    match outcome {
        PrintOutcome::Failed { notice } => Err(anyhow!(notice)),
        _ => Ok(()),
    }
}
