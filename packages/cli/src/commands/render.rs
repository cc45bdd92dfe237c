use super::{incomplete_records, replay_script};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use quizsheet_compiler_html::{compile_to_html, CompileOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON array of mutations to replay
    pub script: PathBuf,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact HTML
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let session = replay_script(&args.script)?;

    let incomplete = incomplete_records(session.collection());
    if !incomplete.is_empty() {
        eprintln!(
            "{} {} incomplete question(s) rendered as-is",
            "⚠️".yellow(),
            incomplete.len()
        );
    }

    let html = compile_to_html(
        session.collection(),
        CompileOptions {
            pretty: !args.compact,
            ..Default::default()
        },
    )?;

    match args.output {
        Some(output) => {
            let path = cwd.join(output);
            fs::write(&path, html)?;
            eprintln!("{} {}", "✓".green(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
