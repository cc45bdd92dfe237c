mod commands;
mod config;
mod view;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, export, print, render, EditArgs, ExportArgs, PrintArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Quizsheet CLI - four-option English quizzes, previewed and exported to PDF
#[derive(Parser, Debug)]
#[command(name = "quizsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Edit a quiz interactively
    Edit(EditArgs),

    /// Replay a mutation script and export the preview to PDF
    Export(ExportArgs),

    /// Replay a mutation script and write the preview HTML
    Render(RenderArgs),

    /// Replay a mutation script and print the preview
    Print(PrintArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(cwd) => match cli.command {
            Command::Edit(args) => edit(args, &cwd).await,
            Command::Export(args) => export(args, &cwd).await,
            Command::Render(args) => render(args, &cwd),
            Command::Print(args) => print(args, &cwd).await,
        },
        Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
