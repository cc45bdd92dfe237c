use super::{cancel_on_ctrl_c, describe_export, ensure_complete, replay_script};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use quizsheet_compiler_html::{CompileOptions, PreviewDocument};
use quizsheet_vision::{ChromeCapture, ExportOutcome, Exporter};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON array of mutations to replay
    pub script: PathBuf,

    /// Output file (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Device pixel ratio of the capture (overrides config)
    #[arg(long)]
    pub scale: Option<f64>,
}

pub async fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = replay_script(&args.script)?;
    ensure_complete(session.collection())?;

    let mut options = config.export_options(cwd);
    if let Some(output) = args.output {
        options.output_path = cwd.join(output);
    }
    if let Some(scale) = args.scale {
        options.capture.scale = scale;
    }

    println!("{}", "📄 Exporting quiz to PDF...".bright_blue().bold());

    let preview = PreviewDocument::from_collection(
        session.collection(),
        CompileOptions {
            require_complete: true,
            ..Default::default()
        },
    )?;

    let exporter = Exporter::new(ChromeCapture::new(), options);
    let outcome = exporter.export_pdf(preview.as_ref(), &cancel_on_ctrl_c()).await;
    println!("{}", describe_export(&outcome));

    match outcome {
        ExportOutcome::Failed { notice } => Err(anyhow!(notice)),
        _ => Ok(()),
    }
}
