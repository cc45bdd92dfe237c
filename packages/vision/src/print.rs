//! Printing
//!
//! The preview goes through the browser's print layout, and the resulting
//! document is handed to the system print spooler.

use crate::capture::{browser_error, ChromeCapture};
use crate::types::CaptureOptions;
use crate::{Result, VisionError};
use quizsheet_compiler_html::PreviewDocument;
use std::future::Future;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, error, info};

/// What the user is shown when printing fails, whatever the cause
pub const PRINT_FAILED_NOTICE: &str = "An error occurred while printing.";

/// Produces a printable document from a preview
pub trait PrintLayout {
    fn layout(
        &self,
        preview: &PreviewDocument,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Accepts a printable document for printing
pub trait PrintSpooler {
    fn submit(&self, document: &[u8]) -> Result<()>;
}

impl PrintLayout for ChromeCapture {
    async fn layout(&self, preview: &PreviewDocument, options: &CaptureOptions) -> Result<Vec<u8>> {
        let this = self.clone();
        let html = preview.html.clone();
        let options = options.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let browser = this.launch(&options)?;
            let tab = this.open(&browser, &html, &options)?;
            let document = tab.print_to_pdf(None).map_err(browser_error)?;
            let _ = tab.close(true);
            Ok(document)
        })
        .await
        .map_err(|e| VisionError::Print(format!("print task failed: {}", e)))?
    }
}

/// Pipes the document into an external command (`lp` by default)
#[derive(Debug, Clone)]
pub struct CommandSpooler {
    command: Vec<String>,
}

impl CommandSpooler {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Default for CommandSpooler {
    fn default() -> Self {
        Self::new(vec!["lp".to_string()])
    }
}

impl PrintSpooler for CommandSpooler {
    fn submit(&self, document: &[u8]) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| VisionError::Print("print command is empty".to_string()))?;

        debug!(program, ?args, "spooling print job");
        let mut child = Command::new(program).args(args).stdin(Stdio::piped()).spawn()?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| VisionError::Print("spooler stdin unavailable".to_string()))?;
            stdin.write_all(document)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(VisionError::Print(format!("{} exited with {}", program, status)));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// No preview to print; nothing happened
    Skipped,

    /// Document handed to the spooler
    Submitted { bytes: usize },

    /// Layout or spooling failed
    Failed { notice: String },
}

/// Print flow: layout the preview, then spool it
pub struct Printer<L, S> {
    layout: L,
    spooler: S,
    options: CaptureOptions,
}

impl<L: PrintLayout, S: PrintSpooler> Printer<L, S> {
    pub fn new(layout: L, spooler: S, options: CaptureOptions) -> Self {
        Self {
            layout,
            spooler,
            options,
        }
    }

    /// Print the preview.
    ///
    /// Like export, failures are logged here and come back as
    /// `PrintOutcome::Failed` carrying only the generic notice.
    pub async fn print(&self, preview: Option<&PreviewDocument>) -> PrintOutcome {
        let Some(preview) = preview else {
            debug!("no preview rendered; print skipped");
            return PrintOutcome::Skipped;
        };

        match self.run(preview).await {
            Ok(bytes) => {
                info!(bytes, records = preview.record_count, "print job submitted");
                PrintOutcome::Submitted { bytes }
            }
            Err(e) => {
                error!(error = %e, "printing failed");
                PrintOutcome::Failed {
                    notice: PRINT_FAILED_NOTICE.to_string(),
                }
            }
        }
    }

    async fn run(&self, preview: &PreviewDocument) -> Result<usize> {
        let document = self.layout.layout(preview, &self.options).await?;
        self.spooler.submit(&document)?;
        Ok(document.len())
    }
}
