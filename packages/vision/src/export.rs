//! PDF export orchestration
//!
//! One suspend point (the capture) followed by synchronous slicing and
//! assembly. All failures stop here: they are logged and turned into a
//! generic notice for the user.

use crate::capture::PageCapture;
use crate::paginate::paginate;
use crate::pdf::assemble_pdf;
use crate::types::ExportOptions;
use crate::{Result, VisionError};
use image::RgbImage;
use quizsheet_compiler_html::PreviewDocument;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

/// What the user is shown when export fails, whatever the cause
pub const EXPORT_FAILED_NOTICE: &str = "An error occurred while generating the PDF.";

/// Outcome of one export attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Document written
    Saved(ExportReport),

    /// No preview to export; nothing happened
    Skipped,

    /// Cancellation was requested before the document was written
    Cancelled,

    /// The pipeline failed; nothing was written
    Failed { notice: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub pages: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub bytes: usize,
}

/// Runs the capture → paginate → assemble pipeline
pub struct Exporter<C> {
    capture: C,
    options: ExportOptions,
}

impl<C: PageCapture> Exporter<C> {
    pub fn new(capture: C, options: ExportOptions) -> Self {
        Self { capture, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the preview to the configured file.
    ///
    /// Never returns an error: failures come back as `ExportOutcome::Failed`
    /// after being logged.
    #[instrument(skip_all, fields(path = %self.options.output_path.display()))]
    pub async fn export_pdf(&self, preview: Option<&PreviewDocument>, cancel: &CancellationToken) -> ExportOutcome {
        let Some(preview) = preview else {
            debug!("no preview rendered; export skipped");
            return ExportOutcome::Skipped;
        };

        match self.run(preview, cancel).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "PDF export failed");
                ExportOutcome::Failed {
                    notice: EXPORT_FAILED_NOTICE.to_string(),
                }
            }
        }
    }

    async fn run(&self, preview: &PreviewDocument, cancel: &CancellationToken) -> Result<ExportOutcome> {
        if cancel.is_cancelled() {
            return Ok(ExportOutcome::Cancelled);
        }

        let captured = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(ExportOutcome::Cancelled),
            captured = self.capture.capture(preview, &self.options.capture) => captured?,
        };

        let Some(image) = captured else {
            debug!("preview element missing from page; export skipped");
            return Ok(ExportOutcome::Skipped);
        };

        let (bytes, pages) = self.render_pages(&image)?;

        if cancel.is_cancelled() {
            return Ok(ExportOutcome::Cancelled);
        }

        let size = bytes.len();
        let path = self.options.output_path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| VisionError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))??;
        info!(pages, bytes = size, records = preview.record_count, "PDF saved");

        Ok(ExportOutcome::Saved(ExportReport {
            path: self.options.output_path.clone(),
            pages,
            image_width: image.width(),
            image_height: image.height(),
            bytes: size,
        }))
    }

    /// Slice and assemble without touching the filesystem
    pub fn render_pages(&self, image: &RgbImage) -> Result<(Vec<u8>, usize)> {
        let bands = paginate(image.width(), image.height(), &self.options.layout)?;
        let bytes = assemble_pdf(image, &bands, &self.options.layout, self.options.jpeg_quality)?;
        Ok((bytes, bands.len()))
    }
}

/// Replace `path` with `bytes` in one step.
///
/// The document goes to a temporary file next to `path` and is renamed over
/// it only once fully written, so `path` either keeps its old contents or
/// holds the complete new document.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| VisionError::Io(e.error))?;
    Ok(())
}
