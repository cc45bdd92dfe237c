//! # Quizsheet Vision
//!
//! Turns a rendered quiz preview into a PDF or a print job.
//!
//! ## Export Pipeline
//!
//! ```text
//! PreviewDocument (HTML)
//!     ↓  one suspend point
//! [PageCapture]   headless Chrome screenshot of #quiz-print
//!     ↓
//! [paginate]      image height → A4 page bands
//!     ↓
//! [assemble_pdf]  one JPEG band per page
//!     ↓
//! english-quiz.pdf
//! ```
//!
//! A missing preview is not an error: export and print quietly do nothing.
//! Anything that goes wrong after that is logged and reported to the user
//! as one generic notice, and no file is written.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizsheet_vision::{ChromeCapture, ExportOptions, Exporter, ExportOutcome};
//! use tokio_util::sync::CancellationToken;
//! # async fn run(preview: Option<&quizsheet_compiler_html::PreviewDocument>) {
//! let exporter = Exporter::new(ChromeCapture::new(), ExportOptions::default());
//! match exporter.export_pdf(preview, &CancellationToken::new()).await {
//!     ExportOutcome::Saved(report) => println!("{} pages", report.pages),
//!     ExportOutcome::Failed { notice } => eprintln!("{notice}"),
//!     _ => {}
//! }
//! # }
//! ```

mod capture;
mod export;
mod paginate;
mod pdf;
mod print;
mod server;
mod types;

pub use capture::{ChromeCapture, PageCapture};
pub use export::{ExportOutcome, ExportReport, Exporter, EXPORT_FAILED_NOTICE};
pub use paginate::{paginate, PageBand};
pub use pdf::assemble_pdf;
pub use print::{CommandSpooler, PrintLayout, PrintOutcome, PrintSpooler, Printer, PRINT_FAILED_NOTICE};
pub use types::{CaptureOptions, ExportOptions, PageLayout};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Print error: {0}")]
    Print(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser error: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, VisionError>;
