//! Export and print pipeline tests with stand-in capture backends

use image::{Rgb, RgbImage};
use quizsheet_compiler_html::{CompileOptions, PreviewDocument};
use quizsheet_editor::{EditSession, Mutation, TextField};
use quizsheet_vision::{
    CaptureOptions, ExportOptions, ExportOutcome, Exporter, PageCapture, PrintLayout, PrintOutcome,
    PrintSpooler, Printer, Result, VisionError, EXPORT_FAILED_NOTICE, PRINT_FAILED_NOTICE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

/// Returns a fixed image and counts how often it was asked
#[derive(Clone)]
struct FixedCapture {
    image: Option<RgbImage>,
    calls: Arc<AtomicUsize>,
}

impl FixedCapture {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: Some(RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn element_missing() -> Self {
        Self {
            image: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PageCapture for FixedCapture {
    async fn capture(&self, _preview: &PreviewDocument, _options: &CaptureOptions) -> Result<Option<RgbImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.image.clone())
    }
}

struct FailingCapture;

impl PageCapture for FailingCapture {
    async fn capture(&self, _preview: &PreviewDocument, _options: &CaptureOptions) -> Result<Option<RgbImage>> {
        Err(VisionError::Browser("chrome crashed".to_string()))
    }
}

struct SlowCapture;

impl PageCapture for SlowCapture {
    async fn capture(&self, _preview: &PreviewDocument, _options: &CaptureOptions) -> Result<Option<RgbImage>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Some(RgbImage::new(10, 10)))
    }
}

fn exportable_preview() -> PreviewDocument {
    let mut session = EditSession::start();
    session
        .replay(vec![
            Mutation::EditField {
                field: TextField::Question,
                value: "I ___ to school.".to_string(),
            },
            Mutation::EditOption { index: 0, value: "go".to_string() },
            Mutation::EditOption { index: 1, value: "goes".to_string() },
            Mutation::EditOption { index: 2, value: "going".to_string() },
            Mutation::EditOption { index: 3, value: "went".to_string() },
            Mutation::SetPreviewVisible { visible: true },
        ])
        .unwrap();

    PreviewDocument::from_collection(session.collection(), CompileOptions::default())
        .unwrap()
        .expect("preview visible")
}

fn options_in(dir: &std::path::Path) -> ExportOptions {
    ExportOptions {
        output_path: dir.join("english-quiz.pdf"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_export_without_preview_is_silent_noop() {
    let dir = tempdir().unwrap();
    let capture = FixedCapture::new(100, 100);
    let calls = Arc::clone(&capture.calls);
    let exporter = Exporter::new(capture, options_in(dir.path()));

    // Preview hidden → no handle
    let session = EditSession::start();
    let preview = PreviewDocument::from_collection(session.collection(), CompileOptions::default()).unwrap();
    assert!(preview.is_none());

    let outcome = exporter.export_pdf(preview.as_ref(), &CancellationToken::new()).await;

    assert_eq!(outcome, ExportOutcome::Skipped);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!dir.path().join("english-quiz.pdf").exists());
}

#[tokio::test]
async fn test_export_writes_paginated_pdf() {
    let dir = tempdir().unwrap();
    // 1050px wide → 5px/mm → 1475px per page band; 3000px → 3 pages
    let exporter = Exporter::new(FixedCapture::new(1050, 3000), options_in(dir.path()));
    let preview = exportable_preview();

    let outcome = exporter.export_pdf(Some(&preview), &CancellationToken::new()).await;

    let ExportOutcome::Saved(report) = outcome else {
        panic!("expected saved export, got {:?}", outcome);
    };
    assert_eq!(report.pages, 3);
    assert_eq!(report.image_width, 1050);
    assert_eq!(report.image_height, 3000);

    let bytes = std::fs::read(&report.path).unwrap();
    assert_eq!(bytes.len(), report.bytes);
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[tokio::test]
async fn test_capture_failure_reports_generic_notice() {
    let dir = tempdir().unwrap();
    let exporter = Exporter::new(FailingCapture, options_in(dir.path()));
    let preview = exportable_preview();

    let outcome = exporter.export_pdf(Some(&preview), &CancellationToken::new()).await;

    assert_eq!(
        outcome,
        ExportOutcome::Failed {
            notice: EXPORT_FAILED_NOTICE.to_string()
        }
    );
    assert!(!dir.path().join("english-quiz.pdf").exists());
}

#[tokio::test]
async fn test_write_failure_leaves_no_file() {
    let dir = tempdir().unwrap();
    let options = ExportOptions {
        output_path: dir.path().join("missing-dir").join("english-quiz.pdf"),
        ..Default::default()
    };
    let exporter = Exporter::new(FixedCapture::new(200, 200), options);

    let outcome = exporter.export_pdf(Some(&exportable_preview()), &CancellationToken::new()).await;

    assert!(matches!(outcome, ExportOutcome::Failed { .. }));
    assert!(!dir.path().join("missing-dir").exists());
}

#[tokio::test]
async fn test_failed_export_keeps_previous_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("english-quiz.pdf");
    std::fs::write(&path, b"%PDF-1.5 previous export").unwrap();

    let exporter = Exporter::new(FailingCapture, options_in(dir.path()));
    let outcome = exporter.export_pdf(Some(&exportable_preview()), &CancellationToken::new()).await;

    assert!(matches!(outcome, ExportOutcome::Failed { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5 previous export");
}

#[tokio::test]
async fn test_unreplaceable_target_leaves_no_stray_files() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("english-quiz.pdf");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep.txt"), b"keep").unwrap();

    let exporter = Exporter::new(FixedCapture::new(200, 200), options_in(dir.path()));
    let outcome = exporter.export_pdf(Some(&exportable_preview()), &CancellationToken::new()).await;

    assert_eq!(
        outcome,
        ExportOutcome::Failed {
            notice: EXPORT_FAILED_NOTICE.to_string()
        }
    );
    assert_eq!(std::fs::read(target.join("keep.txt")).unwrap(), b"keep");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_export_overwrites_previous_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("english-quiz.pdf");
    std::fs::write(&path, b"stale").unwrap();

    let exporter = Exporter::new(FixedCapture::new(210, 100), options_in(dir.path()));
    let outcome = exporter.export_pdf(Some(&exportable_preview()), &CancellationToken::new()).await;

    assert!(matches!(outcome, ExportOutcome::Saved(_)));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_missing_element_is_skipped() {
    let dir = tempdir().unwrap();
    let exporter = Exporter::new(FixedCapture::element_missing(), options_in(dir.path()));

    let outcome = exporter.export_pdf(Some(&exportable_preview()), &CancellationToken::new()).await;

    assert_eq!(outcome, ExportOutcome::Skipped);
    assert!(!dir.path().join("english-quiz.pdf").exists());
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let dir = tempdir().unwrap();
    let capture = FixedCapture::new(100, 100);
    let calls = Arc::clone(&capture.calls);
    let exporter = Exporter::new(capture, options_in(dir.path()));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = exporter.export_pdf(Some(&exportable_preview()), &cancel).await;

    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cancelled_during_capture() {
    let dir = tempdir().unwrap();
    let exporter = Exporter::new(SlowCapture, options_in(dir.path()));
    let preview = exportable_preview();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let outcome = exporter.export_pdf(Some(&preview), &cancel).await;

    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert!(!dir.path().join("english-quiz.pdf").exists());
}

struct FakeLayout;

impl PrintLayout for FakeLayout {
    async fn layout(&self, preview: &PreviewDocument, _options: &CaptureOptions) -> Result<Vec<u8>> {
        Ok(preview.html.as_bytes().to_vec())
    }
}

#[derive(Clone, Default)]
struct RecordingSpooler {
    jobs: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl PrintSpooler for RecordingSpooler {
    fn submit(&self, document: &[u8]) -> Result<()> {
        self.jobs.lock().unwrap().push(document.to_vec());
        Ok(())
    }
}

#[tokio::test]
async fn test_print_submits_layout_to_spooler() {
    let spooler = RecordingSpooler::default();
    let printer = Printer::new(FakeLayout, spooler.clone(), CaptureOptions::default());
    let preview = exportable_preview();

    let outcome = printer.print(Some(&preview)).await;

    assert_eq!(outcome, PrintOutcome::Submitted { bytes: preview.html.len() });
    let jobs = spooler.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert!(String::from_utf8_lossy(&jobs[0]).contains("I ___ to school."));
}

#[tokio::test]
async fn test_print_without_preview_is_noop() {
    let spooler = RecordingSpooler::default();
    let printer = Printer::new(FakeLayout, spooler.clone(), CaptureOptions::default());

    assert_eq!(printer.print(None).await, PrintOutcome::Skipped);
    assert!(spooler.jobs.lock().unwrap().is_empty());
}

struct BrokenSpooler;

impl PrintSpooler for BrokenSpooler {
    fn submit(&self, _document: &[u8]) -> Result<()> {
        Err(VisionError::Print(
            "lp exited with exit status: 1 (/dev/lp0 not ready)".to_string(),
        ))
    }
}

#[tokio::test]
async fn test_spooler_failure_reports_generic_notice() {
    let printer = Printer::new(FakeLayout, BrokenSpooler, CaptureOptions::default());

    let outcome = printer.print(Some(&exportable_preview())).await;

    assert_eq!(
        outcome,
        PrintOutcome::Failed {
            notice: PRINT_FAILED_NOTICE.to_string()
        }
    );
    let PrintOutcome::Failed { notice } = outcome else {
        unreachable!()
    };
    assert!(!notice.contains("/dev/lp0"));
}

#[cfg(unix)]
#[test]
fn test_command_spooler_pipes_document() {
    use quizsheet_vision::CommandSpooler;

    let dir = tempdir().unwrap();
    let target = dir.path().join("job.pdf");
    let spooler = CommandSpooler::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("cat > '{}'", target.display()),
    ]);

    spooler.submit(b"%PDF-1.5 test").unwrap();
    assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.5 test");

    let failing = CommandSpooler::new(vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()]);
    assert!(failing.submit(b"x").is_err());

    assert!(CommandSpooler::new(vec![]).submit(b"x").is_err());
}
