//! Core types for Quizsheet Vision

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Physical page geometry, in millimetres
///
/// The captured image is drawn full page width. Page bands are cut at
/// `band_height_mm`, which is a little shorter than the A4 sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub band_height_mm: f32,
}

impl PageLayout {
    pub const A4: PageLayout = PageLayout {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        band_height_mm: 295.0,
    };

    pub fn page_width_pt(&self) -> f32 {
        mm_to_pt(self.page_width_mm)
    }

    pub fn page_height_pt(&self) -> f32 {
        mm_to_pt(self.page_height_mm)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout::A4
    }
}

pub(crate) fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Options for screenshot capture
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Device pixel ratio of the capture (2.0 = retina)
    pub scale: f64,

    /// Browser window width in CSS pixels
    pub viewport_width: u32,

    /// Initial browser window height; grown to fit the preview
    pub viewport_height: u32,

    /// Upper bound for page load and element lookup
    pub timeout: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            viewport_width: 900,
            viewport_height: 1080,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Options for the whole export pipeline
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Where the PDF is written
    pub output_path: PathBuf,

    pub capture: CaptureOptions,

    pub layout: PageLayout,

    /// JPEG quality for page bands (1-100)
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("english-quiz.pdf"),
            capture: CaptureOptions::default(),
            layout: PageLayout::A4,
            jpeg_quality: 92,
        }
    }
}
