//! Screenshot capture using headless Chrome

use crate::server::start_disposable_server;
use crate::types::CaptureOptions;
use crate::{Result, VisionError};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use image::RgbImage;
use quizsheet_compiler_html::PreviewDocument;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Rasterizes the preview element of a rendered preview document
///
/// `Ok(None)` means the page loaded but had no preview element; callers
/// treat that like an absent preview.
pub trait PageCapture {
    fn capture(
        &self,
        preview: &PreviewDocument,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<Option<RgbImage>>> + Send;
}

/// Element rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ElementBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Captures through a throwaway headless Chrome instance
///
/// Every capture launches its own browser and disposable server; nothing
/// outlives the call.
#[derive(Debug, Clone, Default)]
pub struct ChromeCapture {
    /// Chrome binary to use instead of the auto-detected one
    pub chrome_path: Option<std::path::PathBuf>,
}

impl ChromeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn launch(&self, options: &CaptureOptions) -> Result<Browser> {
        Browser::new(LaunchOptions {
            headless: true,
            window_size: Some((options.viewport_width, options.viewport_height)),
            path: self.chrome_path.clone(),
            idle_browser_timeout: options.timeout,
            ..Default::default()
        })
        .map_err(browser_error)
    }

    /// Open the HTML in a fresh tab served from a disposable server
    pub(crate) fn open(&self, browser: &Browser, html: &str, options: &CaptureOptions) -> Result<Arc<Tab>> {
        let server = start_disposable_server(html.to_string(), options.timeout)?;

        let opened = browser.new_tab().and_then(|tab| {
            tab.set_default_timeout(options.timeout);
            tab.navigate_to(server.url())?;
            tab.wait_until_navigated()?;
            Ok(tab)
        });

        // Joined on every path so a failed navigation can't leave the thread waiting
        server.finish();

        opened.map_err(browser_error)
    }

    fn capture_blocking(&self, html: &str, selector: &str, options: &CaptureOptions) -> Result<Option<RgbImage>> {
        let browser = self.launch(options)?;
        let tab = self.open(&browser, html, options)?;

        let Some(bounds) = element_bounds(&tab, selector)? else {
            debug!(selector, "preview element not found in page");
            return Ok(None);
        };

        // Grow the window so the whole element is inside the viewport
        let needed_height = (bounds.y + bounds.height).ceil() + 1.0;
        tab.set_bounds(headless_chrome::types::Bounds::Normal {
            left: Some(0),
            top: Some(0),
            width: Some(options.viewport_width as f64),
            height: Some(needed_height.max(options.viewport_height as f64)),
        })
        .map_err(browser_error)?;

        let png = tab
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(Page::Viewport {
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: bounds.height,
                    scale: options.scale,
                }),
                true,
            )
            .map_err(|e| VisionError::Capture(e.to_string()))?;

        let _ = tab.close(true);

        let image = image::load_from_memory(&png)?.to_rgb8();
        info!(width = image.width(), height = image.height(), "captured preview");
        Ok(Some(image))
    }
}

impl PageCapture for ChromeCapture {
    async fn capture(&self, preview: &PreviewDocument, options: &CaptureOptions) -> Result<Option<RgbImage>> {
        let this = self.clone();
        let html = preview.html.clone();
        let selector = preview.element_selector();
        let options = options.clone();

        tokio::task::spawn_blocking(move || this.capture_blocking(&html, &selector, &options))
            .await
            .map_err(|e| VisionError::Capture(format!("capture task failed: {}", e)))?
    }
}

/// Get the bounding box of `selector`, or `None` if nothing matches
fn element_bounds(tab: &Tab, selector: &str) -> Result<Option<ElementBounds>> {
    let selector_json = serde_json::to_string(selector).map_err(|e| VisionError::Capture(e.to_string()))?;

    let script = format!(
        r#"(() => {{
            const el = document.querySelector({selector_json});
            if (!el) return null;
            const rect = el.getBoundingClientRect();
            return JSON.stringify({{
                x: rect.x + window.scrollX,
                y: rect.y + window.scrollY,
                width: rect.width,
                height: rect.height
            }});
        }})()"#
    );

    let value = tab
        .evaluate(&script, false)
        .map_err(|e| VisionError::Capture(e.to_string()))?
        .value;

    match value {
        Some(serde_json::Value::String(json)) => parse_bounds(&json).map(Some),
        _ => Ok(None),
    }
}

pub(crate) fn parse_bounds(json: &str) -> Result<ElementBounds> {
    let bounds: serde_json::Value =
        serde_json::from_str(json).map_err(|e| VisionError::Capture(e.to_string()))?;

    let field = |name: &str| {
        bounds[name]
            .as_f64()
            .ok_or_else(|| VisionError::Capture(format!("bounding box missing {}", name)))
    };

    let bounds = ElementBounds {
        x: field("x")?,
        y: field("y")?,
        width: field("width")?,
        height: field("height")?,
    };

    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Err(VisionError::Capture(format!(
            "preview element has an empty box ({}x{})",
            bounds.width, bounds.height
        )));
    }

    Ok(bounds)
}

pub(crate) fn browser_error(e: impl std::fmt::Display) -> VisionError {
    VisionError::Browser(e.to_string())
}
