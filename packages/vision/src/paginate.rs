//! Page slicing for captured previews
//!
//! The captured image is scaled to the page width, then cut into bands of
//! `band_height_mm`. Each band fills one page, starting at the top.
//!
//! An image whose height is an exact multiple of the band height produces
//! exactly that many pages, never a trailing blank page.

use crate::types::PageLayout;
use crate::{Result, VisionError};

/// Horizontal slice of the captured image placed on one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBand {
    /// Zero-based page number
    pub page: usize,

    /// First image row of the band
    pub y_px: u32,

    /// Rows in the band
    pub height_px: u32,

    /// Drawn height on the page
    pub height_mm: f32,
}

/// Cut an image of `width_px` by `height_px` into page bands
pub fn paginate(width_px: u32, height_px: u32, layout: &PageLayout) -> Result<Vec<PageBand>> {
    if width_px == 0 || height_px == 0 {
        return Err(VisionError::Layout(format!(
            "cannot paginate an empty image ({}x{})",
            width_px, height_px
        )));
    }
    if layout.page_width_mm <= 0.0 || layout.band_height_mm <= 0.0 {
        return Err(VisionError::Layout("page dimensions must be positive".to_string()));
    }

    let px_per_mm = width_px as f64 / layout.page_width_mm as f64;
    let band_px = ((layout.band_height_mm as f64 * px_per_mm).round() as u32).max(1);
    let pages = height_px.div_ceil(band_px);

    let bands = (0..pages)
        .map(|page| {
            let y_px = page * band_px;
            let height_px = band_px.min(height_px - y_px);
            PageBand {
                page: page as usize,
                y_px,
                height_px,
                height_mm: (height_px as f64 / px_per_mm) as f32,
            }
        })
        .collect();

    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2100px wide → 10px per mm → 2950px per band
    const WIDTH: u32 = 2100;

    #[test]
    fn test_short_image_fits_one_page() {
        let bands = paginate(WIDTH, 1000, &PageLayout::A4).unwrap();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].y_px, 0);
        assert_eq!(bands[0].height_px, 1000);
        assert!((bands[0].height_mm - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_exact_multiple_has_no_blank_page() {
        let bands = paginate(WIDTH, 2950 * 2, &PageLayout::A4).unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].y_px, 2950);
        assert_eq!(bands[1].height_px, 2950);
    }

    #[test]
    fn test_one_row_over_starts_new_page() {
        let bands = paginate(WIDTH, 2950 * 2 + 1, &PageLayout::A4).unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[2].y_px, 5900);
        assert_eq!(bands[2].height_px, 1);
    }

    #[test]
    fn test_bands_cover_image_exactly() {
        for height in [1, 999, 2950, 2951, 8000, 12345] {
            let bands = paginate(WIDTH, height, &PageLayout::A4).unwrap();
            let total: u32 = bands.iter().map(|b| b.height_px).sum();
            assert_eq!(total, height);

            for pair in bands.windows(2) {
                assert_eq!(pair[0].y_px + pair[0].height_px, pair[1].y_px);
            }
            for band in &bands {
                assert!(band.height_mm <= PageLayout::A4.band_height_mm + 1e-3);
            }
        }
    }

    #[test]
    fn test_empty_image_is_an_error() {
        assert!(paginate(0, 100, &PageLayout::A4).is_err());
        assert!(paginate(100, 0, &PageLayout::A4).is_err());
    }
}
