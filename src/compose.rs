use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use log::info;
use rand::Rng;

// @module: Promo icon composition

/// Icons are scaled to roughly this pixel area before overlay.
const ICON_AREA: f64 = 128.0 * 128.0;

/// Highlight strength blended over the cropped square.
const HIGHLIGHT_ALPHA: f64 = 0.3;

// Starr icon layout, measured from the bottom-right corner
const STARR_START_X: i64 = 40;
const STARR_START_Y: i64 = 20;
const STARR_STEP: i64 = 168;

// Show icon offsets from the bottom-left corner
const SHOW_ICON_X: i64 = 30;
const SHOW_ICON_Y: i64 = 20;

/// Square crop region within the eyecatch photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Side length
    pub size: u32,
}

impl CropRect {
    /// Largest centered square within an image of the given dimensions.
    pub fn centered(width: u32, height: u32) -> Self {
        let size = width.min(height);
        CropRect {
            x: (width - size) / 2,
            y: (height - size) / 2,
            size,
        }
    }

    /// Clip the rect so it stays inside an image of the given dimensions.
    fn clipped(self, width: u32, height: u32) -> Result<Self> {
        if self.x >= width || self.y >= height {
            return Err(anyhow!(
                "Crop origin ({}, {}) is outside the {}x{} image",
                self.x,
                self.y,
                width,
                height
            ));
        }
        let size = self.size.min(width - self.x).min(height - self.y);
        Ok(CropRect { size, ..self })
    }
}

/// Compose the promo icon for an episode.
///
/// The eyecatch photo is square-cropped with a translucent highlight, the
/// show icon lands bottom-left, and the cast icons are circle-cropped and
/// laid out right-to-left along the bottom edge. The host's icon picks one
/// of the numbered variant photos.
pub struct PromoComposer {
    /// Host name whose icon gets a random variant suffix
    pub host: String,
}

impl PromoComposer {
    pub fn new(host: impl Into<String>) -> Self {
        PromoComposer { host: host.into() }
    }

    /// Compose and save the promo icon.
    ///
    /// `starr_icon_paths` holds the cast icon photos in record order;
    /// `crop` defaults to the largest centered square.
    pub fn compose(
        &self,
        eyecatch_path: &Path,
        show_icon_path: &Path,
        starr_icon_paths: &[std::path::PathBuf],
        crop: Option<CropRect>,
        output: &Path,
    ) -> Result<()> {
        let eyecatch = image::open(eyecatch_path)
            .with_context(|| format!("Failed to open eyecatch: {}", eyecatch_path.display()))?
            .to_rgba8();

        let crop = crop
            .unwrap_or_else(|| CropRect::centered(eyecatch.width(), eyecatch.height()))
            .clipped(eyecatch.width(), eyecatch.height())?;
        let mut canvas = crop_with_highlight(&eyecatch, crop);

        let show_icon = load_icon(show_icon_path)?;
        let show_y = canvas.height() as i64 - SHOW_ICON_Y - show_icon.height() as i64;
        imageops::overlay(&mut canvas, &show_icon, SHOW_ICON_X, show_y);

        for (i, icon_path) in starr_icon_paths.iter().rev().enumerate() {
            let icon = load_icon(icon_path)?;
            let x = canvas.width() as i64
                - (STARR_START_X + STARR_STEP * i as i64 + icon.width() as i64);
            let y = canvas.height() as i64 - STARR_START_Y - icon.height() as i64;
            overlay_circle(&mut canvas, &icon, x, y);
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        // JPEG output drops the alpha channel
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .save(output)
            .with_context(|| format!("Failed to save promo icon: {}", output.display()))?;
        info!("saved {}", output.display());
        Ok(())
    }

    /// Icon file name for a cast member; the host rotates between the
    /// numbered variant photos.
    pub fn icon_name_for(&self, starr: &str) -> String {
        if starr == self.host {
            let variant = rand::rng().random_range(1..=2);
            format!("{}-{}", starr, variant)
        } else {
            starr.to_string()
        }
    }
}

/// Load an icon, square it, and scale it to the standard overlay area.
fn load_icon(path: &Path) -> Result<RgbaImage> {
    let icon = image::open(path)
        .with_context(|| format!("Failed to open icon: {}", path.display()))?
        .to_rgba8();

    // Center-crop to square so the circle mask stays round
    let side = icon.width().min(icon.height());
    let icon = imageops::crop_imm(
        &icon,
        (icon.width() - side) / 2,
        (icon.height() - side) / 2,
        side,
        side,
    )
    .to_image();

    let scale = (ICON_AREA / (f64::from(side) * f64::from(side))).sqrt();
    let target = (f64::from(side) * scale).round().max(1.0) as u32;
    Ok(imageops::resize(&icon, target, target, FilterType::Lanczos3))
}

/// Crop a square out of the photo with a translucent white highlight.
fn crop_with_highlight(photo: &RgbaImage, crop: CropRect) -> RgbaImage {
    let mut square = imageops::crop_imm(photo, crop.x, crop.y, crop.size, crop.size).to_image();
    for pixel in square.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            let blended =
                f64::from(*channel) * (1.0 - HIGHLIGHT_ALPHA) + 255.0 * HIGHLIGHT_ALPHA;
            *channel = blended.round().min(255.0) as u8;
        }
    }
    square
}

/// Paste the pixels of `icon` that fall within its inscribed circle.
fn overlay_circle(canvas: &mut RgbaImage, icon: &RgbaImage, x: i64, y: i64) {
    let radius = f64::from(icon.width()) / 2.0;
    let center = radius - 0.5;
    for (ix, iy, pixel) in icon.enumerate_pixels() {
        let dx = f64::from(ix) - center;
        let dy = f64::from(iy) - center;
        if dx * dx + dy * dy > radius * radius {
            continue;
        }
        let cx = x + i64::from(ix);
        let cy = y + i64::from(iy);
        if cx < 0 || cy < 0 || cx >= i64::from(canvas.width()) || cy >= i64::from(canvas.height())
        {
            continue;
        }
        canvas.put_pixel(cx as u32, cy as u32, *pixel);
    }
}
