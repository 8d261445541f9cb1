/*!
 * Tests for promo icon composition
 */

use image::{Rgba, RgbaImage};
use podpost::compose::{CropRect, PromoComposer};

use crate::common;

fn write_png(dir: &std::path::Path, name: &str, width: u32, height: u32, color: [u8; 4]) {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    img.save(dir.join(name)).unwrap();
}

/// Test the centered default crop
#[test]
fn test_crop_rect_centered_shouldUseShortestSide() {
    let crop = CropRect::centered(1920, 1080);
    assert_eq!(crop.size, 1080);
    assert_eq!(crop.x, 420);
    assert_eq!(crop.y, 0);

    let portrait = CropRect::centered(600, 800);
    assert_eq!(portrait.size, 600);
    assert_eq!(portrait.x, 0);
    assert_eq!(portrait.y, 100);
}

/// Test the host icon name picks a numbered variant
#[test]
fn test_icon_name_for_withHost_shouldPickVariant() {
    let composer = PromoComposer::new("Gota");
    let name = composer.icon_name_for("Gota");
    assert!(name == "Gota-1" || name == "Gota-2", "got {}", name);
    assert_eq!(composer.icon_name_for("Ken"), "Ken");
}

/// Test composing a promo icon end to end with generated photos
#[test]
fn test_compose_withGeneratedPhotos_shouldWriteSquareJpeg() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    write_png(dir, "eyecatch.png", 640, 480, [40, 80, 120, 255]);
    write_png(dir, "show.png", 200, 200, [200, 30, 30, 255]);
    write_png(dir, "ken.png", 180, 180, [30, 200, 30, 255]);

    let output = dir.join("out").join("icon-15.jpg");
    let composer = PromoComposer::new("Gota");
    composer
        .compose(
            &dir.join("eyecatch.png"),
            &dir.join("show.png"),
            &[dir.join("ken.png")],
            None,
            &output,
        )
        .unwrap();

    let composed = image::open(&output).unwrap().to_rgb8();
    // Centered default crop of a 640x480 photo is a 480px square
    assert_eq!(composed.width(), 480);
    assert_eq!(composed.height(), 480);
}

/// Test an explicit crop rect is honored and clipped to the photo
#[test]
fn test_compose_withExplicitCrop_shouldClipToPhoto() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    write_png(dir, "eyecatch.png", 400, 300, [10, 10, 10, 255]);
    write_png(dir, "show.png", 64, 64, [255, 255, 255, 255]);

    let output = dir.join("icon.jpg");
    let composer = PromoComposer::new("Gota");
    composer
        .compose(
            &dir.join("eyecatch.png"),
            &dir.join("show.png"),
            &[],
            Some(CropRect {
                x: 350,
                y: 0,
                size: 300,
            }),
            &output,
        )
        .unwrap();

    // Only 50px remain right of x=350, so the square clips to 50
    let composed = image::open(&output).unwrap().to_rgb8();
    assert_eq!(composed.width(), 50);
}

/// Test a crop origin outside the photo is rejected
#[test]
fn test_compose_withCropOutsidePhoto_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path();

    write_png(dir, "eyecatch.png", 100, 100, [0, 0, 0, 255]);
    write_png(dir, "show.png", 32, 32, [0, 0, 0, 255]);

    let composer = PromoComposer::new("Gota");
    let result = composer.compose(
        &dir.join("eyecatch.png"),
        &dir.join("show.png"),
        &[],
        Some(CropRect {
            x: 500,
            y: 0,
            size: 100,
        }),
        &temp_dir.path().join("icon.jpg"),
    );
    assert!(result.is_err());
}
