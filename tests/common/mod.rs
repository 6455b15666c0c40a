#![allow(dead_code)]

//! Shared fixtures for integration tests.

use image::RgbaImage;
use ogpgen::{write_image, TextMeasurer};
use std::path::{Path, PathBuf};

/// Width budget equivalent to five full-width characters.
pub const BUDGET: u32 = 50;

/// Deterministic stand-in for a proportional Japanese font at a tiny size:
/// full-width characters are 10 units, Latin text roughly half that.
pub struct FixtureMeasurer;

pub fn advance(ch: char) -> u32 {
    match ch {
        '0'..='9' => 6,
        '“' | '«' => 5,
        c if c.is_ascii() => 5,
        _ => 10,
    }
}

impl TextMeasurer for FixtureMeasurer {
    fn measure(&self, text: &str) -> u32 {
        text.chars().map(advance).sum()
    }
}

/// DejaVu Sans, bundled under `tests/fixtures` with its license.
pub fn fixture_font() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
}

/// Write a plain white PNG into `dir` and return its path.
pub fn white_background(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("background.png");
    let image = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    write_image(&image, &path).unwrap();
    path
}
