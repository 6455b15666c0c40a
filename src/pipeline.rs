//! OGP Image Pipeline - Single Entry Point
//!
//! Loads the font and background once, then draws any number of texts.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageReader, RgbaImage};
use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use ttf_parser::FaceParsingError;

use crate::color::{ColorError, Rgba};
use crate::font::FontFace;
use crate::layout::PlacedLine;
use crate::options::RenderOptions;
use crate::render::{compose, layout_text, Rendered, TextStyle};

pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Error)]
pub enum OgpError {
    #[error("Failed to read font {path}: {source}")]
    FontReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TrueType font: {0}")]
    FontParseFailed(#[from] FaceParsingError),

    #[error("Font size should be a positive number, got {0}")]
    FontSizeNotPositive(f32),

    #[error(transparent)]
    InvalidColorFormat(#[from] ColorError),

    #[error("Failed to read background image {path}: {source}")]
    BackgroundImageReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode background image: {0}")]
    BackgroundImageDecodeFailed(#[source] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to draw image: {0}")]
    DrawFailed(String),

    #[error("Failed to create output file {path}: {source}")]
    OutputFileCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to output: {0}")]
    OutputFailed(#[source] image::ImageError),

    #[error("Failed to read options {path}: {source}")]
    OptionsReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse options: {0}")]
    OptionsParseFailed(#[from] serde_json::Error),
}

/// A loaded font plus background, ready to draw text on.
///
/// The font is kept as raw bytes. `ttf_parser::Face` borrows its data, so
/// each call parses a fresh face; parsing only reads the table directory.
pub struct OgpImage {
    font_data: Vec<u8>,
    font_size: f32,
    style: TextStyle,
    background: RgbaImage,
}

impl OgpImage {
    /// Load every resource named by `options`, failing on the first problem.
    pub fn new(options: &RenderOptions) -> Result<Self, OgpError> {
        let font_data = fs::read(&options.font_path).map_err(|source| OgpError::FontReadFailed {
            path: options.font_path.clone(),
            source,
        })?;
        // Validation only; draw and layout parse again from `font_data`.
        FontFace::parse(&font_data, options.font_size)?;

        if !(options.font_size.is_finite() && options.font_size > 0.0) {
            return Err(OgpError::FontSizeNotPositive(options.font_size));
        }

        let color = if options.font_color.is_empty() {
            Rgba::BLACK
        } else {
            Rgba::from_hex(&options.font_color)?
        };

        let background = load_background(&options.background_image_path)?;
        info!(
            "loaded font {} ({} bytes) and {}x{} background {}",
            options.font_path.display(),
            font_data.len(),
            background.width(),
            background.height(),
            options.background_image_path.display()
        );

        Ok(Self {
            font_data,
            font_size: options.font_size,
            style: TextStyle {
                color,
                top_margin: options.top_margin,
                side_margin: options.side_margin,
                line_spacing: options.line_space,
            },
            background,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.background.dimensions()
    }

    /// Draw `text` onto a copy of the background.
    pub fn draw(&self, text: &str) -> Result<Rendered, OgpError> {
        let face = FontFace::parse(&self.font_data, self.font_size)?;
        compose(&self.background, &face, text, &self.style)
    }

    /// Break and position `text` without drawing anything.
    pub fn layout(&self, text: &str) -> Result<(Vec<PlacedLine>, Vec<usize>), OgpError> {
        let face = FontFace::parse(&self.font_data, self.font_size)?;
        layout_text(self.dimensions(), &face, text, &self.style)
    }
}

/// Open and decode a background image. The format is sniffed from content.
pub fn load_background(path: &Path) -> Result<RgbaImage, OgpError> {
    let read_failed = |source| OgpError::BackgroundImageReadFailed {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(read_failed)?
        .with_guessed_format()
        .map_err(read_failed)?;
    let image = reader
        .decode()
        .map_err(OgpError::BackgroundImageDecodeFailed)?;
    Ok(image.to_rgba8())
}

/// Encode `image` to `path`: PNG for a `.png` extension, JPEG otherwise.
///
/// JPEG has no alpha channel, so it is dropped.
pub fn write_image(image: &RgbaImage, path: &Path) -> Result<(), OgpError> {
    let file = File::create(path).map_err(|source| OgpError::OutputFileCreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        DynamicImage::ImageRgba8(image.clone())
            .write_with_encoder(PngEncoder::new(&mut writer))
            .map_err(OgpError::OutputFailed)?;
    } else {
        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        DynamicImage::ImageRgb8(rgb)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))
            .map_err(OgpError::OutputFailed)?;
    }

    writer
        .flush()
        .map_err(|e| OgpError::OutputFailed(image::ImageError::IoError(e)))?;
    info!("wrote {}", path.display());
    Ok(())
}
