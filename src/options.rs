//! Render Options - JSON-loadable configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pipeline::OgpError;

pub const DEFAULT_FONT_SIZE: f32 = 100.0;
pub const DEFAULT_FONT_COLOR: &str = "#000000";

/// Everything needed to build an [`OgpImage`](crate::OgpImage).
///
/// `font_size` is in points at 72 DPI (one point per pixel). Margins and
/// line space are pixels; negative values are allowed and pull text outwards
/// or lines closer together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub font_path: PathBuf,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default)]
    pub background_image_path: PathBuf,
    #[serde(default)]
    pub top_margin: i32,
    #[serde(default)]
    pub side_margin: i32,
    #[serde(default)]
    pub line_space: i32,
}

fn default_font_size() -> f32 { DEFAULT_FONT_SIZE }
fn default_font_color() -> String { DEFAULT_FONT_COLOR.to_string() }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_path: PathBuf::new(),
            font_size: default_font_size(),
            font_color: default_font_color(),
            background_image_path: PathBuf::new(),
            top_margin: 0,
            side_margin: 0,
            line_space: 0,
        }
    }
}

impl RenderOptions {
    /// Read options from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, OgpError> {
        let content = fs::read_to_string(path).map_err(|source| OgpError::OptionsReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
