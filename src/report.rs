//! Render Report - JSON summary of a written image
//!
//! The SHA-256 digest lets callers verify the file they pick up is the one
//! that was rendered.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::layout::PlacedLine;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

impl From<&PlacedLine> for ReportLine {
    fn from(line: &PlacedLine) -> Self {
        Self {
            text: line.text.clone(),
            x: line.position.x,
            y: line.position.y,
            width: line.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderReport {
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub lines: Vec<ReportLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forced_breaks: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl RenderReport {
    pub fn new(dimensions: (u32, u32), lines: &[PlacedLine], forced_breaks: &[usize]) -> Self {
        Self {
            output: None,
            width: dimensions.0,
            height: dimensions.1,
            lines: lines.iter().map(ReportLine::from).collect(),
            forced_breaks: forced_breaks.to_vec(),
            sha256: None,
        }
    }

    /// Record the written file and its digest.
    pub fn with_output(mut self, path: PathBuf, bytes: &[u8]) -> Self {
        self.output = Some(path);
        self.sha256 = Some(sha256_hex(bytes));
        self
    }
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
