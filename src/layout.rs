//! Layout Compositor - Centered Draw Positions

use serde::{Deserialize, Serialize};

use crate::linebreak::TextMeasurer;

/// Inputs shared by every line of one layout pass. All values are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub line_height: u32,
    pub line_spacing: i32,
    pub top_margin: i32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

/// Baseline origin of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPosition {
    pub x: i32,
    pub y: i32,
}

/// A line together with its measured width and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub text: String,
    pub width: u32,
    pub position: DrawPosition,
}

/// Compute one draw position per line.
///
/// Each line is centered horizontally on its own; the block as a whole is
/// centered vertically and then pushed down by `(i + 1)` line advances plus
/// the top margin. Nothing is clipped.
pub fn compute_positions(
    lines: &[String],
    line_widths: &[u32],
    params: &LayoutParams,
) -> Vec<DrawPosition> {
    debug_assert_eq!(lines.len(), line_widths.len());

    let rows = lines.len() as i64;
    let line_height = i64::from(params.line_height);
    let advance = line_height + i64::from(params.line_spacing);
    let block_top = (i64::from(params.canvas_height) - line_height * rows) / 2;

    line_widths
        .iter()
        .take(lines.len())
        .enumerate()
        .map(|(i, &width)| {
            let x = (i64::from(params.canvas_width) - i64::from(width)) / 2;
            let y = block_top + (i as i64 + 1) * advance + i64::from(params.top_margin);
            DrawPosition {
                x: saturate(x),
                y: saturate(y),
            }
        })
        .collect()
}

/// Measure and position `lines` in one step.
pub fn layout_lines<M: TextMeasurer + ?Sized>(
    lines: Vec<String>,
    measurer: &M,
    params: &LayoutParams,
) -> Vec<PlacedLine> {
    let widths: Vec<u32> = lines.iter().map(|line| measurer.measure(line)).collect();
    let positions = compute_positions(&lines, &widths, params);

    lines
        .into_iter()
        .zip(widths)
        .zip(positions)
        .map(|((text, width), position)| PlacedLine {
            text,
            width,
            position,
        })
        .collect()
}

fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
