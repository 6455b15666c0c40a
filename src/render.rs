//! Rendering - Lines onto a Background Raster
//!
//! Breaks the text, lays it out, and fills each glyph outline onto a copy of
//! the background.

use image::RgbaImage;
use log::debug;
use tiny_skia as sk;

use crate::color::Rgba;
use crate::font::Typeface;
use crate::layout::{layout_lines, LayoutParams, PlacedLine};
use crate::linebreak::break_lines_detailed;
use crate::pipeline::OgpError;

/// How text is placed and painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub color: Rgba,
    pub top_margin: i32,
    pub side_margin: i32,
    pub line_spacing: i32,
}

/// The composed image plus the layout that produced it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub lines: Vec<PlacedLine>,
    /// Line boundaries that had to break a kinsoku rule.
    pub forced_breaks: Vec<usize>,
}

/// Usable line width once both side margins are taken off.
pub fn width_budget(canvas_width: u32, side_margin: i32) -> Result<u32, OgpError> {
    let budget = i64::from(canvas_width) - 2 * i64::from(side_margin);
    if budget <= 0 {
        return Err(OgpError::InvalidConfiguration(format!(
            "side margin {side_margin} leaves no room on a {canvas_width}px wide canvas"
        )));
    }
    Ok(u32::try_from(budget).unwrap_or(u32::MAX))
}

/// Break and position `text` for a canvas without drawing it.
pub fn layout_text<F: Typeface + ?Sized>(
    canvas: (u32, u32),
    face: &F,
    text: &str,
    style: &TextStyle,
) -> Result<(Vec<PlacedLine>, Vec<usize>), OgpError> {
    let (canvas_width, canvas_height) = canvas;
    let budget = width_budget(canvas_width, style.side_margin)?;
    let sequence = break_lines_detailed(face, budget, text);

    let params = LayoutParams {
        line_height: face.line_height(),
        line_spacing: style.line_spacing,
        top_margin: style.top_margin,
        canvas_width,
        canvas_height,
    };
    let lines = layout_lines(sequence.lines, face, &params);
    Ok((lines, sequence.forced_breaks))
}

/// Draw `text` onto a copy of `background`.
pub fn compose<F: Typeface + ?Sized>(
    background: &RgbaImage,
    face: &F,
    text: &str,
    style: &TextStyle,
) -> Result<Rendered, OgpError> {
    let (lines, forced_breaks) = layout_text(background.dimensions(), face, text, style)?;

    let mut canvas = to_pixmap(background)?;
    let mut paint = sk::Paint::default();
    paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, style.color.a);
    paint.anti_alias = true;

    for line in &lines {
        debug!(
            "drawing {:?} at ({}, {})",
            line.text, line.position.x, line.position.y
        );
        draw_line(&mut canvas, face, line, &paint);
    }

    Ok(Rendered {
        image: from_pixmap(&canvas)?,
        lines,
        forced_breaks,
    })
}

fn draw_line<F: Typeface + ?Sized>(
    canvas: &mut sk::Pixmap,
    face: &F,
    line: &PlacedLine,
    paint: &sk::Paint,
) {
    let baseline = line.position.y as f32;
    let mut pen = line.position.x as f32;
    let mut prev = None;

    for ch in line.text.chars() {
        if let Some(left) = prev {
            pen += face.kerning(left, ch);
        }
        prev = Some(ch);
        if let Some(path) = face.glyph_path(ch) {
            let ts = sk::Transform::from_translate(pen, baseline);
            canvas.fill_path(&path, paint, sk::FillRule::Winding, ts, None);
        }
        pen += face.glyph_advance(ch);
    }
}

fn to_pixmap(image: &RgbaImage) -> Result<sk::Pixmap, OgpError> {
    let (width, height) = image.dimensions();
    let mut pixmap = sk::Pixmap::new(width, height).ok_or_else(|| {
        OgpError::DrawFailed(format!("cannot allocate a {width}x{height} canvas"))
    })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = sk::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn from_pixmap(pixmap: &sk::Pixmap) -> Result<RgbaImage, OgpError> {
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| OgpError::DrawFailed("canvas size mismatch".to_string()))
}
