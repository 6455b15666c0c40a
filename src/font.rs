//! Font faces - measurement, metrics and glyph outlines
//!
//! Sizes are in pixels at 72 DPI, so a point size maps 1:1 onto pixels.

use tiny_skia as sk;
use ttf_parser::{Face, FaceParsingError, GlyphId, OutlineBuilder};

use crate::linebreak::TextMeasurer;

/// Everything the renderer needs from a font at a fixed size.
pub trait Typeface: TextMeasurer {
    /// Vertical advance per line in pixels.
    fn line_height(&self) -> u32;

    /// Horizontal pen advance for `ch` in pixels.
    fn glyph_advance(&self, ch: char) -> f32;

    /// Pair adjustment added to the pen between `left` and `right`.
    fn kerning(&self, _left: char, _right: char) -> f32 {
        0.0
    }

    /// Outline of `ch` in pixel space, y pointing down, origin at the pen
    /// position on the baseline. `None` for blank glyphs.
    fn glyph_path(&self, ch: char) -> Option<sk::Path>;
}

/// A parsed TrueType/OpenType face at a given pixel size.
pub struct FontFace<'a> {
    face: Face<'a>,
    size: f32,
    scale: f32,
}

impl<'a> FontFace<'a> {
    /// Parse the first face in `data`. `size` must be positive; callers
    /// validate it first.
    pub fn parse(data: &'a [u8], size: f32) -> Result<Self, FaceParsingError> {
        let face = Face::parse(data, 0)?;
        let scale = size / f32::from(face.units_per_em());
        Ok(Self { face, size, scale })
    }

    fn glyph_id(&self, ch: char) -> GlyphId {
        // Unmapped characters render as .notdef.
        self.face.glyph_index(ch).unwrap_or(GlyphId(0))
    }
}

/// Pen travel across `text`: advances plus kerning between neighbours.
pub fn advance_width<F: Typeface + ?Sized>(face: &F, text: &str) -> f32 {
    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        if let Some(left) = prev {
            width += face.kerning(left, ch);
        }
        width += face.glyph_advance(ch);
        prev = Some(ch);
    }
    width
}

impl TextMeasurer for FontFace<'_> {
    fn measure(&self, text: &str) -> u32 {
        advance_width(self, text).ceil().max(0.0) as u32
    }
}

impl Typeface for FontFace<'_> {
    fn line_height(&self) -> u32 {
        self.size.ceil().max(0.0) as u32
    }

    fn glyph_advance(&self, ch: char) -> f32 {
        let id = self.glyph_id(ch);
        f32::from(self.face.glyph_hor_advance(id).unwrap_or(0)) * self.scale
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        let Some(kern) = self.face.tables().kern else {
            return 0.0;
        };
        let (left, right) = (self.glyph_id(left), self.glyph_id(right));
        kern.subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable && !st.has_cross_stream)
            .find_map(|st| st.glyphs_kerning(left, right))
            .map_or(0.0, |units| f32::from(units) * self.scale)
    }

    fn glyph_path(&self, ch: char) -> Option<sk::Path> {
        let mut builder = WrappedPathBuilder(sk::PathBuilder::new());
        self.face.outline_glyph(self.glyph_id(ch), &mut builder)?;
        let path = builder.0.finish()?;

        // Font design space is y-up.
        path.transform(sk::Transform::from_scale(self.scale, -self.scale))
    }
}

/// Allows to build tiny-skia paths from glyph outlines.
struct WrappedPathBuilder(sk::PathBuilder);

impl OutlineBuilder for WrappedPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU: &[u8] = include_bytes!("../tests/fixtures/DejaVuSans.ttf");

    fn dejavu(size: f32) -> FontFace<'static> {
        FontFace::parse(DEJAVU, size).unwrap()
    }

    #[test]
    fn test_measure_is_additive_within_rounding() {
        let face = dejavu(100.0);
        let one = face.measure("H");
        let two = face.measure("HH");
        assert!(one > 50, "H = {one}");
        assert!(two >= 2 * one - 1 && two <= 2 * one, "H = {one}, HH = {two}");
        assert_eq!(face.measure(""), 0);
    }

    #[test]
    fn test_line_height_is_em_size_rounded_up() {
        assert_eq!(dejavu(100.0).line_height(), 100);
        assert_eq!(dejavu(12.5).line_height(), 13);
    }

    #[test]
    fn test_kerned_pairs_are_tighter() {
        let face = dejavu(100.0);
        assert!(face.kerning('T', 'o') < -10.0);
        assert!(face.kerning('A', 'V') < -5.0);
        assert_eq!(face.kerning('H', 'H'), 0.0);

        assert!(face.measure("To") + 10 < face.measure("T") + face.measure("o"));
        assert!(face.measure("AV") + 4 < face.measure("A") + face.measure("V"));
    }

    #[test]
    fn test_glyph_sits_on_the_baseline() {
        let path = dejavu(100.0).glyph_path('H').unwrap();
        let bounds = path.bounds();
        // Cap height is roughly 73px; y grows downwards.
        assert!(bounds.top() < -60.0, "top = {}", bounds.top());
        assert!(bounds.bottom() <= 0.5, "bottom = {}", bounds.bottom());
        assert!(bounds.left() >= 0.0);
    }

    #[test]
    fn test_blank_and_unmapped_glyphs() {
        let face = dejavu(100.0);
        assert!(face.glyph_path(' ').is_none());
        assert!(face.glyph_advance(' ') > 0.0);
        // No CJK coverage in this face: drawn as .notdef, which still advances.
        assert!(face.measure("漢") > 0);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(FontFace::parse(b"definitely not a font", 12.0).is_err());
        assert!(FontFace::parse(&[], 12.0).is_err());
    }

    #[test]
    fn test_path_builder_closes_contours() {
        let mut builder = WrappedPathBuilder(sk::PathBuilder::new());
        builder.move_to(0.0, 0.0);
        builder.line_to(10.0, 0.0);
        builder.quad_to(10.0, 5.0, 10.0, 10.0);
        builder.curve_to(5.0, 10.0, 2.0, 8.0, 0.0, 10.0);
        builder.close();
        let path = builder.0.finish().unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 10.0);
        assert_eq!(bounds.bottom(), 10.0);
    }
}
