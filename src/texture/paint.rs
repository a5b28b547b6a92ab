//! Minimal 2D painting on RGBA images: rectangles, strokes, vertical
//! gradients, and alpha-blended glyph runs.

use image::{Rgba, RgbaImage};

use super::face::GlyphFace;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Grow (or shrink, for negative `by`) on every side.
    #[must_use]
    pub fn inflate(self, by: f32) -> Self {
        Self::new(self.x - by, self.y - by, self.w + 2.0 * by, self.h + 2.0 * by)
    }

    /// Whether the center of pixel `(px, py)` lies inside.
    fn covers(&self, px: u32, py: u32) -> bool {
        let cx = px as f32 + 0.5;
        let cy = py as f32 + 0.5;
        cx >= self.x && cx < self.x + self.w && cy >= self.y && cy < self.y + self.h
    }

    /// Pixel rows/columns whose centers may fall inside, clipped to the
    /// canvas.
    fn pixel_span(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let clip = |v: f32, max: u32| v.max(0.0).min(max as f32) as u32;
        (
            clip(self.x.floor(), width),
            clip(self.y.floor(), height),
            clip((self.x + self.w).ceil(), width),
            clip((self.y + self.h).ceil(), height),
        )
    }
}

fn opaque(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], u8::MAX])
}

/// Fill `rect` with a solid color.
pub fn fill_rect(img: &mut RgbaImage, rect: Rect, rgb: [u8; 3]) {
    let (x0, y0, x1, y1) = rect.pixel_span(img.width(), img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            if rect.covers(x, y) {
                img.put_pixel(x, y, opaque(rgb));
            }
        }
    }
}

/// Stroke the outline of `rect` with a line of `line_width` centered on
/// the rectangle's edges.
pub fn stroke_rect(img: &mut RgbaImage, rect: Rect, line_width: f32, rgb: [u8; 3]) {
    let outer = rect.inflate(line_width / 2.0);
    let inner = rect.inflate(-line_width / 2.0);
    let (x0, y0, x1, y1) = outer.pixel_span(img.width(), img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            if outer.covers(x, y) && !inner.covers(x, y) {
                img.put_pixel(x, y, opaque(rgb));
            }
        }
    }
}

/// Fill `rect` with a vertical gradient running from `top` at canvas
/// row 0 to `bottom` at the last canvas row.
pub fn fill_vertical_gradient(
    img: &mut RgbaImage,
    rect: Rect,
    top: [u8; 3],
    bottom: [u8; 3],
) {
    let span = img.height().max(1) as f32;
    let (x0, y0, x1, y1) = rect.pixel_span(img.width(), img.height());
    for y in y0..y1 {
        let t = (y as f32 + 0.5) / span;
        let rgb = lerp_rgb(top, bottom, t);
        for x in x0..x1 {
            if rect.covers(x, y) {
                img.put_pixel(x, y, opaque(rgb));
            }
        }
    }
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [0, 1, 2].map(|i| {
        (f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * t).round() as u8
    })
}

/// Stroke weight of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    /// Glyphs as the face rasterizes them.
    #[default]
    Regular,
    /// Glyphs emboldened by one pixel ([`GlyphBitmap::emboldened`]).
    ///
    /// [`GlyphBitmap::emboldened`]: super::face::GlyphBitmap::emboldened
    Bold,
}

/// Draw one line of text horizontally centered on `center_x`, with the
/// top of the line at `top`. Glyph coverage is alpha-blended over the
/// existing pixels; anything outside the canvas is clipped.
pub fn draw_text_centered<F: GlyphFace + ?Sized>(
    img: &mut RgbaImage,
    face: &F,
    text: &str,
    px: f32,
    weight: Weight,
    center_x: f32,
    top: f32,
    rgb: [u8; 3],
) {
    let width = face.measure(text, px);
    let baseline = top + face.ascent(px);
    let mut pen_x = center_x - width / 2.0;

    for ch in text.chars() {
        let glyph = match weight {
            Weight::Regular => face.rasterize(ch, px),
            Weight::Bold => face.rasterize(ch, px).emboldened(),
        };
        let left = pen_x.round() as i64 + i64::from(glyph.xmin);
        let glyph_top =
            baseline.round() as i64 - i64::from(glyph.ymin) - glyph.height as i64;

        for row in 0..glyph.height {
            for col in 0..glyph.width {
                let coverage = glyph.coverage[row * glyph.width + col];
                if coverage == 0 {
                    continue;
                }
                let x = left + col as i64;
                let y = glyph_top + row as i64;
                if x < 0
                    || y < 0
                    || x >= i64::from(img.width())
                    || y >= i64::from(img.height())
                {
                    continue;
                }
                blend(img, x as u32, y as u32, rgb, coverage);
            }
        }
        pen_x += face.advance(ch, px);
    }
}

fn blend(img: &mut RgbaImage, x: u32, y: u32, rgb: [u8; 3], coverage: u8) {
    let alpha = f32::from(coverage) / 255.0;
    let bg = img.get_pixel(x, y).0;
    let mixed = [0, 1, 2].map(|i| {
        (f32::from(rgb[i]) * alpha + f32::from(bg[i]) * (1.0 - alpha)).round() as u8
    });
    img.put_pixel(x, y, Rgba([mixed[0], mixed[1], mixed[2], bg[3]]));
}
