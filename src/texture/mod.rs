//! Billboard face textures.
//!
//! [`TextureComposer`] paints a title and a word-wrapped body onto an
//! offscreen RGBA image: dark background, blue border, a vertical gradient
//! panel, the title centered at the top, and the body wrapped to the
//! panel's content width below it. Output is deterministic for identical
//! inputs and font metrics. Bodies too long for the canvas overflow the
//! bottom edge and are clipped; nothing reports it.

/// Glyph sources: fontdue fonts and the block fallback.
pub mod face;
/// Rectangles, gradients, and text runs on RGBA images.
pub mod paint;
/// Greedy word wrapping against a width budget.
pub mod wrap;

use image::{Rgba, RgbaImage};

pub use self::face::{BillboardFace, BlockFace, FontFace, GlyphBitmap, GlyphFace};
use self::paint::{Rect, Weight};
use crate::options::BillboardOptions;
use crate::util::color::hex_rgb8;

/// Raster surface produced by the composer.
pub type RasterImage = RgbaImage;

/// Canvas fill behind everything.
pub const BACKGROUND: u32 = 0x0a1628;
/// Border stroke color.
pub const BORDER: u32 = 0x3182ce;
/// Gradient color at the top of the canvas.
pub const GRADIENT_TOP: u32 = 0x1a365d;
/// Gradient color at the bottom of the canvas.
pub const GRADIENT_BOTTOM: u32 = 0x0a1628;
/// Title text color.
pub const TITLE: u32 = 0x90cdf4;
/// Body text color.
pub const BODY: u32 = 0xe2e8f0;
/// Border stroke width in pixels.
pub const BORDER_WIDTH: f32 = 8.0;

/// Renders billboard text onto fixed-size images.
#[derive(Debug)]
pub struct TextureComposer<F> {
    face: F,
    layout: BillboardOptions,
}

impl<F: GlyphFace> TextureComposer<F> {
    /// Create a composer using `face` for metrics and coverage.
    #[must_use]
    pub fn new(face: F, layout: BillboardOptions) -> Self {
        Self { face, layout }
    }

    /// Layout parameters.
    #[must_use]
    pub fn layout(&self) -> &BillboardOptions {
        &self.layout
    }

    /// Glyph source.
    #[must_use]
    pub fn face(&self) -> &F {
        &self.face
    }

    /// Width of `text` at body size.
    #[must_use]
    pub fn measure_body(&self, text: &str) -> f32 {
        self.face.measure(text, self.layout.body_px)
    }

    /// Wrap `body` to the content width at body size.
    #[must_use]
    pub fn wrap_body(&self, body: &str) -> Vec<String> {
        wrap::wrap_words(body, self.layout.body_max_width(), |line| {
            self.measure_body(line)
        })
    }

    /// Paint `title` and `body` onto a new image.
    #[must_use]
    pub fn compose(&self, title: &str, body: &str) -> RasterImage {
        let width = self.layout.texture_width;
        let height = self.layout.texture_height;
        let (w, h) = (width as f32, height as f32);

        let bg = hex_rgb8(BACKGROUND);
        let mut img =
            RgbaImage::from_pixel(width, height, Rgba([bg[0], bg[1], bg[2], u8::MAX]));

        let half = BORDER_WIDTH / 2.0;
        paint::stroke_rect(
            &mut img,
            Rect::new(half, half, w - BORDER_WIDTH, h - BORDER_WIDTH),
            BORDER_WIDTH,
            hex_rgb8(BORDER),
        );
        paint::fill_vertical_gradient(
            &mut img,
            Rect::new(
                BORDER_WIDTH,
                BORDER_WIDTH,
                w - 2.0 * BORDER_WIDTH,
                h - 2.0 * BORDER_WIDTH,
            ),
            hex_rgb8(GRADIENT_TOP),
            hex_rgb8(GRADIENT_BOTTOM),
        );

        paint::draw_text_centered(
            &mut img,
            &self.face,
            title,
            self.layout.title_px,
            Weight::Bold,
            w / 2.0,
            self.layout.title_top,
            hex_rgb8(TITLE),
        );

        for (i, line) in self.wrap_body(body).iter().enumerate() {
            paint::draw_text_centered(
                &mut img,
                &self.face,
                line,
                self.layout.body_px,
                Weight::Regular,
                w / 2.0,
                self.layout.body_top + i as f32 * self.layout.line_height,
                hex_rgb8(BODY),
            );
        }

        img
    }
}
