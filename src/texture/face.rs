//! Glyph metrics and coverage sources for billboard text.
//!
//! [`FontFace`] wraps a fontdue font loaded from a TTF/OTF file.
//! [`BlockFace`] draws every visible character as a solid block with a
//! fixed advance; it needs no font file and its metrics are exact, which
//! makes it the fallback when no font can be found and the face used by
//! tests.

use std::path::{Path, PathBuf};

use crate::error::CityError;
use crate::options::BillboardOptions;

/// Well-known font locations tried when no font path is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Coverage bitmap for one glyph, positioned relative to the pen and the
/// baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels.
    pub width: usize,
    /// Bitmap height in pixels.
    pub height: usize,
    /// Horizontal offset from the pen position to the bitmap's left edge.
    pub xmin: i32,
    /// Offset from the baseline to the bitmap's bottom edge (positive up).
    pub ymin: i32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Synthetic bold: the bitmap smeared one pixel to the right, each
    /// pixel taking the larger coverage of itself and its left neighbor.
    #[must_use]
    pub fn emboldened(&self) -> Self {
        if self.width == 0 || self.height == 0 {
            return self.clone();
        }
        let width = self.width + 1;
        let mut coverage = vec![0; width * self.height];
        for row in 0..self.height {
            let src = &self.coverage[row * self.width..(row + 1) * self.width];
            let dst = &mut coverage[row * width..(row + 1) * width];
            for (col, out) in dst.iter_mut().enumerate() {
                let here = src.get(col).copied().unwrap_or(0);
                let left = col.checked_sub(1).and_then(|c| src.get(c)).copied().unwrap_or(0);
                *out = here.max(left);
            }
        }
        Self {
            width,
            coverage,
            ..self.clone()
        }
    }
}

/// Source of glyph metrics and coverage.
pub trait GlyphFace {
    /// Horizontal advance of `ch` at `px` pixels.
    fn advance(&self, ch: char, px: f32) -> f32;

    /// Distance from the top of a line to its baseline at `px` pixels.
    fn ascent(&self, px: f32) -> f32;

    /// Rasterize `ch` at `px` pixels.
    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap;

    /// Width of `text` as the sum of its advances.
    fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().map(|ch| self.advance(ch, px)).sum()
    }
}

/// Fixed-advance block glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFace {
    /// Advance as a fraction of the pixel size.
    pub advance_ratio: f32,
}

impl Default for BlockFace {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl GlyphFace for BlockFace {
    fn advance(&self, _ch: char, px: f32) -> f32 {
        px * self.advance_ratio
    }

    fn ascent(&self, px: f32) -> f32 {
        px * 0.8
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        if ch.is_whitespace() {
            return GlyphBitmap {
                width: 0,
                height: 0,
                xmin: 0,
                ymin: 0,
                coverage: Vec::new(),
            };
        }
        let width = (px * self.advance_ratio * 0.8).round().max(1.0) as usize;
        let height = (px * 0.7).round().max(1.0) as usize;
        GlyphBitmap {
            width,
            height,
            xmin: (px * self.advance_ratio * 0.1).round() as i32,
            ymin: 0,
            coverage: vec![u8::MAX; width * height],
        }
    }
}

/// A TTF/OTF font rasterized with fontdue.
pub struct FontFace {
    font: fontdue::Font,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("name", &self.font.name())
            .finish()
    }
}

impl FontFace {
    /// Parse a font from raw file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CityError> {
        fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map(|font| Self { font })
            .map_err(|e| CityError::Font(e.to_owned()))
    }

    /// Load a font file from disk.
    pub fn load(path: &Path) -> Result<Self, CityError> {
        let bytes = std::fs::read(path)?;
        fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map(|font| Self { font })
            .map_err(|e| CityError::Font(format!("{}: {e}", path.display())))
    }

    /// Load the first well-known system font that exists and parses.
    #[must_use]
    pub fn discover() -> Option<(Self, PathBuf)> {
        SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).find_map(|path| {
            if !path.exists() {
                return None;
            }
            match Self::load(&path) {
                Ok(face) => Some((face, path)),
                Err(e) => {
                    log::debug!("skipping system font: {e}");
                    None
                }
            }
        })
    }
}

impl GlyphFace for FontFace {
    fn advance(&self, ch: char, px: f32) -> f32 {
        self.font.metrics(ch, px).advance_width
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent)
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        GlyphBitmap {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            coverage,
        }
    }
}

/// The face used for billboard textures: a real font when one is
/// available, block glyphs otherwise.
#[derive(Debug)]
pub enum BillboardFace {
    /// Font file rasterized with fontdue.
    Font(FontFace),
    /// Built-in block glyphs.
    Block(BlockFace),
}

impl BillboardFace {
    /// Load the configured font, or discover a system font, falling back
    /// to block glyphs. A configured font that fails to load is an error.
    pub fn from_options(options: &BillboardOptions) -> Result<Self, CityError> {
        if let Some(ref path) = options.font_path {
            let face = FontFace::load(path)?;
            log::info!("billboard font: {}", path.display());
            return Ok(Self::Font(face));
        }
        if let Some((face, path)) = FontFace::discover() {
            log::info!("billboard font: {}", path.display());
            return Ok(Self::Font(face));
        }
        log::warn!("no system font found; billboards use block glyphs");
        Ok(Self::Block(BlockFace::default()))
    }
}

impl GlyphFace for BillboardFace {
    fn advance(&self, ch: char, px: f32) -> f32 {
        match self {
            Self::Font(face) => face.advance(ch, px),
            Self::Block(face) => face.advance(ch, px),
        }
    }

    fn ascent(&self, px: f32) -> f32 {
        match self {
            Self::Font(face) => face.ascent(px),
            Self::Block(face) => face.ascent(px),
        }
    }

    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        match self {
            Self::Font(face) => face.rasterize(ch, px),
            Self::Block(face) => face.rasterize(ch, px),
        }
    }
}
