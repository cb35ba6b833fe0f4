use std::sync::Arc;

use crate::config::RasterParams;
use crate::foundation::core::Point;
use crate::foundation::rng::Rng64;
use crate::glyph::block_font::block_text_svg;

/// Largest raster side accepted; bigger requests yield no points.
pub const MAX_DIM: u32 = 8192;

/// One sampled foreground point in raster space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPoint {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
}

impl GlyphPoint {
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Produces point clouds for swarm formations.
///
/// Outline text is laid out as an SVG `<text>` node and rasterized with `resvg`; when the font
/// database is empty or the outline pass leaves nothing above threshold, the built-in block font
/// is drawn instead.
#[derive(Clone)]
pub struct GlyphRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    params: RasterParams,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("faces", &self.fontdb.len())
            .field("params", &self.params)
            .finish()
    }
}

impl GlyphRasterizer {
    /// Rasterizer backed by the system fonts.
    pub fn new(params: RasterParams) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fontdb(Arc::new(db), params)
    }

    /// Rasterizer backed by a caller-provided font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>, params: RasterParams) -> Self {
        Self { fontdb, params }
    }

    /// Rasterizer that only uses the block font (deterministic across machines).
    pub fn block_only(params: RasterParams) -> Self {
        Self::with_fontdb(Arc::new(usvg::fontdb::Database::new()), params)
    }

    pub fn params(&self) -> &RasterParams {
        &self.params
    }

    pub fn has_fonts(&self) -> bool {
        !self.fontdb.is_empty()
    }

    /// Sample `text` centered in a `width` x `height` raster.
    ///
    /// Never fails: degenerate or oversized dimensions, blank text and render failures all
    /// return an empty set. Point order carries no meaning.
    #[tracing::instrument(skip(self, rng), fields(faces = self.fontdb.len()))]
    pub fn rasterize(
        &self,
        text: &str,
        width: f64,
        height: f64,
        rng: &mut Rng64,
    ) -> Vec<GlyphPoint> {
        let Some((w, h)) = raster_dims(width, height) else {
            tracing::debug!("degenerate raster size, no points");
            return Vec::new();
        };
        let visible = text.chars().filter(|c| !c.is_whitespace()).count();
        if visible == 0 {
            return Vec::new();
        }

        let short = visible <= self.params.short_text_max_chars;
        let step = if short {
            self.params.step_short
        } else {
            self.params.step_long
        }
        .max(1);

        if self.has_fonts() {
            let size = font_size_for(visible, short, w, h);
            let svg = text_svg(text, w, h, size);
            if let Some(alpha) = self.render_alpha(&svg, w, h) {
                let points = self.sample(&alpha, w, h, step, rng);
                if !points.is_empty() {
                    return points;
                }
            }
            tracing::warn!("outline text produced no foreground, using block font");
        }

        let Some(svg) = block_text_svg(text, w, h) else {
            return Vec::new();
        };
        match self.render_alpha(&svg, w, h) {
            Some(alpha) => self.sample(&alpha, w, h, step, rng),
            None => Vec::new(),
        }
    }

    fn render_alpha(&self, svg: &str, w: u32, h: u32) -> Option<Vec<u8>> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = match usvg::Tree::from_str(svg, &opts) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::warn!(%err, "parse glyph svg");
                return None;
            }
        };
        let Some(mut pixmap) = resvg::tiny_skia::Pixmap::new(w, h) else {
            tracing::warn!(w, h, "failed to allocate glyph pixmap");
            return None;
        };
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Some(pixmap.data().chunks_exact(4).map(|px| px[3]).collect())
    }

    fn sample(&self, alpha: &[u8], w: u32, h: u32, step: u32, rng: &mut Rng64) -> Vec<GlyphPoint> {
        let jitter = self.params.jitter_px;
        let mut out = Vec::new();
        for y in (0..h).step_by(step as usize) {
            for x in (0..w).step_by(step as usize) {
                let a = alpha[(y as usize) * (w as usize) + (x as usize)];
                if a <= self.params.alpha_threshold {
                    continue;
                }
                out.push(GlyphPoint {
                    x: f64::from(x) + rng.range_f64(-jitter, jitter),
                    y: f64::from(y) + rng.range_f64(-jitter, jitter),
                });
            }
        }
        out
    }
}

fn raster_dims(width: f64, height: f64) -> Option<(u32, u32)> {
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return None;
    }
    let (w, h) = (width.round(), height.round());
    if w > f64::from(MAX_DIM) || h > f64::from(MAX_DIM) {
        return None;
    }
    Some((w as u32, h as u32))
}

/// Font size for `visible` non-space characters; short text is set larger.
pub fn font_size_for(visible: usize, short: bool, width: u32, height: u32) -> f64 {
    let n = visible.max(1) as f64;
    let (w, h) = (f64::from(width), f64::from(height));
    if short {
        (h * 0.55).min(w / (n * 0.62))
    } else {
        (h * 0.32).min(w / (n * 0.6))
    }
}

/// Bold, centered SVG text node filling a `width` x `height` canvas.
pub fn text_svg(text: &str, width: u32, height: u32, font_size: f64) -> String {
    let cx = f64::from(width) / 2.0;
    let baseline = f64::from(height) / 2.0 + font_size * 0.35;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="{cx:.2}" y="{baseline:.2}" font-family="sans-serif" font-weight="700" font-size="{font_size:.2}" text-anchor="middle" fill="#000">{}</text></svg>"##,
        escape_xml(text)
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            // Fall back to the first face.
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/raster.rs"]
mod tests;
