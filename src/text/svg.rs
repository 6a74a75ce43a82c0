use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::image::PremulImage;
use crate::foundation::error::{OverlayError, OverlayResult};

/// One line of text placed on a card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSpan<'a> {
    /// Text content (rendered as-is, XML-escaped).
    pub text: &'a str,
    /// Left edge in card pixels.
    pub x: f32,
    /// Top edge in card pixels.
    pub y: f32,
    /// Font size in pixels.
    pub size_px: f32,
}

/// Rasterizes text spans by rendering a generated SVG document through `usvg`/`resvg`.
pub struct TextRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl TextRenderer {
    /// Build a renderer from system fonts plus any font files found in `font_dirs`.
    pub fn new(font_dirs: &[&Path]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "text font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Number of font faces available for text.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `spans` in `rgb` onto a transparent `width x height` layer.
    pub fn render_layer(
        &self,
        width: u32,
        height: u32,
        spans: &[TextSpan<'_>],
        rgb: [u8; 3],
    ) -> OverlayResult<PremulImage> {
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| OverlayError::validation("failed to allocate text pixmap"))?;

        if spans.iter().any(|s| !s.text.trim().is_empty()) {
            let svg = text_layer_svg(width, height, spans, rgb);
            let opts = usvg::Options {
                fontdb: Arc::clone(&self.fontdb),
                font_resolver: make_font_resolver(),
                ..Default::default()
            };
            let tree = usvg::Tree::from_str(&svg, &opts).context("parse text layer svg")?;
            resvg::render(
                &tree,
                resvg::tiny_skia::Transform::identity(),
                &mut pixmap.as_mut(),
            );
        }

        PremulImage::from_premul_raw(width, height, pixmap.data().to_vec())
    }
}

/// Build the SVG document used to rasterize `spans`.
///
/// Each span's `y` is its top edge (`dominant-baseline="text-before-edge"`), matching how the
/// card anchors are measured. Blank spans are skipped.
pub fn text_layer_svg(width: u32, height: u32, spans: &[TextSpan<'_>], rgb: [u8; 3]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let fill = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" fill="{fill}" dominant-baseline="text-before-edge" xml:space="preserve">{}</text>"#,
            span.x,
            span.y,
            span.size_px,
            escape_xml(span.text)
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

// The stock resolver maps `sans-serif` to "Arial", which most Linux hosts lack. Fall back through
// the generic families and finally to any face at all.
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
            families.push(usvg::fontdb::Family::Name("DejaVu Sans"));
            families.push(usvg::fontdb::Family::Name("Liberation Sans"));
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/svg.rs"]
mod tests;
