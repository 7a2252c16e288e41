use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use image::RgbaImage;
use kurbo::Affine;
use resvg::tiny_skia::{self, FilterQuality, IntSize, Pixmap, PixmapPaint};

use crate::{
    foundation::{
        core::{CancelToken, Rgba8},
        error::{KritiError, KritiResult},
    },
    raster::pixels::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    source::ImageSource,
    template::node::{ImageNode, Node, Template, TextNode},
};

/// Vertical anchor, in font heights, from `y` down to the baseline.
const TEXT_ANCHOR_Y: f64 = 1.1;
/// Font height as a fraction of the font size.
const FONT_HEIGHT_RATIO: f64 = 0.75;

/// Draws parsed templates onto a square RGBA canvas.
#[derive(Clone, Debug)]
pub struct Compositor {
    font_path: PathBuf,
    max_canvas_size: u32,
}

/// The single font used for every text node, loaded on first use.
struct LoadedFont {
    db: Arc<usvg::fontdb::Database>,
    family: String,
}

impl Compositor {
    pub fn new(font_path: impl Into<PathBuf>, max_canvas_size: u32) -> Self {
        Self {
            font_path: font_path.into(),
            max_canvas_size,
        }
    }

    /// Render `template`, fetching image nodes through `images`.
    #[tracing::instrument(skip_all)]
    pub fn render(
        &self,
        template: &Template,
        images: &dyn ImageSource,
        cancel: &CancelToken,
    ) -> KritiResult<RgbaImage> {
        let side = template.canvas_side(self.max_canvas_size)?;
        let mut canvas = Pixmap::new(side, side)
            .ok_or_else(|| KritiError::InvalidCanvasSize(format!("{side}x{side}")))?;
        if !template.fill.is_transparent() {
            canvas.fill(skia_color(template.fill));
        }

        let mut font: Option<LoadedFont> = None;
        template.root.walk(&mut |node: &Node| -> KritiResult<()> {
            cancel.check()?;
            match node {
                Node::Group(_) => Ok(()),
                Node::Image(img) => draw_image(&mut canvas, img, images, cancel),
                Node::Text(text) => {
                    if text.text.is_empty() {
                        return Ok(());
                    }
                    let font = match &mut font {
                        Some(f) => f,
                        slot => slot.insert(load_font(&self.font_path)?),
                    };
                    draw_text(&mut canvas, text, font)
                }
            }
        })?;

        tracing::debug!(side, "template rendered");
        pixmap_to_image(canvas)
    }
}

fn load_font(path: &Path) -> KritiResult<LoadedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_file(path)
        .map_err(|e| KritiError::Font(format!("load font '{}': {e}", path.display())))?;
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
        .ok_or_else(|| KritiError::Font(format!("no usable face in '{}'", path.display())))?;
    Ok(LoadedFont {
        db: Arc::new(db),
        family,
    })
}

fn draw_image(
    canvas: &mut Pixmap,
    node: &ImageNode,
    images: &dyn ImageSource,
    cancel: &CancelToken,
) -> KritiResult<()> {
    if node.path.trim().is_empty() {
        return Ok(());
    }
    let src = images.fetch(&node.path, cancel)?;
    let pixmap = image_to_pixmap(&src.raster)?;

    let xform =
        Affine::translate((node.x, node.y)) * Affine::scale_non_uniform(node.scale_x, node.scale_y);
    let quality = if node.scale_x == 1.0 && node.scale_y == 1.0 {
        FilterQuality::Nearest
    } else {
        FilterQuality::Bilinear
    };
    let paint = PixmapPaint {
        quality,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, pixmap.as_ref(), &paint, skia_transform(xform), None);
    Ok(())
}

fn draw_text(canvas: &mut Pixmap, node: &TextNode, font: &LoadedFont) -> KritiResult<()> {
    let (w, h) = (canvas.width(), canvas.height());
    let baseline = node.y + TEXT_ANCHOR_Y * FONT_HEIGHT_RATIO * node.font_size;
    let Rgba8 { r, g, b, a } = node.fill;
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<g transform="scale({sx} {sy})">"#,
            r#"<text x="{x}" y="{y}" font-family="'{family}'" font-size="{size}" "#,
            r#"fill="rgb({r},{g},{b})" fill-opacity="{opacity}" xml:space="preserve">{text}</text>"#,
            r#"</g></svg>"#
        ),
        w = w,
        h = h,
        sx = node.scale_x,
        sy = node.scale_y,
        x = node.x,
        y = baseline,
        family = xml_escape(&font.family),
        size = node.font_size,
        r = r,
        g = g,
        b = b,
        opacity = f32::from(a) / 255.0,
        text = xml_escape(&node.text),
    );

    let opts = usvg::Options {
        fontdb: font.db.clone(),
        font_family: font.family.clone(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| KritiError::Font(format!("lay out text: {e}")))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut canvas.as_mut());
    Ok(())
}

fn xml_escape(s: &str) -> String {
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

fn skia_color(c: Rgba8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn skia_transform(a: Affine) -> tiny_skia::Transform {
    let [sx, ky, kx, sy, tx, ty] = a.as_coeffs();
    tiny_skia::Transform::from_row(
        sx as f32, ky as f32, kx as f32, sy as f32, tx as f32, ty as f32,
    )
}

fn image_to_pixmap(img: &RgbaImage) -> KritiResult<Pixmap> {
    let (w, h) = img.dimensions();
    let size = IntSize::from_wh(w, h)
        .ok_or_else(|| KritiError::Other(anyhow::anyhow!("empty image node raster")))?;
    let mut data = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut data);
    Pixmap::from_vec(data, size)
        .ok_or_else(|| KritiError::Other(anyhow::anyhow!("image node pixmap {w}x{h}")))
}

fn pixmap_to_image(pixmap: Pixmap) -> KritiResult<RgbaImage> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut data = pixmap.take();
    unpremultiply_rgba8_in_place(&mut data);
    RgbaImage::from_raw(w, h, data)
        .ok_or_else(|| KritiError::Other(anyhow::anyhow!("canvas buffer size mismatch")))
}

#[cfg(test)]
#[path = "../../tests/unit/template/compositor.rs"]
mod tests;
