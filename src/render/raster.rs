use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::{
    core::Canvas,
    error::{HeroError, HeroResult},
};

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// SVG rasterizer with a font database loaded once up front.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.options.fontdb.len())
            .finish()
    }
}

impl Rasterizer {
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fontdb(db)
    }

    pub fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    #[tracing::instrument(skip(self, svg))]
    pub fn rasterize(&self, svg: &str, canvas: Canvas) -> HeroResult<FrameRgba> {
        canvas.validate()?;
        let tree = usvg::Tree::from_str(svg, &self.options).context("parse frame svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| HeroError::render("failed to allocate pixmap"))?;

        let size = tree.size();
        let transform = resvg::tiny_skia::Transform::from_scale(
            canvas.width as f32 / size.width(),
            canvas.height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        Ok(FrameRgba {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

pub fn write_png(frame: &FrameRgba, path: &Path) -> HeroResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> HeroResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas {
            width: 8,
            height: 4,
        }
    }

    #[test]
    fn solid_rect_rasterizes() {
        let r = Rasterizer::with_fontdb(usvg::fontdb::Database::new());
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4" fill="#ff0000"/></svg>"##;
        let frame = r.rasterize(svg, canvas()).unwrap();
        assert_eq!(frame.data.len(), 8 * 4 * 4);
        assert_eq!(&frame.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn svg_is_scaled_to_canvas() {
        let r = Rasterizer::with_fontdb(usvg::fontdb::Database::new());
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="1"><rect width="1" height="1" fill="#0000ff"/></svg>"##;
        let frame = r.rasterize(svg, canvas()).unwrap();
        // Left half blue, right half transparent.
        assert_eq!(&frame.data[0..4], &[0, 0, 255, 255]);
        let last = frame.data.len() - 4;
        assert_eq!(frame.data[last + 3], 0);
    }

    #[test]
    fn malformed_svg_is_an_error() {
        let r = Rasterizer::with_fontdb(usvg::fontdb::Database::new());
        assert!(r.rasterize("<svg", canvas()).is_err());
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let r = Rasterizer::with_fontdb(usvg::fontdb::Database::new());
        let bad = Canvas {
            width: 0,
            height: 4,
        };
        assert!(matches!(
            r.rasterize("<svg/>", bad),
            Err(HeroError::Validation(_))
        ));
    }
}
