//! Source image shown by the magnifier

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::domain::Size;
use crate::render::image::pixmap_from_rgba;
use crate::render::surface::RenderError;

/// A loaded image with both raw RGBA data and a premultiplied pixmap for drawing
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub rgba: RgbaImage,
    pub pixmap: Pixmap,
}

impl SourceImage {
    /// Create a SourceImage from decoded RGBA pixels
    pub fn new(rgba: RgbaImage) -> Result<Self, RenderError> {
        let pixmap = pixmap_from_rgba(&rgba).ok_or(RenderError::EmptyImage)?;
        log::debug!(
            "SourceImage loaded: {}x{} pixels",
            rgba.width(),
            rgba.height()
        );
        Ok(Self { rgba, pixmap })
    }

    /// Decode an image file from disk
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?
            .to_rgba8();
        Ok(Self::new(rgba)?)
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn size(&self) -> Size {
        Size::from_pixels(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image_is_rejected() {
        let result = SourceImage::new(RgbaImage::new(0, 10));
        assert!(matches!(result, Err(RenderError::EmptyImage)));
    }

    #[test]
    fn test_open_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let image = SourceImage::open(&path).unwrap();
        assert_eq!(image.size(), Size::new(4.0, 3.0));
        assert_eq!(image.pixmap.width(), 4);
        assert_eq!(image.rgba.get_pixel(2, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SourceImage::open(dir.path().join("missing.png")).is_err());
    }
}
