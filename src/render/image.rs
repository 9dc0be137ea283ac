//! CPU surfaces for the magnifier using tiny-skia
//!
//! [`PixmapRenderer`] keeps two equally sized pixmaps. The selection
//! indicator is an overlay: it is only painted by [`PixmapRenderer::composite`]
//! and never lands in the primary surface, so cropping reads clean pixels.

use image::RgbaImage;
use tiny_skia::{
    BlendMode, Color, ColorU8, FillRule, FilterQuality, IntRect, Mask, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

use super::geometry::ContainResult;
use super::surface::{RenderError, Renderer, SurfaceId};
use crate::capture::image::SourceImage;
use crate::domain::{Rect, Size};

/// Convert straight-alpha RGBA pixels into a premultiplied pixmap
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Convert a premultiplied pixmap back into straight-alpha RGBA pixels
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Snap a rectangle outward to whole pixels and clip it to `bounds`
fn snap_to_pixels(rect: Rect, bounds: Size) -> Option<IntRect> {
    let clipped = rect.intersect(Rect::from_size(bounds))?;
    let left = clipped.top_left().x.floor() as i32;
    let top = clipped.top_left().y.floor() as i32;
    let right = clipped.bottom_right().x.ceil() as i32;
    let bottom = clipped.bottom_right().y.ceil() as i32;
    IntRect::from_ltrb(left, top, right, bottom)
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(
        rect.top_left().x as f32,
        rect.top_left().y as f32,
        rect.bottom_right().x as f32,
        rect.bottom_right().y as f32,
    )
}

/// Appearance of the selection indicator
#[derive(Debug, Clone, Copy)]
pub struct IndicatorStyle {
    pub color: [u8; 4],
    pub thickness: f32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        // turquoise blue
        Self {
            color: [0, 199, 140, 255],
            thickness: 2.0,
        }
    }
}

/// Renderer backed by two tiny-skia pixmaps
pub struct PixmapRenderer {
    primary: Pixmap,
    staging: Pixmap,
    indicator: Option<Rect>,
    style: IndicatorStyle,
    quality: FilterQuality,
}

impl PixmapRenderer {
    /// Allocate primary and staging surfaces of the same size
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let alloc = || Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height });
        Ok(Self {
            primary: alloc()?,
            staging: alloc()?,
            indicator: None,
            style: IndicatorStyle::default(),
            quality: FilterQuality::Bilinear,
        })
    }

    pub fn with_indicator_style(mut self, style: IndicatorStyle) -> Self {
        self.style = style;
        self
    }

    /// Use bilinear filtering when scaling, or nearest-neighbour when false
    pub fn with_smooth_scaling(mut self, smooth: bool) -> Self {
        self.quality = if smooth {
            FilterQuality::Bilinear
        } else {
            FilterQuality::Nearest
        };
        self
    }

    pub fn pixmap(&self, surface: SurfaceId) -> &Pixmap {
        match surface {
            SurfaceId::Primary => &self.primary,
            SurfaceId::Staging => &self.staging,
        }
    }

    fn pixmap_mut(&mut self, surface: SurfaceId) -> &mut Pixmap {
        match surface {
            SurfaceId::Primary => &mut self.primary,
            SurfaceId::Staging => &mut self.staging,
        }
    }

    fn pixmap_paint(&self) -> PixmapPaint {
        PixmapPaint {
            quality: self.quality,
            ..PixmapPaint::default()
        }
    }

    /// Export a surface as straight-alpha RGBA
    pub fn snapshot(&self, surface: SurfaceId) -> RgbaImage {
        rgba_from_pixmap(self.pixmap(surface))
    }

    /// Primary surface with the indicator outline painted on top
    pub fn composite(&self) -> Pixmap {
        let mut frame = self.primary.clone();
        let Some(rect) = self.indicator.and_then(skia_rect) else {
            return frame;
        };

        let path = PathBuilder::from_rect(rect);
        let [r, g, b, a] = self.style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: self.style.thickness,
            ..Default::default()
        };
        frame.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        frame
    }
}

impl Renderer for PixmapRenderer {
    fn set_indicator(&mut self, rect: Rect) {
        self.indicator = Some(rect);
    }

    fn hide_indicator(&mut self) {
        self.indicator = None;
    }

    fn indicator(&self) -> Option<Rect> {
        self.indicator
    }

    fn surface_size(&self, surface: SurfaceId) -> Size {
        let pixmap = self.pixmap(surface);
        Size::from_pixels(pixmap.width(), pixmap.height())
    }

    fn clear(&mut self, surface: SurfaceId, rect: Option<Rect>) {
        let pixmap = self.pixmap_mut(surface);
        let Some(rect) = rect else {
            pixmap.fill(Color::TRANSPARENT);
            return;
        };
        let Some(rect) = skia_rect(rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn draw_image_contained(
        &mut self,
        surface: SurfaceId,
        image: &SourceImage,
        placement: ContainResult,
    ) -> Result<(), RenderError> {
        let scale_x = placement.width / image.width() as f64;
        let scale_y = placement.height / image.height() as f64;
        let transform = Transform::from_row(
            scale_x as f32,
            0.0,
            0.0,
            scale_y as f32,
            placement.dx as f32,
            placement.dy as f32,
        );
        let paint = self.pixmap_paint();
        self.pixmap_mut(surface)
            .draw_pixmap(0, 0, image.pixmap.as_ref(), &paint, transform, None);
        Ok(())
    }

    fn copy_region(
        &mut self,
        src: SurfaceId,
        src_rect: Rect,
        dst: SurfaceId,
        dst_rect: Rect,
    ) -> Result<(), RenderError> {
        if src_rect.is_degenerate() {
            return Err(RenderError::EmptyRegion(src_rect, src));
        }
        let region = snap_to_pixels(src_rect, self.surface_size(src))
            .ok_or(RenderError::EmptyRegion(src_rect, src))?;
        // clone_rect copies, so reading and writing the same surface is safe
        let patch = self
            .pixmap(src)
            .clone_rect(region)
            .ok_or(RenderError::EmptyRegion(src_rect, src))?;

        // Map src_rect itself onto dst_rect. The patch is only the whole
        // pixels around it, so its extra border lands outside dst_rect and
        // is masked off.
        let scale_x = dst_rect.width() / src_rect.width();
        let scale_y = dst_rect.height() / src_rect.height();
        let offset_x = region.x() as f64 - src_rect.top_left().x;
        let offset_y = region.y() as f64 - src_rect.top_left().y;
        let transform = Transform::from_row(
            scale_x as f32,
            0.0,
            0.0,
            scale_y as f32,
            (dst_rect.top_left().x + offset_x * scale_x) as f32,
            (dst_rect.top_left().y + offset_y * scale_y) as f32,
        );
        log::trace!(
            "copy {:?} {:?} -> {:?} {:?}",
            src,
            src_rect,
            dst,
            dst_rect
        );

        let paint = self.pixmap_paint();
        let target = self.pixmap_mut(dst);
        let Some(clip) = dst_mask(dst_rect, target.width(), target.height()) else {
            return Ok(());
        };
        target.draw_pixmap(0, 0, patch.as_ref(), &paint, transform, Some(&clip));
        Ok(())
    }
}

/// Mask that only lets drawing through inside `rect`
fn dst_mask(rect: Rect, width: u32, height: u32) -> Option<Mask> {
    let path = PathBuilder::from_rect(skia_rect(rect)?);
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::geometry::compute_contain;

    const RED: [u8; 4] = [255, 0, 0, 255];

    fn solid(width: u32, height: u32, color: [u8; 4]) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(width, height, image::Rgba(color))).unwrap()
    }

    #[test]
    fn test_rgba_pixmap_conversion_keeps_opaque_pixels() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([12, 34, 56, 255]));
        let pixmap = pixmap_from_rgba(&img).unwrap();
        assert_eq!(rgba_from_pixmap(&pixmap), img);
    }

    #[test]
    fn test_snap_to_pixels_rounds_outward_and_clips() {
        let bounds = Size::new(10.0, 10.0);
        let snapped = snap_to_pixels(Rect::from_xywh(1.5, 2.2, 3.0, 3.0), bounds).unwrap();
        assert_eq!(
            (snapped.x(), snapped.y(), snapped.width(), snapped.height()),
            (1, 2, 4, 4)
        );

        let clipped = snap_to_pixels(Rect::from_xywh(8.0, 8.0, 5.0, 5.0), bounds).unwrap();
        assert_eq!((clipped.width(), clipped.height()), (2, 2));

        assert!(snap_to_pixels(Rect::from_xywh(20.0, 20.0, 5.0, 5.0), bounds).is_none());
    }

    #[test]
    fn test_draw_image_contained_letterboxes() {
        let mut renderer = PixmapRenderer::new(200, 100).unwrap().with_smooth_scaling(false);
        let image = solid(10, 10, RED);
        let placement = compute_contain(
            renderer.surface_size(SurfaceId::Primary),
            image.size(),
        )
        .unwrap();
        renderer
            .draw_image_contained(SurfaceId::Primary, &image, placement)
            .unwrap();

        let out = renderer.snapshot(SurfaceId::Primary);
        assert_eq!(out.get_pixel(100, 50).0, RED);
        assert_eq!(out.get_pixel(10, 50).0[3], 0);
        assert_eq!(out.get_pixel(190, 50).0[3], 0);
    }

    #[test]
    fn test_clear_region_and_whole_surface() {
        let mut renderer = PixmapRenderer::new(20, 20).unwrap();
        renderer.primary.fill(Color::from_rgba8(0, 0, 255, 255));

        renderer.clear(SurfaceId::Primary, Some(Rect::from_xywh(0.0, 0.0, 10.0, 20.0)));
        let out = renderer.snapshot(SurfaceId::Primary);
        assert_eq!(out.get_pixel(5, 5).0[3], 0);
        assert_eq!(out.get_pixel(15, 5).0, [0, 0, 255, 255]);

        renderer.clear(SurfaceId::Primary, None);
        let out = renderer.snapshot(SurfaceId::Primary);
        assert!(out.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_copy_region_scales_into_destination() {
        let mut renderer = PixmapRenderer::new(40, 40).unwrap().with_smooth_scaling(false);
        renderer
            .primary
            .fill_rect(
                tiny_skia::Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap(),
                &{
                    let mut paint = Paint::default();
                    paint.set_color_rgba8(255, 0, 0, 255);
                    paint
                },
                Transform::identity(),
                None,
            );

        renderer
            .copy_region(
                SurfaceId::Primary,
                Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
                SurfaceId::Staging,
                Rect::from_xywh(0.0, 0.0, 40.0, 40.0),
            )
            .unwrap();

        let out = renderer.snapshot(SurfaceId::Staging);
        assert_eq!(out.get_pixel(5, 5).0, RED);
        assert_eq!(out.get_pixel(35, 35).0, RED);
    }

    #[test]
    fn test_copy_region_maps_fractional_source_exactly() {
        let mut renderer = PixmapRenderer::new(100, 100).unwrap().with_smooth_scaling(false);
        renderer.primary.fill(Color::from_rgba8(0, 0, 255, 255));
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 0, 0, 255);
        renderer.primary.fill_rect(
            tiny_skia::Rect::from_xywh(0.0, 0.0, 10.0, 100.0).unwrap(),
            &paint,
            Transform::identity(),
            None,
        );

        // 2 red columns and half a blue one, scaled by 40
        renderer
            .copy_region(
                SurfaceId::Primary,
                Rect::from_xywh(8.0, 0.0, 2.5, 2.5),
                SurfaceId::Staging,
                Rect::from_xywh(0.0, 0.0, 100.0, 100.0),
            )
            .unwrap();

        let out = renderer.snapshot(SurfaceId::Staging);
        let row: Vec<[u8; 4]> = (0..100).map(|x| out.get_pixel(x, 50).0).collect();
        assert_eq!(row.iter().filter(|&&p| p == RED).count(), 80);
        assert_eq!(row.iter().filter(|&&p| p == [0, 0, 255, 255]).count(), 20);
        assert_eq!(row[79], RED);
        assert_eq!(row[80], [0, 0, 255, 255]);
    }

    #[test]
    fn test_copy_region_stays_inside_destination() {
        let mut renderer = PixmapRenderer::new(40, 40).unwrap().with_smooth_scaling(false);
        renderer.primary.fill(Color::from_rgba8(255, 0, 0, 255));

        // source starts mid-pixel, so the patch read around it is wider
        renderer
            .copy_region(
                SurfaceId::Primary,
                Rect::from_xywh(2.5, 2.5, 5.0, 5.0),
                SurfaceId::Staging,
                Rect::from_xywh(10.0, 10.0, 20.0, 20.0),
            )
            .unwrap();

        let out = renderer.snapshot(SurfaceId::Staging);
        for (x, y, pixel) in out.enumerate_pixels() {
            let inside = (10..30).contains(&x) && (10..30).contains(&y);
            if inside {
                assert_eq!(pixel.0, RED, "({x}, {y})");
            } else {
                assert_eq!(pixel.0[3], 0, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_copy_region_outside_surface_fails() {
        let mut renderer = PixmapRenderer::new(10, 10).unwrap();
        let result = renderer.copy_region(
            SurfaceId::Primary,
            Rect::from_xywh(50.0, 50.0, 5.0, 5.0),
            SurfaceId::Staging,
            Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
        );
        assert!(matches!(
            result,
            Err(RenderError::EmptyRegion(_, SurfaceId::Primary))
        ));
    }

    #[test]
    fn test_indicator_only_in_composite() {
        let mut renderer = PixmapRenderer::new(30, 30).unwrap();
        renderer.set_indicator(Rect::from_xywh(5.0, 5.0, 20.0, 20.0));
        assert!(renderer.indicator().is_some());

        let frame = rgba_from_pixmap(&renderer.composite());
        assert!(frame.get_pixel(5, 15).0[3] > 0);
        assert!(renderer
            .snapshot(SurfaceId::Primary)
            .pixels()
            .all(|p| p.0[3] == 0));

        renderer.hide_indicator();
        let frame = rgba_from_pixmap(&renderer.composite());
        assert!(frame.pixels().all(|p| p.0[3] == 0));
    }
}
