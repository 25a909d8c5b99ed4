//! Owned RGBA pixel buffers with blending, pasting and rotation.

use image::{DynamicImage, ImageFormat, Pixel as _, Rgba as Pixel, RgbaImage, imageops};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, Size, deg_to_rad, rotated_bounding_box};
use crate::style::Rgba;

/// Surfaces larger than this many bytes are refused instead of aborting.
const MAX_SURFACE_BYTES: u64 = 1 << 31;

/// How a source layer is combined with the pixels beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteMode {
    /// Blend through the source's own alpha channel.
    #[default]
    AlphaMask,
    /// Replace destination pixels, transparency included.
    Opaque,
}

/// A rendered RGBA layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Allocate a `width x height` surface filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Result<Self> {
        let bytes = u64::from(width) * u64::from(height) * 4;
        if bytes > MAX_SURFACE_BYTES {
            return Err(GraphError::Allocation { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Pixel(fill.to_array())),
        })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode to `path`; the format follows the extension when not given.
    /// Formats without an alpha channel get the color channels only.
    pub fn save(&self, path: &Path, format: Option<ImageFormat>) -> Result<()> {
        let format = match format {
            Some(format) => format,
            None => ImageFormat::from_path(path)?,
        };
        if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgba8(self.image.clone())
                .to_rgb8()
                .save_with_format(path, format)?;
        } else {
            self.image.save_with_format(path, format)?;
        }
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Source-over blend of `color` scaled by `coverage`; off-surface writes are clipped.
    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f64) {
        if let Some((x, y)) = self.index(x, y) {
            let alpha = (f64::from(color.a) * coverage.clamp(0.0, 1.0)).round() as u8;
            let src = Pixel([color.r, color.g, color.b, alpha]);
            self.image.get_pixel_mut(x, y).blend(&src);
        }
    }

    /// Paste `src` with its top-left corner at `position`; the part outside
    /// this surface is cropped.
    pub fn paste(&mut self, src: &Surface, position: PixelPoint, mode: PasteMode) {
        let (x, y) = (i64::from(position.0), i64::from(position.1));
        match mode {
            PasteMode::AlphaMask => imageops::overlay(&mut self.image, &src.image, x, y),
            PasteMode::Opaque => imageops::replace(&mut self.image, &src.image, x, y),
        }
    }

    /// Rotate counter-clockwise by `angle` degrees, growing the surface to
    /// hold the whole result. Uncovered corners take `fill`.
    pub fn rotated(&self, angle: f64, fill: Rgba) -> Result<Surface> {
        let turn = angle.rem_euclid(360.0);
        if turn == 0.0 {
            return Ok(self.clone());
        }
        if turn == 90.0 {
            return Ok(Surface::from_image(imageops::rotate270(&self.image)));
        }
        if turn == 180.0 {
            return Ok(Surface::from_image(imageops::rotate180(&self.image)));
        }
        if turn == 270.0 {
            return Ok(Surface::from_image(imageops::rotate90(&self.image)));
        }

        let out = rotated_bounding_box(self.width(), self.height(), turn)?;
        let mut rotated = Surface::new(out.width, out.height, fill)?;
        let (sin, cos) = deg_to_rad(turn).sin_cos();
        let (src_cx, src_cy) = (self.width() as f64 / 2.0, self.height() as f64 / 2.0);
        let (dst_cx, dst_cy) = (out.width as f64 / 2.0, out.height as f64 / 2.0);
        let (w, h) = (self.width() as f64, self.height() as f64);

        for (x, y, p) in rotated.image.enumerate_pixels_mut() {
            let dx = x as f64 + 0.5 - dst_cx;
            let dy = y as f64 + 0.5 - dst_cy;
            // inverse of a counter-clockwise turn in y-down coordinates
            let sx = dx * cos - dy * sin + src_cx;
            let sy = dx * sin + dy * cos + src_cy;
            if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                *p = *self.image.get_pixel(sx as u32, sy as u32);
            }
        }
        Ok(rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    #[test]
    fn new_surface_is_filled() {
        let s = Surface::new(3, 2, RED).unwrap();
        assert_eq!(s.size(), Size::new(3, 2));
        assert_eq!(s.pixel(2, 1), Some(RED));
        assert_eq!(s.pixel(3, 0), None);
    }

    #[test]
    fn oversized_surface_is_refused() {
        let e = Surface::new(100_000, 100_000, Rgba::TRANSPARENT);
        assert!(matches!(e, Err(GraphError::Allocation { .. })));
    }

    fn close(a: Option<Rgba>, b: Rgba) -> bool {
        let a = a.map(Rgba::to_array).unwrap_or_default();
        a.iter()
            .zip(b.to_array())
            .all(|(x, y)| x.abs_diff(y) <= 1)
    }

    #[test]
    fn blend_pixel_coverage() {
        let bg = Rgba::rgb(10, 20, 30);
        let mut s = Surface::new(4, 1, bg).unwrap();
        s.blend_pixel(0, 0, Rgba::TRANSPARENT, 1.0);
        assert_eq!(s.pixel(0, 0), Some(bg));
        s.blend_pixel(1, 0, Rgba::rgb(1, 2, 3), 1.0);
        assert_eq!(s.pixel(1, 0), Some(Rgba::rgb(1, 2, 3)));
        s.blend_pixel(2, 0, RED, 0.0);
        assert_eq!(s.pixel(2, 0), Some(bg));

        // half-covered white over black
        let mut s = Surface::new(1, 1, Rgba::BLACK).unwrap();
        s.blend_pixel(0, 0, Rgba::WHITE, 0.5);
        assert!(close(s.pixel(0, 0), Rgba::rgb(128, 128, 128)));

        // onto a transparent pixel the color is kept and only alpha drops
        let mut s = Surface::new(1, 1, Rgba::TRANSPARENT).unwrap();
        s.blend_pixel(0, 0, Rgba::rgb(200, 100, 50), 0.5);
        assert!(close(s.pixel(0, 0), Rgba::new(200, 100, 50, 128)));

        // off-surface writes are dropped
        s.blend_pixel(-1, 0, RED, 1.0);
        s.blend_pixel(0, 1, RED, 1.0);
        assert!(close(s.pixel(0, 0), Rgba::new(200, 100, 50, 128)));
    }

    #[test]
    fn alpha_mask_paste_blends_translucent_layers() {
        let mut dst = Surface::new(3, 1, Rgba::BLACK).unwrap();
        let src = Surface::new(2, 1, Rgba::new(255, 255, 255, 128)).unwrap();
        dst.paste(&src, (1, 0), PasteMode::AlphaMask);
        assert_eq!(dst.pixel(0, 0), Some(Rgba::BLACK));
        assert!(close(dst.pixel(1, 0), Rgba::rgb(128, 128, 128)));
        assert!(close(dst.pixel(2, 0), Rgba::rgb(128, 128, 128)));

        dst.paste(&src, (-1, 0), PasteMode::Opaque);
        assert_eq!(dst.pixel(0, 0), Some(Rgba::new(255, 255, 255, 128)));
    }

    #[test]
    fn paste_respects_mode_and_clips() {
        let mut dst = Surface::new(4, 4, Rgba::WHITE).unwrap();
        let mut src = Surface::new(2, 2, Rgba::TRANSPARENT).unwrap();
        src.blend_pixel(0, 0, RED, 1.0);

        dst.paste(&src, (3, 3), PasteMode::AlphaMask);
        assert_eq!(dst.pixel(3, 3), Some(RED));

        dst.paste(&src, (0, 0), PasteMode::AlphaMask);
        assert_eq!(dst.pixel(1, 1), Some(Rgba::WHITE));

        dst.paste(&src, (0, 0), PasteMode::Opaque);
        assert_eq!(dst.pixel(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(dst.pixel(0, 0), Some(RED));
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        // 3x1 strip with a red pixel on the right end
        let mut s = Surface::new(3, 1, Rgba::TRANSPARENT).unwrap();
        s.blend_pixel(2, 0, RED, 1.0);
        let r = s.rotated(90.0, Rgba::TRANSPARENT).unwrap();
        assert_eq!(r.size(), Size::new(1, 3));
        // right end moves to the top
        assert_eq!(r.pixel(0, 0), Some(RED));
        assert_eq!(s.rotated(-270.0, Rgba::TRANSPARENT).unwrap(), r);
    }

    #[test]
    fn free_rotation_expands_to_bounding_box() {
        let s = Surface::new(40, 10, RED).unwrap();
        let r = s.rotated(45.0, Rgba::TRANSPARENT).unwrap();
        assert_eq!(r.size(), rotated_bounding_box(40, 10, 45.0).unwrap());
        let c = r.size();
        assert_eq!(r.pixel(c.width / 2, c.height / 2), Some(RED));
        assert_eq!(r.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn save_infers_format_and_flattens_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let s = Surface::new(4, 4, Rgba::new(0, 0, 255, 128)).unwrap();
        let jpg = dir.path().join("half.jpg");
        s.save(&jpg, None).unwrap();
        assert_eq!(&std::fs::read(&jpg).unwrap()[..2], &[0xFF, 0xD8]);

        let unknown = dir.path().join("half.nope");
        assert!(matches!(s.save(&unknown, None), Err(GraphError::Image(_))));
    }
}
