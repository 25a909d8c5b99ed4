//! A plotters `DrawingBackend` writing straight into an RGBA [`Surface`].
//!
//! The bitmap backend shipped with plotters only targets RGB buffers, so
//! transparent layers get their own backend. Only `draw_pixel` is provided;
//! lines, circles, polygons and glyphs come from the plotters rasterizer.

use plotters::prelude::*;
use plotters_backend::{BackendColor, BackendCoord, DrawingBackend, DrawingErrorKind};
use std::convert::Infallible;

use super::surface::Surface;
use crate::style::Rgba;

pub struct SurfaceBackend<'a> {
    surface: &'a mut Surface,
}

impl<'a> SurfaceBackend<'a> {
    pub fn new(surface: &'a mut Surface) -> Self {
        Self { surface }
    }
}

impl DrawingBackend for SurfaceBackend<'_> {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let (r, g, b) = color.rgb;
        self.surface
            .blend_pixel(point.0, point.1, Rgba::rgb(r, g, b), color.alpha);
        Ok(())
    }
}

/// Convert to the plotters color type, alpha as a 0..1 fraction.
pub fn plotters_color(color: Rgba) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, f64::from(color.a) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_element_fills_inclusive_corners() {
        let mut surface = Surface::new(6, 6, Rgba::TRANSPARENT).unwrap();
        {
            let area = SurfaceBackend::new(&mut surface).into_drawing_area();
            let style = plotters_color(Rgba::BLUE).filled();
            area.draw(&Rectangle::new([(1, 1), (3, 4)], style)).unwrap();
        }
        assert_eq!(surface.pixel(1, 1), Some(Rgba::BLUE));
        assert_eq!(surface.pixel(3, 4), Some(Rgba::BLUE));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(5, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn draw_pixel_blends_by_backend_alpha() {
        let mut surface = Surface::new(2, 1, Rgba::BLACK).unwrap();
        let mut backend = SurfaceBackend::new(&mut surface);
        assert_eq!(backend.get_size(), (2, 1));
        let white = BackendColor {
            alpha: 0.5,
            rgb: (255, 255, 255),
        };
        backend.draw_pixel((0, 0), white).unwrap();
        backend.draw_pixel((5, 0), white).unwrap();
        let gray = surface.pixel(0, 0).unwrap();
        assert!(gray.r.abs_diff(128) <= 1 && gray.a == 255);
        assert_eq!(surface.pixel(1, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn color_conversion_scales_alpha() {
        let c = plotters_color(Rgba::new(1, 2, 3, 51));
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
        assert!((c.3 - 0.2).abs() < 1e-12);
    }
}
