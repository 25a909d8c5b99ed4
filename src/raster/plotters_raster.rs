//! Production [`Raster`] built on plotters elements.

use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::convert::Infallible;

use super::backend::{SurfaceBackend, plotters_color};
use super::text::estimate_text_size;
use super::{Raster, Surface, TextMetrics};
use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, PixelRect, Size};
use crate::style::{FontSpec, Rgba};

/// Vertices used to approximate a non-circular ellipse.
const ELLIPSE_SEGMENTS: usize = 48;

/// Where glyphs and text metrics come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Fonts registered through [`crate::raster::fonts`].
    #[default]
    Glyphs,
    /// Estimated metrics, text drawn as solid blocks. Needs no font data.
    Draft,
}

/// Draws shapes through plotters onto RGBA surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRaster {
    text: TextMode,
}

impl PlottersRaster {
    /// Raster rendering real glyphs from registered fonts.
    pub fn new() -> Self {
        Self {
            text: TextMode::Glyphs,
        }
    }

    /// Raster using estimated text metrics and block glyphs.
    pub fn draft() -> Self {
        Self {
            text: TextMode::Draft,
        }
    }

    pub fn text_mode(&self) -> TextMode {
        self.text
    }
}

fn font_desc(font: &FontSpec) -> FontDesc<'_> {
    FontDesc::new(FontFamily::Name(&font.family), font.size, FontStyle::Normal)
}

fn draw_element<F>(surface: &mut Surface, draw: F) -> Result<()>
where
    F: FnOnce(
        &DrawingArea<SurfaceBackend<'_>, Shift>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<Infallible>>,
{
    let area = SurfaceBackend::new(surface).into_drawing_area();
    draw(&area).map_err(|e| GraphError::Drawing(format!("{:?}", e)))
}

impl TextMetrics for PlottersRaster {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Result<Size> {
        match self.text {
            TextMode::Draft => Ok(estimate_text_size(text, font)),
            TextMode::Glyphs => {
                if text.is_empty() {
                    return Ok(Size::new(0, font.size.ceil() as u32));
                }
                let (w, h) = font_desc(font)
                    .box_size(text)
                    .map_err(|e| GraphError::Font(format!("{}: {:?}", font.family, e)))?;
                Ok(Size::new(w, h))
            }
        }
    }
}

impl Raster for PlottersRaster {
    fn draw_line(
        &self,
        surface: &mut Surface,
        points: &[PixelPoint],
        color: Rgba,
        width: u32,
    ) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let style = ShapeStyle {
            color: plotters_color(color),
            filled: false,
            stroke_width: width.max(1),
        };
        draw_element(surface, |area| {
            area.draw(&PathElement::new(points.to_vec(), style))
        })
    }

    fn draw_ellipse(&self, surface: &mut Surface, bbox: PixelRect, fill: Rgba) -> Result<()> {
        let style = plotters_color(fill).filled();
        let (rx, ry) = (bbox.width() / 2, bbox.height() / 2);
        let center = (bbox.left + rx, bbox.top + ry);
        if rx <= 0 && ry <= 0 {
            let pixel = PixelRect::new(center.0, center.1, center.0, center.1);
            return self.draw_rectangle(surface, pixel, fill);
        }
        if rx == ry {
            return draw_element(surface, |area| area.draw(&Circle::new(center, rx, style)));
        }
        let vertices: Vec<PixelPoint> = (0..ELLIPSE_SEGMENTS)
            .map(|i| {
                let t = i as f64 / ELLIPSE_SEGMENTS as f64 * std::f64::consts::TAU;
                (
                    center.0 + (f64::from(rx) * t.cos()).round() as i32,
                    center.1 + (f64::from(ry) * t.sin()).round() as i32,
                )
            })
            .collect();
        draw_element(surface, |area| area.draw(&Polygon::new(vertices, style)))
    }

    fn draw_rectangle(&self, surface: &mut Surface, bbox: PixelRect, fill: Rgba) -> Result<()> {
        let style = plotters_color(fill).filled();
        draw_element(surface, |area| {
            area.draw(&Rectangle::new(
                [(bbox.left, bbox.top), (bbox.right, bbox.bottom)],
                style,
            ))
        })
    }

    fn render_text(
        &self,
        surface: &mut Surface,
        position: PixelPoint,
        text: &str,
        font: &FontSpec,
        color: Rgba,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        match self.text {
            TextMode::Draft => {
                let size = estimate_text_size(text, font);
                if size.width == 0 || size.height == 0 {
                    return Ok(());
                }
                let bbox = PixelRect::new(
                    position.0,
                    position.1,
                    position.0 + size.width as i32 - 1,
                    position.1 + size.height as i32 - 1,
                );
                self.draw_rectangle(surface, bbox, color)
            }
            TextMode::Glyphs => {
                let rgba = plotters_color(color);
                let style = TextStyle::from(font_desc(font)).color(&rgba);
                draw_element(surface, |area| {
                    area.draw(&Text::new(text.to_string(), position, style))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_covers_its_vertices() {
        let raster = PlottersRaster::draft();
        let mut s = Surface::new(20, 20, Rgba::TRANSPARENT).unwrap();
        raster
            .draw_line(&mut s, &[(0, 0), (10, 0), (10, 10)], Rgba::BLACK, 1)
            .unwrap();
        assert_eq!(s.pixel(5, 0).map(|p| p.a > 0), Some(true));
        assert_eq!(s.pixel(10, 5).map(|p| p.a > 0), Some(true));
        assert_eq!(s.pixel(5, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn ellipse_fills_center_not_corners() {
        let raster = PlottersRaster::draft();
        let mut s = Surface::new(21, 11, Rgba::TRANSPARENT).unwrap();
        raster
            .draw_ellipse(&mut s, PixelRect::new(0, 0, 20, 10), Rgba::BLUE)
            .unwrap();
        assert_eq!(s.pixel(10, 5), Some(Rgba::BLUE));
        assert_eq!(s.pixel(0, 0), Some(Rgba::TRANSPARENT));

        let mut dot = Surface::new(9, 9, Rgba::TRANSPARENT).unwrap();
        raster
            .draw_ellipse(&mut dot, PixelRect::around((4, 4), 2), Rgba::BLUE)
            .unwrap();
        assert_eq!(dot.pixel(4, 4), Some(Rgba::BLUE));
        assert_eq!(dot.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn draft_text_is_a_solid_block() {
        let raster = PlottersRaster::draft();
        let font = FontSpec::new("none", 10.0);
        assert_eq!(raster.measure_text(&font, "ab").unwrap(), Size::new(12, 10));
        let mut s = Surface::new(20, 20, Rgba::TRANSPARENT).unwrap();
        raster
            .render_text(&mut s, (2, 3), "ab", &font, Rgba::WHITE)
            .unwrap();
        assert_eq!(s.pixel(2, 3), Some(Rgba::WHITE));
        assert_eq!(s.pixel(13, 12), Some(Rgba::WHITE));
        assert_eq!(s.pixel(14, 12), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(13, 13), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn unknown_font_is_a_font_error() {
        let raster = PlottersRaster::new();
        let font = FontSpec::new("graphing-test-missing-family", 12.0);
        let e = raster.measure_text(&font, "x");
        assert!(matches!(e, Err(GraphError::Font(_))));
    }
}
