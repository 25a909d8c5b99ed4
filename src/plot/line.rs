//! Line plots: data coordinates mapped to pixels, dots joined by a polyline.

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, PixelRect, Size, ceil_px};
use crate::raster::{Raster, Surface};
use crate::style::{LinePlotStyle, Rgba};

/// Pixel geometry of a line plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayout {
    pub size: Size,
    /// Data points in pixel space, ascending by data x.
    pub points: Vec<(f64, f64)>,
    /// Lower-left corner of the data extent, in data units.
    pub data_min: (f64, f64),
    /// Upper-right corner of the data extent, in data units.
    pub data_max: (f64, f64),
}

impl LineLayout {
    /// Map `(x, y)` data points to pixels. Points may come in any order, but
    /// every x must be unique.
    pub fn compute(points: &[(f64, f64)], style: &LinePlotStyle) -> Result<Self> {
        validate_style(style)?;
        if points.is_empty() {
            return Err(GraphError::invalid("a line plot needs at least one point"));
        }
        if let Some((x, y)) = points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(GraphError::invalid(format!(
                "line plot point ({x}, {y}) is not finite"
            )));
        }
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = sorted.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(GraphError::invalid(format!(
                "line plot has more than one point at x = {}",
                pair[0].0
            )));
        }

        let x_min = sorted[0].0;
        let x_max = sorted[sorted.len() - 1].0;
        let (y_min, y_max) = sorted
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });

        let pad = style.padding;
        let width = ceil_px((x_max - x_min) * style.x_scale + pad.left + pad.right)?;
        let height = ceil_px((y_max - y_min) * style.y_scale + pad.top + pad.bottom)?;

        let x_offset = pad.left - x_min * style.x_scale;
        let y_offset = pad.bottom - y_min * style.y_scale;
        let points = sorted
            .iter()
            .map(|&(x, y)| {
                (
                    x_offset + x * style.x_scale,
                    // data up is pixel up
                    f64::from(height) - (y_offset + y * style.y_scale),
                )
            })
            .collect();

        Ok(Self {
            size: Size::new(width, height),
            points,
            data_min: (x_min, y_min),
            data_max: (x_max, y_max),
        })
    }

    /// Points rounded to whole pixels.
    pub fn pixel_points(&self) -> Vec<PixelPoint> {
        self.points
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect()
    }
}

fn validate_style(style: &LinePlotStyle) -> Result<()> {
    for (name, scale) in [("x_scale", style.x_scale), ("y_scale", style.y_scale)] {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GraphError::invalid(format!(
                "{name} must be positive, got {scale}"
            )));
        }
    }
    let p = style.padding;
    if [p.left, p.right, p.top, p.bottom]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
    {
        return Err(GraphError::invalid("line plot padding must be non-negative"));
    }
    Ok(())
}

/// Draw a dot per point, then the connecting line, on a transparent surface
/// one pixel larger than the layout.
pub fn render_line<R: Raster + ?Sized>(
    raster: &R,
    layout: &LineLayout,
    style: &LinePlotStyle,
) -> Result<Surface> {
    let size = layout.size.grown(1)?;
    let mut surface = raster.create_surface(size.width, size.height, Rgba::TRANSPARENT)?;
    let points = layout.pixel_points();
    if style.dot_size > 0 {
        let radius = (style.dot_size / 2) as i32;
        for &p in &points {
            raster.draw_ellipse(&mut surface, PixelRect::around(p, radius), style.dot_color)?;
        }
    }
    if style.line_width > 0 {
        raster.draw_line(&mut surface, &points, style.line_color, style.line_width)?;
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Padding;

    fn flat_style() -> LinePlotStyle {
        LinePlotStyle {
            padding: Padding::ZERO,
            ..LinePlotStyle::default()
        }
    }

    #[test]
    fn peak_renders_above_endpoints() {
        let l = LineLayout::compute(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], &flat_style()).unwrap();
        assert_eq!(l.size, Size::new(40, 20));
        assert_eq!(l.points, vec![(0.0, 20.0), (20.0, 0.0), (40.0, 20.0)]);
        assert!(l.points[1].1 < l.points[0].1);
        assert!(l.points[1].1 < l.points[2].1);
    }

    #[test]
    fn padding_and_offsets_follow_data_minimum() {
        let style = LinePlotStyle {
            padding: Padding {
                left: 5.0,
                right: 7.0,
                top: 3.0,
                bottom: 2.0,
            },
            x_scale: 10.0,
            y_scale: 4.0,
            ..LinePlotStyle::default()
        };
        let l = LineLayout::compute(&[(3.0, -1.0), (1.0, 2.0)], &style).unwrap();
        // (3 - 1) * 10 + 12 and (2 - -1) * 4 + 5
        assert_eq!(l.size, Size::new(32, 17));
        // sorted by x: (1, 2) first
        assert_eq!(l.points[0], (5.0, 17.0 - (2.0 + 4.0 + 8.0)));
        assert_eq!(l.points[1], (25.0, 17.0 - 2.0));
        assert_eq!(l.data_min, (1.0, -1.0));
        assert_eq!(l.data_max, (3.0, 2.0));
    }

    #[test]
    fn fractional_extent_rounds_up() {
        let style = LinePlotStyle {
            x_scale: 3.3,
            ..flat_style()
        };
        let l = LineLayout::compute(&[(0.0, 0.0), (1.0, 0.0)], &style).unwrap();
        assert_eq!(l.size, Size::new(4, 0));
    }

    #[test]
    fn rejects_degenerate_input() {
        let style = flat_style();
        assert!(LineLayout::compute(&[], &style).is_err());
        assert!(LineLayout::compute(&[(1.0, 0.0), (1.0, 2.0)], &style).is_err());
        assert!(LineLayout::compute(&[(f64::NAN, 0.0)], &style).is_err());
        let bad = LinePlotStyle {
            y_scale: 0.0,
            ..flat_style()
        };
        assert!(LineLayout::compute(&[(0.0, 0.0)], &bad).is_err());
    }

    #[test]
    fn extent_beyond_a_surface_is_refused() {
        let style = LinePlotStyle {
            x_scale: 1e10,
            ..flat_style()
        };
        let e = LineLayout::compute(&[(0.0, 0.0), (1.0, 0.0)], &style);
        assert!(matches!(e, Err(GraphError::InvalidInput(_))));
    }
}
