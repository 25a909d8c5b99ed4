//! Fixed-width bar plots growing up from the bottom edge.

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::geometry::{PixelRect, Size, ceil_px};
use crate::raster::{Raster, Surface};
use crate::style::{BarPlotStyle, Rgba};

/// Pixel span of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BarGeometry {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Fill rectangle, widened by one pixel on the right and bottom edges.
    pub fn fill_rect(&self) -> PixelRect {
        PixelRect::new(
            self.left.round() as i32,
            self.top.round() as i32,
            self.right.round() as i32 + 1,
            self.bottom.round() as i32 + 1,
        )
    }
}

/// Pixel geometry of a bar plot, bars in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub size: Size,
    pub bars: Vec<BarGeometry>,
}

impl BarLayout {
    pub fn compute(values: &[f64], style: &BarPlotStyle) -> Result<Self> {
        validate_style(style)?;
        if values.is_empty() {
            return Err(GraphError::invalid("a bar plot needs at least one value"));
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(GraphError::invalid(format!(
                "bar magnitude {v} must be finite and non-negative"
            )));
        }
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let cell = 2.0 * style.bar_padding + style.bar_width;
        let width = ceil_px(cell * values.len() as f64)?;
        let height = ceil_px(style.scale * max + style.padding_top)?;

        let bottom = f64::from(height);
        let bars = values
            .iter()
            .enumerate()
            .map(|(n, v)| {
                let left = n as f64 * cell + style.bar_padding;
                BarGeometry {
                    left,
                    right: left + style.bar_width,
                    top: bottom - v * style.scale,
                    bottom,
                }
            })
            .collect();
        Ok(Self {
            size: Size::new(width, height),
            bars,
        })
    }
}

fn validate_style(style: &BarPlotStyle) -> Result<()> {
    if !style.scale.is_finite() || style.scale <= 0.0 {
        return Err(GraphError::invalid(format!(
            "bar scale must be positive, got {}",
            style.scale
        )));
    }
    if !style.bar_width.is_finite() || style.bar_width <= 0.0 {
        return Err(GraphError::invalid("bar width must be positive"));
    }
    if [style.bar_padding, style.padding_top]
        .iter()
        .any(|v| !v.is_finite() || *v < 0.0)
    {
        return Err(GraphError::invalid("bar padding must be non-negative"));
    }
    Ok(())
}

/// Fill each bar of visible height, in order, on a transparent surface one
/// pixel larger than the layout.
pub fn render_bars<R: Raster + ?Sized>(
    raster: &R,
    layout: &BarLayout,
    style: &BarPlotStyle,
) -> Result<Surface> {
    let size = layout.size.grown(1)?;
    let mut surface = raster.create_surface(size.width, size.height, Rgba::TRANSPARENT)?;
    for bar in layout.bars.iter().filter(|b| b.height() > 0.0) {
        raster.draw_rectangle(&mut surface, bar.fill_rect(), style.color)?;
    }
    Ok(surface)
}
