//! Plots: sized, rendered rectangles that share the composer's coordinate space.

pub mod bar;
pub mod line;

pub use bar::{BarGeometry, BarLayout};
pub use line::LineLayout;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Size;
use crate::raster::{Raster, Surface};
use crate::style::{BarPlotStyle, LinePlotStyle};

/// What produced a plot's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Line,
    Bar,
    /// A caller-rendered surface.
    Custom,
}

/// A rendered plot layer and its logical size.
#[derive(Debug, Clone)]
pub struct Plot {
    kind: PlotKind,
    size: Size,
    surface: Surface,
}

impl Plot {
    /// Line plot through `(x, y)` data points.
    pub fn line<R: Raster + ?Sized>(
        raster: &R,
        points: &[(f64, f64)],
        style: &LinePlotStyle,
    ) -> Result<Self> {
        let layout = LineLayout::compute(points, style)?;
        let surface = line::render_line(raster, &layout, style)?;
        debug!(
            "line plot: {} points, {}x{} px",
            layout.points.len(),
            layout.size.width,
            layout.size.height
        );
        Ok(Self {
            kind: PlotKind::Line,
            size: layout.size,
            surface,
        })
    }

    /// Bar plot with one bar per value, left to right.
    pub fn bar<R: Raster + ?Sized>(
        raster: &R,
        values: &[f64],
        style: &BarPlotStyle,
    ) -> Result<Self> {
        let layout = BarLayout::compute(values, style)?;
        let surface = bar::render_bars(raster, &layout, style)?;
        debug!(
            "bar plot: {} bars, {}x{} px",
            layout.bars.len(),
            layout.size.width,
            layout.size.height
        );
        Ok(Self {
            kind: PlotKind::Bar,
            size: layout.size,
            surface,
        })
    }

    /// Wrap an already rendered surface; its full size is the plot size.
    pub fn from_surface(surface: Surface) -> Self {
        Self {
            kind: PlotKind::Custom,
            size: surface.size(),
            surface,
        }
    }

    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}
