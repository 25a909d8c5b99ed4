//! Axis strips: tick generation, sizing and drawing.
//!
//! An [`Axis`] is built in one pass: [`AxisLayout::compute`] derives every
//! size and position from the tick set and measured text, then
//! [`render::render_axis`] draws the strip onto a fresh surface.
//!
//! ### Rotation convention
//! Tick label rotation is given in degrees **clockwise**. The raster layer
//! rotates counter-clockwise, so the layout works with the complement
//! `360 - rotation`. Without an explicit rotation, `x` tick labels are turned
//! a quarter counter-clockwise (reading bottom to top) and `y` labels stay
//! upright.

pub mod layout;
pub mod render;
pub mod ticks;

pub use layout::{AxisLayout, LabelPlacement, TickPlacement};
pub use ticks::TickSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::geometry::Size;
use crate::raster::{Raster, Surface};
use crate::style::AxisStyle;

/// Which edge of the plot area an axis runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Horizontal, below the plots.
    X,
    /// Vertical, left of the plots.
    Y,
}

/// Per-axis settings besides the ticks themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub orientation: Orientation,
    /// Axis title; empty for none.
    #[serde(default)]
    pub label: String,
    /// Clockwise tick label rotation in degrees.
    #[serde(default)]
    pub rotation: Option<f64>,
    pub style: AxisStyle,
}

impl AxisConfig {
    pub fn new(orientation: Orientation, style: AxisStyle) -> Self {
        Self {
            orientation,
            label: String::new(),
            rotation: None,
            style,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Counter-clockwise angle handed to the raster for tick labels.
    pub(crate) fn raster_angle(&self) -> f64 {
        match (self.rotation, self.orientation) {
            (Some(degrees), _) => 360.0 - degrees,
            (None, Orientation::X) => 90.0,
            (None, Orientation::Y) => 0.0,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(r) = self.rotation
            && !r.is_finite()
        {
            return Err(GraphError::invalid(format!("rotation must be finite, got {r}")));
        }
        let size = self.style.font.size;
        if size.is_nan() || size <= 0.0 {
            return Err(GraphError::invalid("tick font size must be positive"));
        }
        Ok(())
    }
}

/// A fully laid out and rendered axis strip.
#[derive(Debug, Clone)]
pub struct Axis {
    ticks: TickSet,
    config: AxisConfig,
    layout: AxisLayout,
    surface: Surface,
}

impl Axis {
    /// Lay out and draw an axis for an explicit tick set.
    pub fn new<R: Raster + ?Sized>(raster: &R, ticks: TickSet, config: AxisConfig) -> Result<Self> {
        config.validate()?;
        let layout = AxisLayout::compute(raster, &ticks, &config)?;
        let surface = render::render_axis(raster, &layout, &config)?;
        debug!(
            "{:?} axis: {} ticks, {}x{} px",
            config.orientation,
            ticks.len(),
            layout.size.width,
            layout.size.height
        );
        Ok(Self {
            ticks,
            config,
            layout,
            surface,
        })
    }

    /// Numeric axis: see [`TickSet::numeric`].
    pub fn numeric<R: Raster + ?Sized>(
        raster: &R,
        values: &[f64],
        scale: f64,
        config: AxisConfig,
    ) -> Result<Self> {
        Self::new(raster, TickSet::numeric(values, scale)?, config)
    }

    /// Linear range axis: see [`TickSet::range`].
    pub fn range<R: Raster + ?Sized>(
        raster: &R,
        end: i64,
        start: i64,
        step: i64,
        gap: i64,
        config: AxisConfig,
    ) -> Result<Self> {
        Self::new(raster, TickSet::range(end, start, step, gap)?, config)
    }

    /// Evenly spaced text labels: see [`TickSet::text`].
    pub fn text<R: Raster + ?Sized, S: AsRef<str>>(
        raster: &R,
        labels: &[S],
        gap: u32,
        centered: bool,
        config: AxisConfig,
    ) -> Result<Self> {
        Self::new(raster, TickSet::text(labels, gap, centered)?, config)
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn ticks(&self) -> &TickSet {
        &self.ticks
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// The clockwise rotation the caller asked for, if any.
    pub fn rotation(&self) -> Option<f64> {
        self.config.rotation
    }

    pub fn layout(&self) -> &AxisLayout {
        &self.layout
    }

    /// Logical size of the strip; the surface is one pixel larger each way.
    pub fn size(&self) -> Size {
        self.layout.size
    }

    pub fn width(&self) -> u32 {
        self.layout.size.width
    }

    pub fn height(&self) -> u32 {
        self.layout.size.height
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontSpec;

    fn style() -> AxisStyle {
        AxisStyle::new(FontSpec::new("draft", 10.0))
    }

    #[test]
    fn rotation_complement_and_defaults() {
        let x = AxisConfig::new(Orientation::X, style());
        assert_eq!(x.raster_angle(), 90.0);
        let y = AxisConfig::new(Orientation::Y, style());
        assert_eq!(y.raster_angle(), 0.0);
        let tilted = AxisConfig::new(Orientation::X, style()).with_rotation(45.0);
        assert_eq!(tilted.raster_angle(), 315.0);
        assert_eq!(tilted.rotation, Some(45.0));
    }

    #[test]
    fn non_finite_rotation_is_rejected() {
        let c = AxisConfig::new(Orientation::X, style()).with_rotation(f64::NAN);
        assert!(c.validate().is_err());
    }
}
