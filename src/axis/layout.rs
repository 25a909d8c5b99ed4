//! Closed-form geometry of an axis strip.
//!
//! Depth (perpendicular to the run) is
//! `tick_padding + tick_length + thickest rotated tick label + label box`;
//! length is the largest tick offset. Every position below is derived from
//! those two numbers in a single pass.

use serde::Serialize;

use super::{AxisConfig, Orientation, TickSet};
use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, Size, rotated_bounding_box, to_offset};
use crate::raster::TextMetrics;

/// Where one tick mark and its label go on the strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickPlacement {
    pub offset: u32,
    pub text: String,
    /// Start and end of the tick mark.
    pub mark: [PixelPoint; 2],
    /// Top-left corner of the rotated label box.
    pub text_origin: PixelPoint,
    /// Label size after rotation.
    pub text_box: Size,
}

/// Where the axis title goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub origin: PixelPoint,
    /// Counter-clockwise rotation: 0 for `x`, 90 for `y`.
    pub angle: f64,
    pub text_box: Size,
}

/// Sizes and positions of everything drawn on an axis strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub orientation: Orientation,
    /// Logical strip size (`length x depth` for `x`, `depth x length` for `y`).
    pub size: Size,
    pub length: u32,
    pub depth: u32,
    /// Perpendicular extent of the thickest rotated tick label.
    pub tick_thickness: u32,
    /// Measured title size plus padding, zero without a title.
    pub label_box: Size,
    /// Counter-clockwise rotation of every tick label.
    pub tick_angle: f64,
    pub baseline: [PixelPoint; 2],
    pub ticks: Vec<TickPlacement>,
    pub label: Option<LabelPlacement>,
}

impl AxisLayout {
    pub fn compute<M: TextMetrics + ?Sized>(
        metrics: &M,
        ticks: &TickSet,
        config: &AxisConfig,
    ) -> Result<Self> {
        let style = &config.style;
        let orientation = config.orientation;
        let tick_angle = config.raster_angle();

        let title = if config.label.is_empty() {
            None
        } else {
            Some(metrics.measure_text(style.label_font(), &config.label)?)
        };
        let label_box = match title {
            Some(m) => m.grown(style.label_padding)?,
            None => Size::default(),
        };

        let mut measured = Vec::with_capacity(ticks.len());
        for (offset, text) in ticks.iter() {
            let m = metrics.measure_text(&style.font, text)?;
            measured.push((offset, text, rotated_bounding_box(m.width, m.height, tick_angle)?));
        }
        let tick_thickness = measured
            .iter()
            .map(|(_, _, b)| match orientation {
                Orientation::X => b.height,
                Orientation::Y => b.width,
            })
            .max()
            .unwrap_or(0);

        let length = ticks.max_offset();
        let depth = [style.tick_length, tick_thickness, label_box.height]
            .into_iter()
            .try_fold(style.tick_padding, u32::checked_add)
            .ok_or_else(|| GraphError::invalid("axis depth does not fit in a surface"))?;
        let size = match orientation {
            Orientation::X => Size::new(length, depth),
            Orientation::Y => Size::new(depth, length),
        };
        let (w, h) = (to_offset(size.width)?, to_offset(size.height)?);
        let tick_length = to_offset(style.tick_length)?;
        let tick_padding = to_offset(style.tick_padding)?;

        let baseline = match orientation {
            Orientation::X => [(0, 0), (w, 0)],
            Orientation::Y => [(w, 0), (w, h)],
        };

        let mut placements = Vec::with_capacity(measured.len());
        for (offset, text, text_box) in measured {
            let (bw, bh) = (to_offset(text_box.width)?, to_offset(text_box.height)?);
            let pos = to_offset(offset)?;
            let (mark, text_origin) = match orientation {
                Orientation::X => {
                    let x = (pos - bw / 2).max(0).min(w - bw);
                    ([(pos, 0), (pos, tick_length)], (x, tick_length + tick_padding))
                }
                Orientation::Y => {
                    // pixel rows grow downward, axis values upward
                    let row = h - pos;
                    let y = (row - bh / 2).max(0).min(h - bh);
                    let x = w - tick_length - tick_padding - bw;
                    ([(w - tick_length, row), (w, row)], (x, y))
                }
            };
            placements.push(TickPlacement {
                offset,
                text: text.to_string(),
                mark,
                text_origin,
                text_box,
            });
        }

        let label = match title {
            Some(m) => Some(match orientation {
                Orientation::X => LabelPlacement {
                    origin: ((w - to_offset(m.width)?).div_euclid(2), h - to_offset(m.height)?),
                    angle: 0.0,
                    text_box: m,
                },
                Orientation::Y => {
                    let text_box = m.swapped();
                    LabelPlacement {
                        origin: (0, (h - to_offset(text_box.height)?).div_euclid(2)),
                        angle: 90.0,
                        text_box,
                    }
                }
            }),
            None => None,
        };

        Ok(Self {
            orientation,
            size,
            length,
            depth,
            tick_thickness,
            label_box,
            tick_angle,
            baseline,
            ticks: placements,
            label,
        })
    }

    /// Size of the surface the strip is drawn on; the far baseline end
    /// needs one extra pixel on each side.
    pub fn surface_size(&self) -> Result<Size> {
        self.size.grown(1)
    }
}
