//! Drawing a laid out axis strip.

use super::{AxisConfig, AxisLayout};
use crate::error::Result;
use crate::raster::{Raster, Surface, draw_rotated_text};
use crate::style::Rgba;

/// Draw baseline, ticks with their labels, then the title onto a new
/// transparent surface of [`AxisLayout::surface_size`].
pub fn render_axis<R: Raster + ?Sized>(
    raster: &R,
    layout: &AxisLayout,
    config: &AxisConfig,
) -> Result<Surface> {
    let style = &config.style;
    let size = layout.surface_size()?;
    let mut surface = raster.create_surface(size.width, size.height, Rgba::TRANSPARENT)?;

    raster.draw_line(&mut surface, &layout.baseline, style.color, 1)?;

    for tick in &layout.ticks {
        draw_rotated_text(
            raster,
            &mut surface,
            tick.text_origin,
            layout.tick_angle,
            &tick.text,
            &style.font,
            style.color,
        )?;
        raster.draw_line(&mut surface, &tick.mark, style.color, 1)?;
    }

    if let Some(label) = &layout.label {
        draw_rotated_text(
            raster,
            &mut surface,
            label.origin,
            label.angle,
            &config.label,
            style.label_font(),
            style.label_color(),
        )?;
    }
    Ok(surface)
}
