//! Legend boxes: a single column of color swatches and labels.
//!
//! The composer only ever reads a legend's size and surface, so a legend can
//! also wrap any pre-rendered surface via [`Legend::from_surface`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, PixelRect, Size};
use crate::raster::{Raster, Surface, TextMetrics};
use crate::style::{LegendStyle, Rgba};

/// One legend row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, color: Rgba) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Placement of one row inside the legend box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub swatch: PixelRect,
    pub text_origin: PixelPoint,
    pub text_box: Size,
}

/// Sizes and positions of every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub size: Size,
    pub rows: Vec<LegendRow>,
}

impl LegendLayout {
    pub fn compute<M: TextMetrics + ?Sized>(
        metrics: &M,
        entries: &[LegendEntry],
        style: &LegendStyle,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(GraphError::invalid("a legend needs at least one entry"));
        }
        let boxes = entries
            .iter()
            .map(|e| metrics.measure_text(&style.font, &e.label))
            .collect::<Result<Vec<_>>>()?;

        // every row offset below stays inside this box
        let widest = boxes.iter().map(|b| b.width).max().unwrap_or(0);
        let width = [style.padding, style.swatch, style.swatch_gap, widest]
            .into_iter()
            .map(u64::from)
            .sum::<u64>()
            + u64::from(style.padding);
        let rows_h: u64 = boxes
            .iter()
            .map(|b| u64::from(style.swatch.max(b.height)))
            .sum();
        let gaps = u64::from(style.row_gap) * (boxes.len() as u64 - 1);
        let height = rows_h + gaps + 2 * u64::from(style.padding);
        let (Ok(width), Ok(height)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(GraphError::invalid(format!(
                "legend of {width}x{height} px is too large"
            )));
        };

        let text_x = (style.padding + style.swatch + style.swatch_gap) as i32;
        let mut y = style.padding;
        let mut rows = Vec::with_capacity(boxes.len());
        for text_box in &boxes {
            let row_h = style.swatch.max(text_box.height);
            let swatch_top = (y + (row_h - style.swatch) / 2) as i32;
            let left = style.padding as i32;
            rows.push(LegendRow {
                swatch: PixelRect::new(
                    left,
                    swatch_top,
                    left + style.swatch as i32 - 1,
                    swatch_top + style.swatch as i32 - 1,
                ),
                text_origin: (text_x, (y + (row_h - text_box.height) / 2) as i32),
                text_box: *text_box,
            });
            y = y.saturating_add(row_h).saturating_add(style.row_gap);
        }

        Ok(Self {
            size: Size::new(width.unsigned_abs(), height.unsigned_abs()),
            rows,
        })
    }
}

/// A rendered legend box.
#[derive(Debug, Clone)]
pub struct Legend {
    size: Size,
    surface: Surface,
}

impl Legend {
    /// List `entries` top to bottom on the style's background.
    pub fn entries<R: Raster + ?Sized>(
        raster: &R,
        entries: &[LegendEntry],
        style: &LegendStyle,
    ) -> Result<Self> {
        let layout = LegendLayout::compute(raster, entries, style)?;
        let mut surface =
            raster.create_surface(layout.size.width, layout.size.height, style.background)?;
        for (entry, row) in entries.iter().zip(&layout.rows) {
            if style.swatch > 0 {
                raster.draw_rectangle(&mut surface, row.swatch, entry.color)?;
            }
            raster.render_text(
                &mut surface,
                row.text_origin,
                &entry.label,
                &style.font,
                style.text_color,
            )?;
        }
        debug!(
            "legend: {} entries, {}x{} px",
            entries.len(),
            layout.size.width,
            layout.size.height
        );
        Ok(Self {
            size: layout.size,
            surface,
        })
    }

    pub fn from_surface(surface: Surface) -> Self {
        Self {
            size: surface.size(),
            surface,
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PlottersRaster;
    use crate::style::FontSpec;

    fn style() -> LegendStyle {
        LegendStyle::new(FontSpec::new("draft", 10.0))
    }

    fn entries() -> Vec<LegendEntry> {
        vec![
            LegendEntry::new("bar", Rgba::rgb(255, 0, 0)),
            LegendEntry::new("line", Rgba::BLUE),
        ]
    }

    #[test]
    fn size_sums_rows_and_widest_label() {
        let l = LegendLayout::compute(&PlottersRaster::draft(), &entries(), &style()).unwrap();
        // 2*6 + 12 + 8 + "line" 24 by 2*6 + 12 + 12 + 4
        assert_eq!(l.size, Size::new(56, 40));
        assert_eq!(l.rows[0].swatch, PixelRect::new(6, 6, 17, 17));
        assert_eq!(l.rows[0].text_origin, (26, 7));
        assert_eq!(l.rows[1].swatch.top, 22);
    }

    #[test]
    fn tall_font_sets_the_row_height() {
        let mut s = style();
        s.font.size = 20.0;
        let l = LegendLayout::compute(&PlottersRaster::draft(), &entries(), &s).unwrap();
        assert_eq!(l.size.height, 12 + 20 + 20 + 4);
        assert_eq!(l.rows[0].swatch.top, 6 + 4);
        assert_eq!(l.rows[0].text_origin.1, 6);
    }

    #[test]
    fn renders_swatches_on_background() {
        let legend = Legend::entries(&PlottersRaster::draft(), &entries(), &style()).unwrap();
        assert_eq!(legend.size(), legend.surface().size());
        let s = legend.surface();
        assert_eq!(s.pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(s.pixel(10, 10), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(s.pixel(10, 26), Some(Rgba::BLUE));
        assert_eq!(s.pixel(30, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn empty_legend_is_rejected() {
        let e = Legend::entries(&PlottersRaster::draft(), &[], &style());
        assert!(matches!(e, Err(GraphError::InvalidInput(_))));
    }

    #[test]
    fn legend_box_past_signed_offsets_is_rejected() {
        let mut s = style();
        s.row_gap = u32::MAX;
        let e = LegendLayout::compute(&PlottersRaster::draft(), &entries(), &s);
        assert!(matches!(e, Err(GraphError::InvalidInput(_))));
    }
}
