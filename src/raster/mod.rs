//! The drawing capability the layout engine renders through.
//!
//! Layout code only needs [`TextMetrics`]; rendering code takes any
//! [`Raster`]. [`PlottersRaster`] is the production implementation.

pub mod backend;
pub mod fonts;
pub mod plotters_raster;
pub mod surface;
pub mod text;

pub use image::ImageFormat;
pub use plotters_raster::{PlottersRaster, TextMode};
pub use surface::{PasteMode, Surface};
pub use text::{draw_rotated_text, estimate_text_size};

use std::path::Path;

use crate::error::Result;
use crate::geometry::{PixelPoint, PixelRect, Size};
use crate::style::{FontSpec, Rgba};

/// Font metrics lookup.
pub trait TextMetrics {
    /// Pixel size of `text` rendered unrotated in `font`.
    fn measure_text(&self, font: &FontSpec, text: &str) -> Result<Size>;
}

/// Raster drawing primitives on RGBA surfaces.
///
/// Surface allocation, rotation, pasting and encoding have pixel-exact default
/// implementations; backends provide shapes and glyphs.
pub trait Raster: TextMetrics {
    fn create_surface(&self, width: u32, height: u32, fill: Rgba) -> Result<Surface> {
        Surface::new(width, height, fill)
    }

    /// Polyline through `points` with the given stroke width.
    fn draw_line(
        &self,
        surface: &mut Surface,
        points: &[PixelPoint],
        color: Rgba,
        width: u32,
    ) -> Result<()>;

    /// Filled ellipse inscribed in `bbox`.
    fn draw_ellipse(&self, surface: &mut Surface, bbox: PixelRect, fill: Rgba) -> Result<()>;

    /// Filled rectangle covering `bbox`, corners inclusive.
    fn draw_rectangle(&self, surface: &mut Surface, bbox: PixelRect, fill: Rgba) -> Result<()>;

    /// Unrotated text with its top-left corner at `position`.
    fn render_text(
        &self,
        surface: &mut Surface,
        position: PixelPoint,
        text: &str,
        font: &FontSpec,
        color: Rgba,
    ) -> Result<()>;

    /// Counter-clockwise rotation, expanded to fit, uncovered pixels set to `fill`.
    fn rotate_surface(&self, surface: &Surface, angle: f64, fill: Rgba) -> Result<Surface> {
        surface.rotated(angle, fill)
    }

    fn paste_surface(
        &self,
        dest: &mut Surface,
        src: &Surface,
        position: PixelPoint,
        mode: PasteMode,
    ) -> Result<()> {
        dest.paste(src, position, mode);
        Ok(())
    }

    fn encode_to_file(
        &self,
        surface: &Surface,
        path: &Path,
        format: Option<ImageFormat>,
    ) -> Result<()> {
        surface.save(path, format)
    }
}
