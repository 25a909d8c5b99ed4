//! Text estimation and rotated text drawing.

use super::{PasteMode, Raster, Surface};
use crate::error::Result;
use crate::geometry::{PixelPoint, Size};
use crate::style::{FontSpec, Rgba};

/// Heuristic: estimate the pixel box of text without any font data.
///
/// Width is `0.6 x size` per character, height is the font size.
pub fn estimate_text_size(text: &str, font: &FontSpec) -> Size {
    let width = (text.chars().count() as f64 * font.size * 0.60).ceil();
    Size::new(width.max(0.0) as u32, font.size.ceil().max(0.0) as u32)
}

/// Draw `text` rotated counter-clockwise by `angle` degrees, with the top-left
/// corner of its rotated bounding box at `position`.
pub fn draw_rotated_text<R: Raster + ?Sized>(
    raster: &R,
    surface: &mut Surface,
    position: PixelPoint,
    angle: f64,
    text: &str,
    font: &FontSpec,
    color: Rgba,
) -> Result<()> {
    let size = raster.measure_text(font, text)?;
    if size.width == 0 || size.height == 0 {
        return Ok(());
    }
    let mut layer = raster.create_surface(size.width, size.height, Rgba::TRANSPARENT)?;
    raster.render_text(&mut layer, (0, 0), text, font, color)?;
    let rotated = raster.rotate_surface(&layer, angle, Rgba::TRANSPARENT)?;
    raster.paste_surface(surface, &rotated, position, PasteMode::AlphaMask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PlottersRaster;

    #[test]
    fn estimate_scales_with_length_and_size() {
        let font = FontSpec::new("any", 10.0);
        assert_eq!(estimate_text_size("abc", &font), Size::new(18, 10));
        assert_eq!(estimate_text_size("", &font), Size::new(0, 10));
        let big = FontSpec::new("any", 20.5);
        assert_eq!(estimate_text_size("ab", &big), Size::new(25, 21));
    }

    #[test]
    fn rotated_draft_text_lands_inside_its_box() {
        let raster = PlottersRaster::draft();
        let font = FontSpec::new("any", 10.0);
        let mut surface = Surface::new(40, 40, Rgba::TRANSPARENT).unwrap();
        // "abc" is 18x10 unrotated, 10x18 after a quarter turn
        draw_rotated_text(&raster, &mut surface, (5, 5), 90.0, "abc", &font, Rgba::BLACK)
            .unwrap();
        assert_eq!(surface.pixel(5, 5), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(14, 22), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(15, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(5, 23), Some(Rgba::TRANSPARENT));
    }
}
