//! Angle conversion and rotated bounding boxes.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{GraphError, Result};

/// Integer pixel coordinate, `(x, y)` with `y` growing downward.
pub type PixelPoint = (i32, i32);

/// Width and height of a surface or layout box, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same box with width and height exchanged.
    pub const fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Grow both sides by `extra` pixels, failing when a side passes `u32::MAX`.
    pub fn grown(self, extra: u32) -> Result<Self> {
        match (self.width.checked_add(extra), self.height.checked_add(extra)) {
            (Some(width), Some(height)) => Ok(Self::new(width, height)),
            _ => Err(GraphError::Allocation {
                width: self.width,
                height: self.height,
            }),
        }
    }
}

/// An axis-aligned pixel rectangle given by its inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square box of side `2 * radius` centered on `center`.
    pub const fn around(center: PixelPoint, radius: i32) -> Self {
        Self::new(
            center.0 - radius,
            center.1 - radius,
            center.0 + radius,
            center.1 + radius,
        )
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Size of the smallest axis-aligned box containing a `width x height`
/// rectangle after rotating it by `rotation` degrees.
///
/// The result only depends on the rotation modulo 180 degrees. Quarter turns
/// are answered exactly; other angles are rounded up so a surface of the
/// returned size always holds the rotated content. A box too large for
/// `u32` sides is `InvalidInput`.
pub fn rotated_bounding_box(width: u32, height: u32, rotation: f64) -> Result<Size> {
    let turn = rotation.rem_euclid(180.0);
    if turn == 0.0 {
        return Ok(Size::new(width, height));
    }
    if turn == 90.0 {
        return Ok(Size::new(height, width));
    }
    let r = deg_to_rad(turn);
    let (w, h) = (width as f64, height as f64);
    // sin(90 - r) == cos(r)
    let bounding_width = (r.sin() * h).abs() + (r.cos() * w).abs();
    let bounding_height = (r.cos() * h).abs() + (r.sin() * w).abs();
    Ok(Size::new(ceil_px(bounding_width)?, ceil_px(bounding_height)?))
}

/// Round a non-negative pixel extent up, ignoring float noise below 1e-9.
pub(crate) fn ceil_px(value: f64) -> Result<u32> {
    let snapped = (value - 1e-9).ceil();
    if !snapped.is_finite() || snapped > f64::from(u32::MAX) {
        return Err(GraphError::invalid(format!(
            "pixel extent {value} does not fit in a surface"
        )));
    }
    debug_assert!(snapped >= 0.0, "negative pixel extent {value}");
    Ok(snapped.max(0.0) as u32)
}

/// Convert a pixel extent to a signed offset.
pub(crate) fn to_offset(value: u32) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| GraphError::invalid(format!("pixel offset {value} is out of range")))
}
