//! Colors, fonts and per-component configuration.
//!
//! Every component takes an explicit style struct. Fonts are never implied:
//! each style that draws text carries its own [`FontSpec`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;
use crate::raster::PasteMode;

/// 8-bit color with straight (non-premultiplied) alpha.
///
/// Serialized as a `#RRGGBB` or `#RRGGBBAA` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha 255.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Rgba {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(GraphError::invalid(format!(
                "color {s:?} is not #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GraphError::invalid(format!("color {s:?} has a non-hex digit")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Rgba::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

/// A font family registered with the text backend, at a pixel size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

fn default_label_padding() -> u32 {
    10
}

fn default_tick_padding() -> u32 {
    2
}

fn default_tick_length() -> u32 {
    5
}

fn default_color() -> Rgba {
    Rgba::BLACK
}

/// Styling for an axis strip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    /// Color of the baseline, tick marks and tick labels.
    #[serde(default = "default_color")]
    pub color: Rgba,
    /// Font of the tick labels.
    pub font: FontSpec,
    /// Font of the axis label; the tick font when absent.
    #[serde(default)]
    pub label_font: Option<FontSpec>,
    /// Color of the axis label; `color` when absent.
    #[serde(default)]
    pub label_color: Option<Rgba>,
    /// Added to both dimensions of a non-empty axis label.
    #[serde(default = "default_label_padding")]
    pub label_padding: u32,
    /// Gap between the end of a tick mark and its label.
    #[serde(default = "default_tick_padding")]
    pub tick_padding: u32,
    #[serde(default = "default_tick_length")]
    pub tick_length: u32,
}

impl AxisStyle {
    pub fn new(font: FontSpec) -> Self {
        Self {
            color: default_color(),
            font,
            label_font: None,
            label_color: None,
            label_padding: default_label_padding(),
            tick_padding: default_tick_padding(),
            tick_length: default_tick_length(),
        }
    }

    pub fn label_font(&self) -> &FontSpec {
        self.label_font.as_ref().unwrap_or(&self.font)
    }

    pub fn label_color(&self) -> Rgba {
        self.label_color.unwrap_or(self.color)
    }
}

/// Padding around the data extent of a line plot, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 20.0,
            top: 20.0,
            bottom: 0.0,
        }
    }
}

impl Padding {
    pub const ZERO: Padding = Padding {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };
}

/// Styling and scales of a line plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinePlotStyle {
    pub padding: Padding,
    /// Pixels per data unit along x.
    pub x_scale: f64,
    /// Pixels per data unit along y.
    pub y_scale: f64,
    /// Diameter of the dot drawn at each data point.
    pub dot_size: u32,
    pub dot_color: Rgba,
    /// Stroke width of the connecting line; zero skips the line.
    pub line_width: u32,
    pub line_color: Rgba,
}

impl Default for LinePlotStyle {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            x_scale: 20.0,
            y_scale: 20.0,
            dot_size: 2,
            dot_color: Rgba::BLUE,
            line_width: 2,
            line_color: Rgba::BLUE,
        }
    }
}

/// Styling and scale of a fixed-width bar plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarPlotStyle {
    /// Space on each side of every bar.
    pub bar_padding: f64,
    pub bar_width: f64,
    /// Space above the tallest bar.
    pub padding_top: f64,
    pub color: Rgba,
    /// Pixels per unit of bar magnitude.
    pub scale: f64,
}

impl Default for BarPlotStyle {
    fn default() -> Self {
        Self {
            bar_padding: 5.0,
            bar_width: 10.0,
            padding_top: 20.0,
            color: Rgba::BLUE,
            scale: 20.0,
        }
    }
}

fn default_legend_padding() -> u32 {
    6
}

fn default_swatch() -> u32 {
    12
}

fn default_swatch_gap() -> u32 {
    8
}

fn default_row_gap() -> u32 {
    4
}

fn default_legend_background() -> Rgba {
    Rgba::WHITE
}

/// Styling for a single-column legend box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    pub font: FontSpec,
    #[serde(default = "default_color")]
    pub text_color: Rgba,
    #[serde(default = "default_legend_background")]
    pub background: Rgba,
    #[serde(default = "default_legend_padding")]
    pub padding: u32,
    /// Side of the square color swatch.
    #[serde(default = "default_swatch")]
    pub swatch: u32,
    /// Gap between swatch and label text.
    #[serde(default = "default_swatch_gap")]
    pub swatch_gap: u32,
    #[serde(default = "default_row_gap")]
    pub row_gap: u32,
}

impl LegendStyle {
    pub fn new(font: FontSpec) -> Self {
        Self {
            font,
            text_color: default_color(),
            background: default_legend_background(),
            padding: default_legend_padding(),
            swatch: default_swatch(),
            swatch_gap: default_swatch_gap(),
            row_gap: default_row_gap(),
        }
    }
}

/// Outer padding, background and blend rules of the composed canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerLayout {
    pub padding: u32,
    pub background: Rgba,
    /// How the legend layer is pasted. Every other layer always blends
    /// through its own alpha channel.
    pub legend_paste: PasteMode,
}

impl Default for ComposerLayout {
    fn default() -> Self {
        Self {
            padding: 10,
            background: Rgba::TRANSPARENT,
            legend_paste: PasteMode::AlphaMask,
        }
    }
}
