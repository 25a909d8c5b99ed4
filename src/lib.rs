//! graphing
//!
//! Closed-form chart layout: axis strips with ticks and rotated labels, line
//! and bar plots mapped into pixel space, and a composer that pastes them
//! onto one canvas. Pairs with the `graphing` CLI.
//!
//! ### Features
//! - Numeric, range, text and explicit tick strategies
//! - Tick labels at any rotation, sized in one pass from rotated bounding boxes
//! - Line and bar plots that overlay on a shared anchor
//! - Optional legend box, alpha-aware composition, PNG/JPEG/BMP output
//! - JSON chart documents for whole charts
//!
//! Every component is laid out by a pure function of its inputs and text
//! metrics, then drawn through the [`Raster`] capability.
//!
//! ### Example
//! ```no_run
//! use graphing::{Axis, AxisConfig, AxisStyle, BarPlotStyle, ComposerLayout, FontSpec};
//! use graphing::{Graph, Orientation, Plot, PlottersRaster};
//!
//! graphing::fonts::register_font_file("sans", "DejaVuSans.ttf")?;
//! let raster = PlottersRaster::new();
//! let style = AxisStyle::new(FontSpec::new("sans", 14.0));
//!
//! let x = Axis::text(&raster, &["a", "b", "c"], 100, true,
//!     AxisConfig::new(Orientation::X, style.clone()).with_rotation(0.0))?;
//! let y = Axis::range(&raster, 6, 0, 1, 100,
//!     AxisConfig::new(Orientation::Y, style).with_label("Value"))?;
//! let bars = Plot::bar(&raster, &[3.0, 5.0, 3.0], &BarPlotStyle {
//!     bar_width: 80.0, bar_padding: 10.0, scale: 100.0, ..Default::default()
//! })?;
//!
//! let graph = Graph::compose(&raster, &x, &y, &[bars], None, &ComposerLayout::default())?;
//! graph.save("bars.png", None)?;
//! # Ok::<(), graphing::GraphError>(())
//! ```

pub mod axis;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod legend;
pub mod plot;
pub mod raster;
pub mod style;

pub use axis::{Axis, AxisConfig, AxisLayout, Orientation, TickSet};
pub use document::ChartDocument;
pub use error::{GraphError, Result};
pub use geometry::{PixelPoint, PixelRect, Size, rotated_bounding_box};
pub use graph::{CompositionLayout, Graph};
pub use legend::{Legend, LegendEntry};
pub use plot::{Plot, PlotKind};
pub use raster::{PasteMode, PlottersRaster, Raster, Surface, TextMetrics, TextMode, fonts};
pub use style::{
    AxisStyle, BarPlotStyle, ComposerLayout, FontSpec, LegendStyle, LinePlotStyle, Padding, Rgba,
};
