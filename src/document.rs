//! JSON chart descriptions.
//!
//! A [`ChartDocument`] names everything a [`Graph`] is built from: fonts to
//! register, both axes with their tick strategy, the plots, an optional
//! legend and the composer settings. Loading never bypasses validation;
//! [`ChartDocument::build`] goes through the same constructors as library
//! callers.
//!
//! ```json
//! {
//!   "fonts": [{ "family": "sans", "path": "DejaVuSans.ttf" }],
//!   "x_axis": {
//!     "ticks": { "kind": "text", "labels": ["a", "b"], "gap": 100, "centered": true },
//!     "style": { "font": { "family": "sans", "size": 12 } }
//!   },
//!   "y_axis": {
//!     "ticks": { "kind": "range", "end": 6, "step": 1, "gap": 100 },
//!     "label": "Value",
//!     "style": { "font": { "family": "sans", "size": 12 } }
//!   },
//!   "plots": [{ "kind": "bar", "values": [3, 5], "style": { "scale": 100 } }]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::axis::{Axis, AxisConfig, Orientation, TickSet};
use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::legend::{Legend, LegendEntry};
use crate::plot::Plot;
use crate::raster::{Raster, fonts};
use crate::style::{AxisStyle, BarPlotStyle, ComposerLayout, LegendStyle, LinePlotStyle};

/// A font file registered under a family name before building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSource {
    pub family: String,
    /// Relative paths are resolved against the document's directory.
    pub path: PathBuf,
}

/// How an axis produces its ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickSpec {
    Numeric {
        values: Vec<f64>,
        scale: f64,
    },
    Range {
        #[serde(default)]
        start: i64,
        end: i64,
        step: i64,
        gap: i64,
    },
    Text {
        labels: Vec<String>,
        gap: u32,
        #[serde(default)]
        centered: bool,
    },
    /// `[offset, label]` pairs given directly.
    Explicit { ticks: Vec<(u32, String)> },
}

impl TickSpec {
    pub fn tick_set(&self) -> Result<TickSet> {
        match self {
            TickSpec::Numeric { values, scale } => TickSet::numeric(values, *scale),
            TickSpec::Range {
                start,
                end,
                step,
                gap,
            } => TickSet::range(*end, *start, *step, *gap),
            TickSpec::Text {
                labels,
                gap,
                centered,
            } => TickSet::text(labels, *gap, *centered),
            TickSpec::Explicit { ticks } => {
                let mut map = BTreeMap::new();
                for (offset, label) in ticks {
                    if map.insert(*offset, label.clone()).is_some() {
                        return Err(GraphError::invalid(format!(
                            "tick offset {offset} is given more than once"
                        )));
                    }
                }
                TickSet::from_map(map)
            }
        }
    }
}

/// One axis; its orientation comes from the slot it is placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDocument {
    pub ticks: TickSpec,
    #[serde(default)]
    pub label: String,
    /// Clockwise tick label rotation in degrees.
    #[serde(default)]
    pub rotation: Option<f64>,
    pub style: AxisStyle,
}

impl AxisDocument {
    fn config(&self, orientation: Orientation) -> AxisConfig {
        AxisConfig {
            orientation,
            label: self.label.clone(),
            rotation: self.rotation,
            style: self.style.clone(),
        }
    }

    fn build<R: Raster + ?Sized>(&self, raster: &R, orientation: Orientation) -> Result<Axis> {
        Axis::new(raster, self.ticks.tick_set()?, self.config(orientation))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotDocument {
    Line {
        points: Vec<(f64, f64)>,
        #[serde(default)]
        style: LinePlotStyle,
    },
    Bar {
        values: Vec<f64>,
        #[serde(default)]
        style: BarPlotStyle,
    },
}

impl PlotDocument {
    fn build<R: Raster + ?Sized>(&self, raster: &R) -> Result<Plot> {
        match self {
            PlotDocument::Line { points, style } => Plot::line(raster, points, style),
            PlotDocument::Bar { values, style } => Plot::bar(raster, values, style),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendDocument {
    pub entries: Vec<LegendEntry>,
    pub style: LegendStyle,
}

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(default)]
    pub fonts: Vec<FontSource>,
    pub x_axis: AxisDocument,
    pub y_axis: AxisDocument,
    pub plots: Vec<PlotDocument>,
    #[serde(default)]
    pub legend: Option<LegendDocument>,
    #[serde(default)]
    pub layout: ComposerLayout,
}

impl ChartDocument {
    /// Parse a document; relative font paths stay as written.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a document file, resolving font paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut doc = Self::from_json(&fs::read_to_string(path)?)?;
        if let Some(dir) = path.parent() {
            for font in doc.fonts.iter_mut().filter(|f| f.path.is_relative()) {
                font.path = dir.join(&font.path);
            }
        }
        debug!("loaded chart document {}", path.display());
        Ok(doc)
    }

    /// Register every listed font with the glyph backend.
    pub fn register_fonts(&self) -> Result<()> {
        for font in &self.fonts {
            fonts::register_font_file(&font.family, &font.path)?;
        }
        Ok(())
    }

    /// Build every component and compose them.
    pub fn build<R: Raster + ?Sized>(&self, raster: &R) -> Result<Graph> {
        let x_axis = self.x_axis.build(raster, Orientation::X)?;
        let y_axis = self.y_axis.build(raster, Orientation::Y)?;
        let plots = self
            .plots
            .iter()
            .map(|p| p.build(raster))
            .collect::<Result<Vec<_>>>()?;
        let legend = self
            .legend
            .as_ref()
            .map(|l| Legend::entries(raster, &l.entries, &l.style))
            .transpose()?;
        Graph::compose(raster, &x_axis, &y_axis, &plots, legend.as_ref(), &self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::raster::PasteMode;

    const MINIMAL: &str = r#"{
        "x_axis": {
            "ticks": { "kind": "numeric", "values": [0, 1, 2], "scale": 20 },
            "style": { "font": { "family": "draft", "size": 10 } }
        },
        "y_axis": {
            "ticks": { "kind": "range", "end": 2, "step": 1, "gap": 20 },
            "style": { "font": { "family": "draft", "size": 10 } }
        },
        "plots": [{ "kind": "line", "points": [[0, 0], [1, 1], [2, 0]] }]
    }"#;

    #[test]
    fn minimal_document_takes_defaults() {
        let doc = ChartDocument::from_json(MINIMAL).unwrap();
        assert!(doc.fonts.is_empty());
        assert!(doc.legend.is_none());
        assert_eq!(doc.layout.padding, 10);
        assert_eq!(doc.layout.legend_paste, PasteMode::AlphaMask);
        assert_eq!(
            doc.y_axis.ticks,
            TickSpec::Range {
                start: 0,
                end: 2,
                step: 1,
                gap: 20
            }
        );
        match &doc.plots[0] {
            PlotDocument::Line { points, style } => {
                assert_eq!(points[1], (1.0, 1.0));
                assert_eq!(style.x_scale, 20.0);
            }
            other => panic!("unexpected plot {other:?}"),
        }
    }

    #[test]
    fn explicit_ticks_and_bad_kind() {
        let spec: TickSpec =
            serde_json::from_str(r#"{"kind": "explicit", "ticks": [[0, "lo"], [40, "hi"]]}"#)
                .unwrap();
        assert_eq!(spec.tick_set().unwrap().max_offset(), 40);

        let doubled: TickSpec = serde_json::from_str(
            r#"{"kind": "explicit", "ticks": [[0, "lo"], [0, "zero"], [40, "hi"]]}"#,
        )
        .unwrap();
        assert!(matches!(doubled.tick_set(), Err(GraphError::InvalidInput(_))));

        let e = ChartDocument::from_json(&MINIMAL.replace("\"line\"", "\"pie\""));
        assert!(matches!(e, Err(GraphError::Document(_))));
    }

    #[test]
    fn invalid_ticks_surface_as_invalid_input() {
        let spec = TickSpec::Range {
            start: 0,
            end: 5,
            step: 3,
            gap: 20,
        };
        assert!(matches!(spec.tick_set(), Err(GraphError::InvalidInput(_))));
    }
}
