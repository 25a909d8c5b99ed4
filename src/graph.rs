//! Canvas composition: axes, plots and an optional legend on one surface.

use log::{debug, trace};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::axis::{Axis, Orientation};
use crate::error::{GraphError, Result};
use crate::geometry::{PixelPoint, Size, to_offset};
use crate::legend::Legend;
use crate::plot::Plot;
use crate::raster::{ImageFormat, PasteMode, Raster, Surface};
use crate::style::ComposerLayout;

/// Canvas size and the top-left corner of every layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionLayout {
    pub canvas: Size,
    /// Largest width and height over all plots.
    pub plot_area: Size,
    /// One anchor per plot, in paste order.
    pub plots: Vec<PixelPoint>,
    pub x_axis: PixelPoint,
    pub y_axis: PixelPoint,
    pub legend: Option<PixelPoint>,
}

impl CompositionLayout {
    /// Place layers of the given logical sizes.
    ///
    /// Plots share the corner above the x-axis and right of the y-axis, so
    /// several plots overlay each other. The legend's top edge sits on the
    /// bottom padding line.
    pub fn compute(
        x_axis: Size,
        y_axis: Size,
        plots: &[Size],
        legend: Option<Size>,
        padding: u32,
    ) -> Result<Self> {
        if plots.is_empty() {
            return Err(GraphError::invalid("a graph needs at least one plot"));
        }
        let plot_area = Size::new(
            plots.iter().map(|p| p.width).max().unwrap_or(0),
            plots.iter().map(|p| p.height).max().unwrap_or(0),
        );
        let width = u64::from(plot_area.width) + u64::from(y_axis.width) + 2 * u64::from(padding);
        let height =
            u64::from(plot_area.height) + u64::from(x_axis.height) + 2 * u64::from(padding);
        let (Ok(width), Ok(height)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(GraphError::invalid(format!(
                "canvas of {width}x{height} px is too large"
            )));
        };

        let pad = to_offset(padding)?;
        let (xh, yw, yh) = (
            to_offset(x_axis.height)?,
            to_offset(y_axis.width)?,
            to_offset(y_axis.height)?,
        );
        let left = pad + yw;
        let x_axis_top = height - pad - xh;
        let plots = plots
            .iter()
            .map(|p| Ok((left, x_axis_top - to_offset(p.height)?)))
            .collect::<Result<Vec<_>>>()?;
        let legend = legend
            .map(|l| Ok::<_, GraphError>((width - pad - to_offset(l.width)?, height - pad)))
            .transpose()?;

        Ok(Self {
            canvas: Size::new(width.unsigned_abs(), height.unsigned_abs()),
            plot_area,
            plots,
            x_axis: (left, x_axis_top),
            y_axis: (pad, x_axis_top - yh),
            legend,
        })
    }
}

/// The composed chart. Built once; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Graph {
    layout: CompositionLayout,
    surface: Surface,
}

impl Graph {
    /// Paste plots, then the x-axis, then the y-axis, then the legend onto a
    /// background-filled canvas. The inputs are only read.
    pub fn compose<R: Raster + ?Sized>(
        raster: &R,
        x_axis: &Axis,
        y_axis: &Axis,
        plots: &[Plot],
        legend: Option<&Legend>,
        options: &ComposerLayout,
    ) -> Result<Self> {
        if x_axis.orientation() != Orientation::X || y_axis.orientation() != Orientation::Y {
            return Err(GraphError::invalid(
                "compose expects an x axis and a y axis, in that order",
            ));
        }
        let sizes: Vec<Size> = plots.iter().map(Plot::size).collect();
        let layout = CompositionLayout::compute(
            x_axis.size(),
            y_axis.size(),
            &sizes,
            legend.map(Legend::size),
            options.padding,
        )?;

        let mut canvas =
            raster.create_surface(layout.canvas.width, layout.canvas.height, options.background)?;
        for (i, (plot, &at)) in plots.iter().zip(&layout.plots).enumerate() {
            trace!("plot {i} ({:?}) at {at:?}", plot.kind());
            raster.paste_surface(&mut canvas, plot.surface(), at, PasteMode::AlphaMask)?;
        }
        trace!("x axis at {:?}", layout.x_axis);
        raster.paste_surface(&mut canvas, x_axis.surface(), layout.x_axis, PasteMode::AlphaMask)?;
        trace!("y axis at {:?}", layout.y_axis);
        raster.paste_surface(&mut canvas, y_axis.surface(), layout.y_axis, PasteMode::AlphaMask)?;
        if let (Some(legend), Some(at)) = (legend, layout.legend) {
            trace!("legend at {at:?} ({:?})", options.legend_paste);
            raster.paste_surface(&mut canvas, legend.surface(), at, options.legend_paste)?;
        }

        debug!(
            "graph: {}x{} px canvas, {} plot(s)",
            layout.canvas.width,
            layout.canvas.height,
            plots.len()
        );
        Ok(Self {
            layout,
            surface: canvas,
        })
    }

    pub fn layout(&self) -> &CompositionLayout {
        &self.layout
    }

    pub fn size(&self) -> Size {
        self.layout.canvas
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    /// Encode the canvas; the format follows the extension when not given.
    pub fn save(&self, path: impl AsRef<Path>, format: Option<ImageFormat>) -> Result<()> {
        self.surface.save(path.as_ref(), format)
    }

    /// Write the canvas to a temporary PNG and open it in the platform viewer.
    /// The file is kept so the viewer can still read it; its path is returned.
    pub fn show(&self) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("graphing-")
            .suffix(".png")
            .tempfile()?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        self.save(&path, Some(ImageFormat::Png))?;
        debug!("showing {}", path.display());

        let status = viewer_command(&path).status()?;
        if !status.success() {
            return Err(GraphError::Io(std::io::Error::other(format!(
                "image viewer exited with {status}"
            ))));
        }
        Ok(path)
    }
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        let mut cmd = Command::new(program);
        cmd.arg(path);
        cmd
    }
}
