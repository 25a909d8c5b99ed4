use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use graphing::raster::ImageFormat;
use graphing::{
    Axis, AxisConfig, AxisStyle, BarPlotStyle, ChartDocument, ComposerLayout, FontSpec, Graph,
    LinePlotStyle, Orientation, Plot, PlottersRaster, Rgba, fonts,
};

#[derive(Parser, Debug)]
#[command(
    name = "graphing",
    version,
    about = "Lay out axes, line and bar plots and compose them into a chart image"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chart from a JSON document and save it.
    Render(RenderArgs),
    /// Print the computed canvas size and layer offsets of a chart document.
    Layout(LayoutArgs),
    /// Render the built-in bar + line demo chart.
    Demo(DemoArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Jpeg,
    Bmp,
}

impl From<OutFormat> for ImageFormat {
    fn from(value: OutFormat) -> Self {
        match value {
            OutFormat::Png => ImageFormat::Png,
            OutFormat::Jpeg => ImageFormat::Jpeg,
            OutFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Chart document (JSON).
    chart: PathBuf,
    /// Output image path.
    #[arg(short, long)]
    out: PathBuf,
    /// Image format. If omitted, inferred from the --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Estimate text metrics and draw text as blocks; no fonts are loaded.
    #[arg(long, default_value_t = false)]
    draft: bool,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Chart document (JSON).
    chart: PathBuf,
    /// Estimate text metrics instead of loading fonts.
    #[arg(long, default_value_t = false)]
    draft: bool,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Output image path.
    #[arg(short, long)]
    out: PathBuf,
    /// TrueType/OpenType font for the labels. Draft text when omitted.
    #[arg(long)]
    font_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn load(chart: &Path, draft: bool) -> Result<(ChartDocument, PlottersRaster)> {
    let doc = ChartDocument::from_path(chart)
        .with_context(|| format!("failed to load chart document {}", chart.display()))?;
    if draft {
        return Ok((doc, PlottersRaster::draft()));
    }
    doc.register_fonts().context("failed to register fonts")?;
    Ok((doc, PlottersRaster::new()))
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (doc, raster) = load(&args.chart, args.draft)?;
    let graph = doc.build(&raster).context("failed to build chart")?;
    graph
        .save(&args.out, args.format.map(ImageFormat::from))
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    info!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> Result<()> {
    let (doc, raster) = load(&args.chart, args.draft)?;
    let graph = doc.build(&raster).context("failed to build chart")?;
    println!("{}", serde_json::to_string_pretty(graph.layout())?);
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    let raster = match &args.font_file {
        Some(path) => {
            fonts::register_font_file("demo", path)
                .with_context(|| format!("failed to load font {}", path.display()))?;
            PlottersRaster::new()
        }
        None => PlottersRaster::draft(),
    };
    let graph = demo_graph(&raster)?;
    graph
        .save(&args.out, None)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!(
        "{}x{} chart written to {}",
        graph.size().width,
        graph.size().height,
        args.out.display()
    );
    Ok(())
}

fn demo_graph(raster: &PlottersRaster) -> Result<Graph> {
    let text = Rgba::WHITE;
    let line = Rgba::rgb(114, 137, 218);
    let bar = Rgba::rgb(210, 31, 60);
    let values = [3.0, 5.0, 3.0, 0.0, 3.0, 3.0];

    let mut style = AxisStyle::new(FontSpec::new("demo", 20.0));
    style.color = text;
    let x_axis = Axis::text(
        raster,
        &["a", "b", "c", "d", "e", "f"],
        100,
        false,
        AxisConfig::new(Orientation::X, style.clone()).with_rotation(45.0),
    )?;
    let y_axis = Axis::range(
        raster,
        6,
        0,
        1,
        100,
        AxisConfig::new(Orientation::Y, style).with_label("Value"),
    )?;

    let bars = Plot::bar(
        raster,
        &values[..values.len() - 1],
        &BarPlotStyle {
            bar_padding: 10.0,
            bar_width: 80.0,
            color: bar,
            scale: 100.0,
            ..BarPlotStyle::default()
        },
    )?;
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(x, y)| (x as f64, *y))
        .collect();
    let curve = Plot::line(
        raster,
        &points,
        &LinePlotStyle {
            x_scale: 100.0,
            y_scale: 100.0,
            line_width: 5,
            dot_size: 5,
            line_color: line,
            dot_color: line,
            ..LinePlotStyle::default()
        },
    )?;

    let layout = ComposerLayout {
        background: Rgba::rgb(44, 47, 51),
        ..ComposerLayout::default()
    };
    let graph = Graph::compose(raster, &x_axis, &y_axis, &[bars, curve], None, &layout)?;
    Ok(graph)
}
