//! Visualization: annotated stacked-area charts rendered to **PNG** or **SVG**.
//!
//! - Layers stacked bottom-up in configured species order, one fill color per species
//! - Milestones drawn as a reference line, a dot and an offset label
//! - Framed legend inside the plot, in stacking order
//! - Figure sized in inches; pixels and font sizes follow the DPI
//!
//! Rendering is split in two: [`prepare`] validates the configuration against the data
//! and computes all geometry ([`ChartScene`]); [`render_file`] / [`render_rgb`] draw it.
//! Nothing touches the output path until `prepare` has succeeded.

pub mod annotate;
pub mod fonts;
pub mod legend;
pub mod palette;
pub mod stack;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{Figure, LegendCorner, PREVIEW_DPI, YAxisMode};

use crate::config::{ChartConfig, CityConfig};
use crate::models::{LabelAlign, PlantingTable, YearRange};
use anyhow::{Context, Result, anyhow};
use log::debug;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontStyle};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};

use annotate::{Annotation, annotations, max_milestone_height};
use legend::{LegendEntry, LegendMetrics, draw_inside_legend, legend_entries};
use stack::{StackedLayer, max_stack_total, stack_layers};
use text::line_height_px;
use util::{
    compute_left_label_area_px, format_count, map_locale, x_bounds, x_label_count, y_upper_bound,
};

/// Font sizes in points.
const TICK_PT: f64 = 14.0;
const AXIS_DESC_PT: f64 = 16.0;
const LEGEND_TITLE_PT: f64 = 16.0;
const LEGEND_PT: f64 = 13.0;
const LABEL_PT: f64 = 13.0;
const Y_TICKS: usize = 8;

/// Validated, fully computed chart content, independent of any backend.
#[derive(Debug, Clone)]
pub struct ChartScene {
    pub title: String,
    pub range: YearRange,
    /// Rows within `range`, source order.
    pub table: PlantingTable,
    pub layers: Vec<StackedLayer>,
    pub annotations: Vec<Annotation>,
    pub legend: Vec<LegendEntry>,
    pub y_max: f64,
}

/// Filter `table` to the configured years, check species and colors, and lay out the chart.
///
/// Fails with a [`crate::error::PlantingError`] (wrapped) when a configured species is not a
/// column, a color is unknown, or the range is inverted.
pub fn prepare(table: &PlantingTable, cfg: &CityConfig) -> Result<ChartScene> {
    let colors = cfg.validate()?;
    let filtered = table.filter_years(cfg.chart.range)?;
    cfg.species.check_columns(&filtered)?;

    let names = cfg.species.names();
    let layers = stack_layers(&filtered, &names, &colors);
    let max_total = max_stack_total(&layers);
    let y_max = y_upper_bound(
        cfg.chart.y_axis,
        max_total,
        max_milestone_height(&cfg.milestones),
    );
    debug!(
        "{}: {} rows in {}..={}, stack max {max_total}, y axis 0..{y_max}",
        cfg.name,
        filtered.len(),
        cfg.chart.range.lo,
        cfg.chart.range.hi
    );
    Ok(ChartScene {
        title: cfg.name.clone(),
        range: cfg.chart.range,
        legend: legend_entries(&layers),
        annotations: annotations(&cfg.milestones),
        layers,
        table: filtered,
        y_max,
    })
}

/// Draw `scene` to `out_path` at the configured figure size. `.svg` selects the SVG
/// backend, anything else writes a PNG.
pub fn render_file<P: AsRef<Path>>(
    scene: &ChartScene,
    chart: &ChartConfig,
    out_path: P,
    font: Option<&Path>,
) -> Result<()> {
    fonts::ensure_fonts_registered(font)?;
    let out_path = out_path.as_ref();
    let figure = chart.figure;
    let size = figure.pixels();

    let drawn = if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        draw_chart(root, scene, chart, &figure)
    } else {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        draw_chart(root, scene, chart, &figure)
    };
    drawn.with_context(|| format!("writing chart to {}", out_path.display()))
}

/// An RGB8 raster, row-major, three bytes per pixel.
#[derive(Debug, Clone)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Draw `scene` into memory at `dpi` (used for on-screen previews).
pub fn render_rgb(
    scene: &ChartScene,
    chart: &ChartConfig,
    dpi: u32,
    font: Option<&Path>,
) -> Result<RgbImage> {
    fonts::ensure_fonts_registered(font)?;
    let figure = chart.figure.with_dpi(dpi);
    let (width, height) = figure.pixels();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(root, scene, chart, &figure)?;
    }
    Ok(RgbImage {
        width,
        height,
        pixels,
    })
}

/// Prepare and write one city's chart to its configured output path.
pub fn plot_city(table: &PlantingTable, cfg: &CityConfig, font: Option<&Path>) -> Result<PathBuf> {
    let scene = prepare(table, cfg)?;
    render_file(&scene, &cfg.chart, &cfg.chart.output, font)?;
    Ok(cfg.chart.output.clone())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    scene: &ChartScene,
    cfg: &ChartConfig,
    figure: &Figure,
) -> Result<()>
where
    DB: DrawingBackend,
{
    // ----------------------------
    // 0) Sizes at this DPI
    // ----------------------------
    let tick_px = figure.pt_px(TICK_PT);
    let desc_px = figure.pt_px(AXIS_DESC_PT);
    let label_px = figure.pt_px(LABEL_PT);
    let line_w = figure.pt_px(1.0);
    let (num_locale, _dec_sep) = map_locale(&cfg.locale);

    let (x_min, x_max) = x_bounds(scene.range);
    let left_px = compute_left_label_area_px(scene.y_max, Y_TICKS, num_locale, tick_px, desc_px);
    let bottom_px = tick_px + (desc_px as f32 * 1.8).ceil() as u32;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 1) Axes
    // ----------------------------
    let mut chart = ChartBuilder::on(&root)
        .margin(figure.pt_px(10.0))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_px)
        .build_cartesian_2d(x_min..x_max, 0f64..scene.y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &f64| (x.round() as i64).to_string();
    let y_label_fmt = |v: &f64| format_count(*v, num_locale);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(cfg.x_label.as_str())
        .y_desc(cfg.y_label.as_str())
        .x_labels(x_label_count(scene.range))
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, tick_px))
        .axis_desc_style((FontFamily::SansSerif, desc_px, FontStyle::Bold))
        .axis_style(BLACK.stroke_width(line_w))
        .set_all_tick_mark_size(figure.pt_px(3.5))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 2) Stacked layers, bottom first
    // ----------------------------
    for layer in &scene.layers {
        if layer.upper.is_empty() {
            continue;
        }
        chart
            .draw_series(std::iter::once(Polygon::new(
                layer.polygon(),
                layer.color.mix(cfg.fill_alpha).filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                layer.upper.clone(),
                layer.color.stroke_width(line_w),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 3) Milestones
    // ----------------------------
    let marker_r = figure.pt_px(3.0);
    let label_line_h = line_height_px(label_px);
    for a in &scene.annotations {
        chart
            .draw_series(std::iter::once(PathElement::new(
                a.line.to_vec(),
                BLACK.stroke_width(line_w),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .draw_series(std::iter::once(Circle::new(a.marker, marker_r, BLACK.filled())))
            .map_err(|e| anyhow!("{:?}", e))?;

        // Offsets are in points with y up; backend pixels have y down.
        let dx = figure.pt(a.label.offset_pt.0).round() as i32;
        let dy = -(figure.pt(a.label.offset_pt.1).round() as i32);
        let h_pos = match a.label.align {
            LabelAlign::Left => HPos::Left,
            LabelAlign::Right => HPos::Right,
        };
        let style = TextStyle::from((FontFamily::SansSerif, label_px))
            .color(&BLACK)
            .pos(Pos::new(h_pos, VPos::Bottom));
        // Last line sits on the offset point, earlier lines stack above it.
        let n = a.label.lines.len() as i32;
        chart
            .draw_series(a.label.lines.iter().enumerate().map(|(i, line)| {
                EmptyElement::at(a.marker)
                    + Text::new(
                        line.clone(),
                        (dx, dy - (n - 1 - i as i32) * label_line_h),
                        style.clone(),
                    )
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Legend
    // ----------------------------
    let plot_px = chart.plotting_area().get_pixel_range();
    draw_inside_legend(
        &root,
        plot_px,
        cfg.legend_corner,
        &cfg.legend_title,
        &scene.legend,
        LegendMetrics::new(figure.pt_px(LEGEND_TITLE_PT), figure.pt_px(LEGEND_PT)),
        cfg.fill_alpha,
    )?;

    // ----------------------------
    // 5) Present
    // ----------------------------
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
