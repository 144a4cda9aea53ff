//! Framed legend drawn inside the plotting area, one row per species.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

use super::stack::StackedLayer;
use super::text::{estimate_text_width_px, line_height_px};
use super::types::LegendCorner;

/// Legend row: label text and its layer color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

/// Legend rows in stacking order (bottom layer first), one per layer.
pub fn legend_entries(layers: &[StackedLayer]) -> Vec<LegendEntry> {
    layers
        .iter()
        .map(|l| LegendEntry {
            label: l.species.clone(),
            color: l.color,
        })
        .collect()
}

/// Pixel sizes used by the legend; all derived from the entry font size.
#[derive(Debug, Clone, Copy)]
pub struct LegendMetrics {
    pub title_px: u32,
    pub font_px: u32,
    pub pad: i32,
    pub swatch_w: i32,
    pub swatch_gap: i32,
    /// Distance from the plot frame to the legend frame.
    pub inset: i32,
}

impl LegendMetrics {
    pub fn new(title_px: u32, font_px: u32) -> Self {
        let f = font_px as i32;
        Self {
            title_px,
            font_px,
            pad: (f / 2).max(2),
            swatch_w: (f * 3 / 2).max(4),
            swatch_gap: (f * 2 / 3).max(2),
            inset: (f * 2 / 3).max(2),
        }
    }

    /// `(width, height)` of the framed box.
    pub fn box_size(&self, title: &str, entries: &[LegendEntry]) -> (i32, i32) {
        let row_h = line_height_px(self.font_px);
        let entry_w = entries
            .iter()
            .map(|e| estimate_text_width_px(&e.label, self.font_px) as i32)
            .max()
            .unwrap_or(0)
            + self.swatch_w
            + self.swatch_gap;
        let title_w = estimate_text_width_px(title, self.title_px) as i32;
        let title_h = if title.trim().is_empty() {
            0
        } else {
            line_height_px(self.title_px)
        };
        let w = entry_w.max(title_w) + 2 * self.pad;
        let h = title_h + row_h * entries.len() as i32 + 2 * self.pad;
        (w, h)
    }
}

/// Draw the legend inside the plot frame given by `plot_px` (absolute pixel ranges on `area`).
pub fn draw_inside_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot_px: (Range<i32>, Range<i32>),
    corner: LegendCorner,
    title: &str,
    entries: &[LegendEntry],
    metrics: LegendMetrics,
    fill_alpha: f64,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let (xr, yr) = plot_px;
    let (w, h) = metrics.box_size(title, entries);
    let x0 = match corner {
        LegendCorner::UpperLeft => xr.start + metrics.inset,
        LegendCorner::UpperRight => xr.end - metrics.inset - w,
    };
    let y0 = yr.start + metrics.inset;

    area.draw(&Rectangle::new(
        [(x0, y0), (x0 + w, y0 + h)],
        WHITE.mix(0.8).filled(),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new(
        [(x0, y0), (x0 + w, y0 + h)],
        RGBColor(204, 204, 204).stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut y = y0 + metrics.pad;
    if !title.trim().is_empty() {
        let title_style = TextStyle::from((FontFamily::SansSerif, metrics.title_px))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        area.draw(&Text::new(title, (x0 + w / 2, y), title_style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += line_height_px(metrics.title_px);
    }

    let row_h = line_height_px(metrics.font_px);
    let label_style = TextStyle::from((FontFamily::SansSerif, metrics.font_px))
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let swatch_h = (metrics.font_px as i32 * 2 / 3).max(2);
    for entry in entries {
        let cy = y + row_h / 2;
        let sx = x0 + metrics.pad;
        area.draw(&Rectangle::new(
            [(sx, cy - swatch_h / 2), (sx + metrics.swatch_w, cy + swatch_h / 2)],
            entry.color.mix(fill_alpha).filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&Text::new(
            entry.label.clone(),
            (sx + metrics.swatch_w + metrics.swatch_gap, cy),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += row_h;
    }
    Ok(())
}
