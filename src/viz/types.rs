//! Public types and constants for the visualization module.

use crate::error::PlantingError;
use serde::{Deserialize, Serialize};

/// Where the framed legend sits inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
}

/// How the top of the Y axis is chosen. The bottom is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YAxisMode {
    /// Largest stacked yearly total times 1.1.
    Derived,
    /// Fit whatever is drawn: stacked totals and milestone heights.
    Unbounded,
}

/// Physical figure size. Pixel size and font scale both follow from the DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    /// A figure needs a positive size and a non-zero DPI to produce a canvas.
    pub fn validate(&self) -> Result<(), PlantingError> {
        let sized = |v: f64| v.is_finite() && v > 0.0;
        if self.dpi == 0 || !sized(self.width_in) || !sized(self.height_in) {
            return Err(PlantingError::InvalidFigure {
                width_in: self.width_in,
                height_in: self.height_in,
                dpi: self.dpi,
            });
        }
        Ok(())
    }

    /// Canvas size in pixels.
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round().max(1.0) as u32,
            (self.height_in * self.dpi as f64).round().max(1.0) as u32,
        )
    }

    /// Convert typographic points (1/72 in) to pixels at this DPI.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Same as [`Figure::pt`], rounded and at least one pixel.
    pub fn pt_px(&self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }

    pub fn with_dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_FIGURE_WIDTH_IN,
            height_in: DEFAULT_FIGURE_HEIGHT_IN,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Resolution of saved figures.
pub const DEFAULT_DPI: u32 = 450;
/// Resolution used for on-screen previews.
pub const PREVIEW_DPI: u32 = 96;
pub const DEFAULT_FIGURE_WIDTH_IN: f64 = 15.0;
pub const DEFAULT_FIGURE_HEIGHT_IN: f64 = 8.0;
/// Opacity of stacked layer fills.
pub const DEFAULT_FILL_ALPHA: f64 = 0.5;
