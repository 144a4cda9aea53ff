//! Per-city chart configuration and the built-in city presets.
//!
//! A [`CityConfig`] carries everything the pipeline needs for one figure: the input
//! spreadsheet, the species to stack (with their colors), axis and legend settings,
//! and the milestones to annotate. Presets reproduce the Calgary and Winnipeg figures;
//! other cities can be described in JSON and loaded with [`CityConfig::from_json_file`].

use crate::error::PlantingError;
use crate::models::{LabelAlign, Milestone, PlantingTable, YearRange};
use crate::viz::palette::parse_color;
use crate::viz::types::{DEFAULT_FILL_ALPHA, Figure, LegendCorner, YAxisMode};
use anyhow::{Context, Result};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Names accepted by [`CityConfig::preset`].
pub const PRESETS: [&str; 2] = ["calgary", "winnipeg"];

/// One stacked layer: a species column and its fill color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub name: String,
    /// CSS color name or `#RRGGBB`.
    pub color: String,
}

/// Ordered species list. The first entry is the bottom layer and the first legend row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesConfig {
    pub entries: Vec<SpeciesEntry>,
}

impl SpeciesConfig {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(name, color)| SpeciesEntry {
                    name: name.to_string(),
                    color: color.to_string(),
                })
                .collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the list itself and resolve every color, in species order.
    pub fn resolve_colors(&self) -> Result<Vec<RGBColor>, PlantingError> {
        if self.entries.is_empty() {
            return Err(PlantingError::NoSpecies);
        }
        let mut seen = BTreeSet::new();
        let mut colors = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(PlantingError::DuplicateSpecies(entry.name.clone()));
            }
            colors.push(parse_color(&entry.color)?);
        }
        Ok(colors)
    }

    /// Every configured species must be a column of `table`.
    pub fn check_columns(&self, table: &PlantingTable) -> Result<(), PlantingError> {
        match self.entries.iter().find(|e| !table.has_column(&e.name)) {
            Some(missing) => Err(PlantingError::MissingColumn(missing.name.clone())),
            None => Ok(()),
        }
    }
}

/// Axis, legend, figure and output settings for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub range: YearRange,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub legend_corner: LegendCorner,
    pub y_axis: YAxisMode,
    #[serde(default)]
    pub figure: Figure,
    #[serde(default = "default_fill_alpha")]
    pub fill_alpha: f64,
    /// Tick label locale tag (`en`, `de`, `fr`, ...).
    #[serde(default = "default_locale")]
    pub locale: String,
    pub output: PathBuf,
}

fn default_fill_alpha() -> f64 {
    DEFAULT_FILL_ALPHA
}

fn default_locale() -> String {
    "en".to_string()
}

impl ChartConfig {
    fn standard(range: YearRange, corner: LegendCorner, y_axis: YAxisMode, output: &str) -> Self {
        Self {
            range,
            x_label: "Year".into(),
            y_label: "Number of Trees".into(),
            legend_title: "Species Planted".into(),
            legend_corner: corner,
            y_axis,
            figure: Figure::default(),
            fill_alpha: DEFAULT_FILL_ALPHA,
            locale: default_locale(),
            output: PathBuf::from(output),
        }
    }
}

/// Everything needed to produce one city's figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    pub input: PathBuf,
    pub species: SpeciesConfig,
    pub chart: ChartConfig,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl CityConfig {
    /// Calgary, 1913–1941. Y axis derived from the data.
    pub fn calgary() -> Self {
        Self {
            name: "Calgary".into(),
            input: PathBuf::from("Calgary.xlsx"),
            species: SpeciesConfig::from_pairs(&[
                ("Poplars (incl. Cottonwoods)", "CornflowerBlue"),
                ("Spruce", "DarkGreen"),
                ("Ash", "olivedrab"),
                ("Elm", "Sienna"),
                ("Birch", "GoldenRod"),
                ("Maple", "Crimson"),
                ("Other", "LightSalmon"),
                ("Unknown", "LightGray"),
            ]),
            chart: ChartConfig::standard(
                YearRange { lo: 1913, hi: 1941 },
                LegendCorner::UpperRight,
                YAxisMode::Derived,
                "Species Planted - Calgary.png",
            ),
            milestones: vec![
                Milestone::new(1922, "Maple More than 50% \nof Annual Planting", 2500.0),
                Milestone::new(1925, "Ash More than 20% \nof Annual Planting", 1500.0),
                Milestone::new(1929, "First Year Elm \nis Planted", 2500.0),
                Milestone::new(1935, "Poplar Less than 30% \nof Annual Planting", 1000.0),
            ],
        }
    }

    /// Winnipeg, 1945–1971. Y axis left open; two labels sit left of their markers.
    pub fn winnipeg() -> Self {
        Self {
            name: "Winnipeg".into(),
            input: PathBuf::from("Winnipeg.xlsx"),
            species: SpeciesConfig::from_pairs(&[
                ("Elm", "Sienna"),
                ("Ash", "olivedrab"),
                ("Birch", "GoldenRod"),
                ("Linden/Basswood", "lightgreen"),
                ("Cherries, Apples, and Plums", "Crimson"),
                ("Ornamental", "CornflowerBlue"),
                ("Other", "LightSalmon"),
                ("Unknown", "LightGray"),
            ]),
            chart: ChartConfig::standard(
                YearRange { lo: 1945, hi: 1971 },
                LegendCorner::UpperLeft,
                YAxisMode::Unbounded,
                "Species Planted - Winnipeg.png",
            ),
            milestones: vec![
                Milestone::new(1946, "Six Ash Trees \nPlanted", 1000.0),
                Milestone::new(1949, "230 Ash Trees \nPlanted", 800.0),
                Milestone::new(1958, "First Year Ornamental \nSpecies are Planted", 2500.0)
                    .aligned(LabelAlign::Right),
                Milestone::new(1960, "Ornamental Species \nDifferentiated", 2300.0),
                Milestone::new(1966, "First DED-Resistant \nElm Species Planted", 2000.0),
                Milestone::new(1970, "49 Siberian \nElm Planted", 1200.0)
                    .aligned(LabelAlign::Right),
            ],
        }
    }

    /// Look up a built-in preset by (case-insensitive) city name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "calgary" => Some(Self::calgary()),
            "winnipeg" => Some(Self::winnipeg()),
            _ => None,
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: CityConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Checks that need no data: range order, species list and colors.
    pub fn validate(&self) -> Result<Vec<RGBColor>, PlantingError> {
        self.chart.range.validate()?;
        self.chart.figure.validate()?;
        self.species.resolve_colors()
    }
}
