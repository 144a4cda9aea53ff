//! The per-city pipeline: load, filter, lay out, render, present.

use crate::config::CityConfig;
use crate::present;
use crate::storage;
use crate::viz::{self, ChartScene};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Overrides applied on top of a [`CityConfig`] for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub locale: Option<String>,
    pub font: Option<PathBuf>,
    /// Open a viewer window after writing the image.
    pub show: bool,
}

impl RunOptions {
    /// The configuration with this run's overrides applied.
    pub fn apply(&self, cfg: &CityConfig) -> CityConfig {
        let mut cfg = cfg.clone();
        if let Some(input) = &self.input {
            cfg.input = input.clone();
        }
        if let Some(output) = &self.output {
            cfg.chart.output = output.clone();
        }
        if let Some(dpi) = self.dpi {
            cfg.chart.figure.dpi = dpi;
        }
        if let Some(locale) = &self.locale {
            cfg.chart.locale = locale.clone();
        }
        cfg
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    pub scene: ChartScene,
}

/// Run the whole pipeline for one city. Any data or configuration error stops the run
/// before the output file is created.
pub fn run(cfg: &CityConfig, opts: &RunOptions) -> Result<RunReport> {
    let cfg = opts.apply(cfg);
    let table = storage::load_table(&cfg.input)
        .with_context(|| format!("loading {} data from {}", cfg.name, cfg.input.display()))?;
    let scene = viz::prepare(&table, &cfg)?;
    viz::render_file(&scene, &cfg.chart, &cfg.chart.output, opts.font.as_deref())?;
    info!("{}: wrote {}", cfg.name, cfg.chart.output.display());

    if opts.show {
        // The image is already on disk; a missing display should not fail the run.
        if let Err(e) = present::show(&scene, &cfg.chart, opts.font.as_deref()) {
            warn!("could not display chart: {e:#}");
        }
    }

    Ok(RunReport {
        output: cfg.chart.output,
        scene,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = CityConfig::winnipeg();
        let opts = RunOptions {
            input: Some("data/w.csv".into()),
            dpi: Some(100),
            ..Default::default()
        };
        let cfg = opts.apply(&base);
        assert_eq!(cfg.input, PathBuf::from("data/w.csv"));
        assert_eq!(cfg.chart.figure.dpi, 100);
        assert_eq!(cfg.chart.output, base.chart.output);
        assert_eq!(cfg.chart.locale, "en");
    }

    #[test]
    fn missing_input_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chart.png");
        let opts = RunOptions {
            input: Some(dir.path().join("Calgary.xlsx")),
            output: Some(out.clone()),
            ..Default::default()
        };
        assert!(run(&CityConfig::calgary(), &opts).is_err());
        assert!(!out.exists());
    }
}
