//! species_planted
//!
//! Chart historical annual tree planting by species as an annotated stacked-area figure.
//! Pairs with the `species-planted` CLI and the `species-planted-gui` desktop app.
//!
//! ### Features
//! - Load a planting sheet (`.xlsx`/`.xls`/`.ods` workbook or `.csv`) keyed by year and species
//! - Keep an inclusive year range
//! - Stack species in a configured order with fixed colors, legend inside the plot
//! - Annotate curated milestones with a reference line, a dot and a label
//! - Save PNG/SVG at a fixed DPI and show the result in a window
//! - Built-in Calgary and Winnipeg presets; other cities via JSON config
//!
//! ### Example
//! ```no_run
//! use species_planted::{CityConfig, storage, viz};
//!
//! let cfg = CityConfig::calgary();
//! let table = storage::load_table(&cfg.input)?;
//! let out = viz::plot_city(&table, &cfg, None)?;
//! println!("wrote {}", out.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod present;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::{CityConfig, SpeciesConfig};
pub use error::PlantingError;
pub use models::{LabelAlign, Milestone, PlantingRecord, PlantingTable, YearRange};
pub use pipeline::{RunOptions, RunReport, run};
