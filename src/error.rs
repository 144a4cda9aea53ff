//! Error type for loading planting tables and validating chart configuration.

use thiserror::Error;

/// Data and configuration failures. All of them abort the run.
#[derive(Error, Debug)]
pub enum PlantingError {
    #[error("input file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported input format: {0:?} (expected .xlsx/.xlsm/.xlsb/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("sheet has no header row")]
    EmptySheet,

    #[error("missing column {0:?}")]
    MissingColumn(String),

    #[error("invalid value {value:?} in row {row}, column {column:?}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("invalid year range {lo}..={hi}")]
    InvalidRange { lo: i32, hi: i32 },

    #[error("species {0:?} is listed more than once")]
    DuplicateSpecies(String),

    #[error("no species configured")]
    NoSpecies,

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    #[error("invalid figure {width_in}x{height_in} in at {dpi} dpi")]
    InvalidFigure { width_in: f64, height_in: f64, dpi: u32 },
}
