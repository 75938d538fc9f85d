/// Data layer: core types, loading, aggregation, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet      (or the built-in fallback table)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + validate → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  region / country membership → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ metrics / views  │  sums, shares, top-N, ranking, density
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export  │  filtered rows → .csv / .json
///   └──────────┘
/// ```

pub mod export;
pub mod fallback;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod views;

use thiserror::Error;

/// Schema and content problems detected while building a [`model::Dataset`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: country name is empty")]
    EmptyCountry { row: usize },
    #[error("country '{0}' appears more than once")]
    DuplicateCountry(String),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
