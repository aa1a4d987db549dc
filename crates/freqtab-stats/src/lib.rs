//! Descriptive statistics for grouped frequency distributions.
//!
//! This crate turns a table of class intervals with partially known simple
//! (`fi`) and cumulative (`faq`) frequencies into a complete frequency table
//! and computes its descriptive statistics:
//!
//! - **Interval parsing**: free-text class labels such as `"8-10"`, `"8 a 10"`
//!   or `"8 até 10"` become numeric bounds
//! - **Consistency checks**: overlaps, gaps and heterogeneous class widths are
//!   reported as advisory warnings
//! - **Frequency reconciliation**: the missing frequency column is derived from
//!   the one supplied
//! - **Statistics**: mean, variance, standard deviation, coefficient of
//!   variation, interpolated median, raw mode(s) and Czuber mode(s)
//!
//! # Modules
//!
//! - [`interval`]: Class label parsing
//! - [`table`]: Raw input rows, parsed class rows and the completed table
//! - [`consistency`]: Geometric consistency checks over sorted classes
//! - [`reconcile`]: Derivation of the missing frequency column
//! - [`moments`]: Mean, variance, standard deviation and coefficient of variation
//! - [`median`]: Median class lookup and linear interpolation
//! - [`mode`]: Raw and Czuber mode estimation with multimodal support
//! - [`analysis`]: The full pipeline producing a [`StatisticsResult`]
//!
//! # Examples
//!
//! ```
//! use freqtab_stats::{EngineConfig, RawRow, analyze};
//!
//! let rows = [
//!     RawRow::new("15-19", "5", ""),
//!     RawRow::new("19-23", "13", ""),
//!     RawRow::new("23-27", "13", ""),
//!     RawRow::new("27-31", "11", ""),
//!     RawRow::new("31-35", "10", ""),
//! ];
//! let result = analyze(&rows, &EngineConfig::default()).unwrap();
//! assert!((result.mean - 25.615).abs() < 1e-3);
//! assert_eq!(result.raw_modes.values(), &[21.0, 25.0]);
//! assert_eq!(result.czuber_modes.values(), &[23.0]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::{
    analysis::{StatisticsResult, analyze},
    config::{CzuberBoundary, EngineConfig},
    mode::ModeEstimate,
    table::{Cell, ClassRow, CompletedRow, CompletedTable, RawRow, Table},
    warning::Warning,
};

pub mod analysis;
pub mod config;
pub mod consistency;
pub mod interval;
pub mod median;
pub mod mode;
pub mod moments;
pub mod reconcile;
pub mod table;
pub mod warning;

/// Which frequency column a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyColumn {
    /// Simple frequency (`fi`).
    Simple,
    /// Cumulative frequency (`faq`).
    Cumulative,
}

impl fmt::Display for FrequencyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("fi"),
            Self::Cumulative => f.write_str("faq"),
        }
    }
}

/// Failures that abort the whole computation.
///
/// None of these are transient: each one points at malformed input.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum FreqTableError {
    #[display("could not extract class limits from '{label}'")]
    Parse { label: String },
    #[display("class '{label}' has lower bound {lower} not below upper bound {upper}")]
    InvalidInterval { label: String, lower: f64, upper: f64 },
    #[display("class '{label}' has negative {column} value {value}")]
    NegativeFrequency {
        label: String,
        column: FrequencyColumn,
        value: f64,
    },
    #[display("either the fi or the faq column must be provided")]
    InsufficientData,
    #[display(
        "faq values must be non-decreasing, but class '{label}' has {current} after {previous}"
    )]
    Order {
        label: String,
        previous: f64,
        current: f64,
    },
    #[display(
        "could not derive every missing fi/faq value; provide more data for: {}",
        labels.join(", ")
    )]
    IncompleteReconciliation { labels: Vec<String> },
    /// `Σ fi` is zero, so mean, variance and median are all undefined.
    ///
    /// Raised instead of returning a result whose every statistic is
    /// indeterminate.
    #[display("total frequency is zero")]
    ZeroTotalFrequency,
}

/// Compares two values with a tolerance relative to their magnitude.
///
/// Magnitudes below 1 use the tolerance as an absolute bound.
pub(crate) fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
