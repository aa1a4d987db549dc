use serde::Serialize;

use crate::table::CompletedTable;

/// Moment-based statistics of a grouped distribution.
///
/// Every class is represented by its midpoint `xi` weighted by its simple
/// frequency `fi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MomentStatistics {
    /// `Σ fi`.
    pub total_frequency: f64,
    /// `Σ(fi·xi) / Σ fi`.
    pub mean: f64,
    /// Population variance, `Σ fi·(xi - mean)² / Σ fi`.
    pub variance: f64,
    /// Square root of the variance.
    pub std_dev: f64,
    /// `std_dev / mean × 100`, or `None` when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
}

impl MomentStatistics {
    /// Computes the moments of a completed table.
    ///
    /// # Returns
    ///
    /// * `Some(MomentStatistics)` - if the total frequency is positive
    /// * `None` - if the table is empty or every frequency is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{RawRow, Table, moments::MomentStatistics, reconcile::reconcile};
    ///
    /// let rows = [RawRow::new("0-2", "1", ""), RawRow::new("2-4", "1", "")];
    /// let (table, _) = Table::from_raw_rows(&rows).unwrap();
    /// let (table, _) = reconcile(table).unwrap();
    /// let moments = MomentStatistics::from_table(&table).unwrap();
    /// assert_eq!(moments.mean, 2.0);
    /// assert_eq!(moments.variance, 1.0);
    /// assert_eq!(moments.coefficient_of_variation, Some(50.0));
    /// ```
    #[must_use]
    pub fn from_table(table: &CompletedTable) -> Option<Self> {
        let total_frequency = table.total_frequency();
        if total_frequency <= 0.0 {
            return None;
        }

        let mean = table.total_weighted_value() / total_frequency;
        let variance = table
            .rows()
            .iter()
            .map(|row| row.fi * (row.midpoint - mean).powi(2))
            .sum::<f64>()
            / total_frequency;
        let std_dev = variance.sqrt();
        let coefficient_of_variation = if mean.abs() < f64::EPSILON {
            None
        } else {
            Some(std_dev / mean * 100.0)
        };

        Some(Self {
            total_frequency,
            mean,
            variance,
            std_dev,
            coefficient_of_variation,
        })
    }
}
