//! The full pipeline: parse, validate, reconcile, then compute statistics.

use serde::Serialize;

use crate::{
    FreqTableError, consistency,
    config::EngineConfig,
    median,
    mode::{self, ModeEstimate},
    moments::MomentStatistics,
    reconcile,
    table::{CompletedTable, RawRow, Table},
    warning::Warning,
};

/// Descriptive statistics of a grouped frequency distribution.
///
/// Carries the completed table for display and every advisory warning
/// collected on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsResult {
    /// The reconciled table, sorted by lower bound.
    pub table: CompletedTable,
    /// `Σ fi`.
    pub total_frequency: f64,
    pub mean: f64,
    /// Interpolated median; `None` when no median class can be located.
    pub median: Option<f64>,
    /// Midpoints of the modal classes; undefined for an amodal distribution.
    pub raw_modes: ModeEstimate,
    /// Czuber-interpolated modes.
    pub czuber_modes: ModeEstimate,
    /// Population variance.
    pub variance: f64,
    pub std_dev: f64,
    /// Coefficient of variation in percent; `None` when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
    /// Advisory findings, in the order they were produced.
    pub warnings: Vec<Warning>,
}

impl StatisticsResult {
    /// Computes the statistics of an already reconciled table.
    ///
    /// # Errors
    ///
    /// Returns [`FreqTableError::ZeroTotalFrequency`] if `Σ fi` is zero.
    pub fn from_table(
        table: CompletedTable,
        config: &EngineConfig,
        mut warnings: Vec<Warning>,
    ) -> Result<Self, FreqTableError> {
        let moments =
            MomentStatistics::from_table(&table).ok_or(FreqTableError::ZeroTotalFrequency)?;
        let median = median::median(&table);

        if let Some(frequency) = mode::amodal_frequency(&table, config.mode_tolerance) {
            warnings.push(Warning::Amodal { frequency });
        }
        let raw_modes = mode::raw_mode(&table, config.mode_tolerance);
        let czuber_modes = mode::czuber_mode(&table, config.czuber_boundary, config.mode_tolerance);

        log::debug!(
            "computed statistics for {} classes (n = {})",
            table.len(),
            moments.total_frequency
        );

        Ok(Self {
            table,
            total_frequency: moments.total_frequency,
            mean: moments.mean,
            median,
            raw_modes,
            czuber_modes,
            variance: moments.variance,
            std_dev: moments.std_dev,
            coefficient_of_variation: moments.coefficient_of_variation,
            warnings,
        })
    }
}

/// Runs the whole engine over a snapshot of editor rows.
///
/// Blank-label rows are ignored. Overlaps, gaps, heterogeneous widths,
/// unparsed frequency cells, supplied values that disagree with derived ones
/// and amodal distributions are reported in
/// [`StatisticsResult::warnings`].
///
/// # Errors
///
/// Any [`FreqTableError`] raised while parsing or reconciling aborts the
/// computation; no partial result is returned.
///
/// # Examples
///
/// ```
/// use freqtab_stats::{EngineConfig, FreqTableError, RawRow, analyze};
///
/// let rows = [RawRow::new("8-10", "", "2"), RawRow::new("10-12", "", "1")];
/// let err = analyze(&rows, &EngineConfig::default()).unwrap_err();
/// assert!(matches!(err, FreqTableError::Order { .. }));
/// ```
pub fn analyze<'a, I>(rows: I, config: &EngineConfig) -> Result<StatisticsResult, FreqTableError>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let (table, mut warnings) = Table::from_raw_rows(rows)?;
    warnings.extend(consistency::check_adjacency(&table));
    let width_warning = consistency::check_widths(&table, config.width_tolerance);

    let (completed, reconcile_warnings) = reconcile::reconcile(table)?;
    warnings.extend(reconcile_warnings);
    warnings.extend(width_warning);

    StatisticsResult::from_table(completed, config, warnings)
}
