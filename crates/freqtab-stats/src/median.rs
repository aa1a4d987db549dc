//! Median of grouped data by linear interpolation inside the median class.

use crate::table::CompletedTable;

/// Finds the index of the median class.
///
/// The median class is the first class whose cumulative frequency reaches
/// `Σ fi / 2` while the previous class's cumulative frequency is still below
/// it. Returns `None` for an empty table.
#[must_use]
pub fn median_class(table: &CompletedTable) -> Option<usize> {
    let position = table.total_frequency() / 2.0;
    let mut faq_before = 0.0;
    for (i, row) in table.rows().iter().enumerate() {
        if faq_before < position && row.faq >= position {
            return Some(i);
        }
        faq_before = row.faq;
    }
    None
}

/// Interpolated median: `L + ((n/2 - faq_before) / fi) × h`.
///
/// Returns `None` when no median class exists or the median class has zero
/// frequency.
///
/// # Examples
///
/// ```
/// use freqtab_stats::{RawRow, Table, median::median, reconcile::reconcile};
///
/// let rows = [
///     RawRow::new("8-10", "", "2"),
///     RawRow::new("10-12", "", "8"),
///     RawRow::new("12-14", "", "18"),
/// ];
/// let (table, _) = Table::from_raw_rows(&rows).unwrap();
/// let (table, _) = reconcile(table).unwrap();
/// let median = median(&table).unwrap();
/// assert!((median - 12.2).abs() < 1e-9);
/// ```
#[must_use]
pub fn median(table: &CompletedTable) -> Option<f64> {
    let index = median_class(table)?;
    let rows = table.rows();
    let class = &rows[index];
    if class.fi <= 0.0 {
        return None;
    }
    let faq_before = index.checked_sub(1).map_or(0.0, |i| rows[i].faq);
    let position = table.total_frequency() / 2.0;
    Some(class.lower + (position - faq_before) / class.fi * class.width)
}
