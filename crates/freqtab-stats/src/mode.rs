//! Raw and Czuber modes with multimodal support.
//!
//! The modal classes are the classes with the maximum simple frequency. When
//! every class has that frequency the distribution is amodal: no class
//! dominates, the raw mode is undefined and the Czuber mode falls back to the
//! mean of the class midpoints.
//!
//! # Czuber interpolation
//!
//! For a modal class with lower bound `L` and width `h`:
//!
//! ```text
//! d1 = fi[modal] - fi[modal - 1]
//! d2 = fi[modal] - fi[modal + 1]
//! Mo = L + d1 / (d1 + d2) × h
//! ```
//!
//! The treatment of a modal class without a predecessor or successor is
//! selected by [`CzuberBoundary`].

use serde::Serialize;

use crate::{approx_eq, config::CzuberBoundary, table::CompletedTable};

/// One or more mode values, sorted ascending without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ModeEstimate {
    /// No mode exists.
    Undefined,
    /// A single mode.
    Unimodal(f64),
    /// Several distinct modes, ascending.
    Multimodal(Vec<f64>),
}

impl ModeEstimate {
    /// Sorts and deduplicates `values`, then classifies them.
    ///
    /// Values within `tolerance` (relative to their magnitude) of each other
    /// count as the same mode. Non-finite values are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::ModeEstimate;
    ///
    /// let modes = ModeEstimate::from_values([25.0, 21.0, 25.000_000_000_001], 1e-9);
    /// assert_eq!(modes, ModeEstimate::Multimodal(vec![21.0, 25.0]));
    /// assert_eq!(ModeEstimate::from_values([23.0, 23.0], 1e-9), ModeEstimate::Unimodal(23.0));
    /// assert!(ModeEstimate::from_values(Vec::new(), 1e-9).is_undefined());
    /// ```
    #[must_use]
    pub fn from_values<I>(values: I, tolerance: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|later, kept| approx_eq(*later, *kept, tolerance));
        match values.len() {
            0 => Self::Undefined,
            1 => Self::Unimodal(values[0]),
            _ => Self::Multimodal(values),
        }
    }

    /// All mode values, ascending. Empty when undefined.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Undefined => &[],
            Self::Unimodal(value) => std::slice::from_ref(value),
            Self::Multimodal(values) => values,
        }
    }
}

/// Returns the common frequency of a flat (amodal) distribution.
///
/// `None` if the table is empty or some class has a lower frequency than
/// another.
#[must_use]
pub fn amodal_frequency(table: &CompletedTable, tolerance: f64) -> Option<f64> {
    let first = table.rows().first()?.fi;
    table
        .rows()
        .iter()
        .all(|row| approx_eq(row.fi, first, tolerance))
        .then_some(first)
}

/// Indices of the classes with the maximum simple frequency, ascending.
///
/// `None` if the table is empty or amodal.
#[must_use]
pub fn modal_classes(table: &CompletedTable, tolerance: f64) -> Option<Vec<usize>> {
    if table.is_empty() || amodal_frequency(table, tolerance).is_some() {
        return None;
    }
    let max_fi = table
        .rows()
        .iter()
        .map(|row| row.fi)
        .fold(f64::NEG_INFINITY, f64::max);
    let indices = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| approx_eq(row.fi, max_fi, tolerance))
        .map(|(i, _)| i)
        .collect();
    Some(indices)
}

/// Midpoint(s) of the modal class(es).
///
/// # Examples
///
/// ```
/// use freqtab_stats::{ModeEstimate, RawRow, Table, mode::raw_mode, reconcile::reconcile};
///
/// let rows = [
///     RawRow::new("8-10", "2", ""),
///     RawRow::new("10-12", "6", ""),
///     RawRow::new("12-14", "10", ""),
/// ];
/// let (table, _) = Table::from_raw_rows(&rows).unwrap();
/// let (table, _) = reconcile(table).unwrap();
/// assert_eq!(raw_mode(&table, 1e-9), ModeEstimate::Unimodal(13.0));
/// ```
#[must_use]
pub fn raw_mode(table: &CompletedTable, tolerance: f64) -> ModeEstimate {
    let Some(modal) = modal_classes(table, tolerance) else {
        return ModeEstimate::Undefined;
    };
    let rows = table.rows();
    ModeEstimate::from_values(modal.into_iter().map(|i| rows[i].midpoint), tolerance)
}

/// Czuber-interpolated mode(s), one per modal class before deduplication.
///
/// Distinct modal classes may interpolate to the same value, so the result
/// can hold fewer modes than [`raw_mode`].
#[must_use]
pub fn czuber_mode(
    table: &CompletedTable,
    boundary: CzuberBoundary,
    tolerance: f64,
) -> ModeEstimate {
    let rows = table.rows();
    if rows.is_empty() {
        return ModeEstimate::Undefined;
    }
    let Some(modal) = modal_classes(table, tolerance) else {
        #[expect(clippy::cast_precision_loss)]
        let center = rows.iter().map(|row| row.midpoint).sum::<f64>() / rows.len() as f64;
        return ModeEstimate::Unimodal(center);
    };

    let modes = modal
        .into_iter()
        .map(|index| czuber_class_mode(table, index, boundary))
        .collect::<Vec<_>>();
    ModeEstimate::from_values(modes, tolerance)
}

fn czuber_class_mode(table: &CompletedTable, index: usize, boundary: CzuberBoundary) -> f64 {
    let rows = table.rows();
    let class = &rows[index];
    let previous = index.checked_sub(1).map(|i| rows[i].fi);
    let next = rows.get(index + 1).map(|row| row.fi);

    // Tied neighbours may differ by rounding noise; modal classes never have
    // a strictly larger neighbour.
    let d1 = (class.fi - previous.unwrap_or(0.0)).max(0.0);
    let d2 = (class.fi - next.unwrap_or(0.0)).max(0.0);

    let interpolate = match boundary {
        CzuberBoundary::ZeroNeighbor => d1 > 0.0 || d2 > 0.0,
        CzuberBoundary::RawModeFallback => {
            previous.is_some() && next.is_some() && d1 > 0.0 && d2 > 0.0
        }
    };
    if !interpolate {
        log::trace!("class '{}': Czuber mode falls back to midpoint", class.label);
        return class.midpoint;
    }
    class.lower + d1 / (d1 + d2) * class.width
}
