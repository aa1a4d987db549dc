//! Derivation of the missing frequency column.
//!
//! Two passes run in a fixed order:
//!
//! 1. If `fi` has gaps and some `faq` is known, `fi` is derived from `faq`:
//!    `fi[0] = faq[0]` and `fi[i] = faq[i] - faq[i-1]` wherever both
//!    cumulative values are known. The known `faq` values must be
//!    non-decreasing.
//! 2. If `fi` is now complete, `faq` becomes the running sum of `fi`. Supplied
//!    `faq` values that disagree with it are replaced.
//!
//! Any value still unknown afterwards fails the reconciliation.

use crate::{
    FreqTableError, FrequencyColumn, approx_eq,
    table::{CompletedTable, Table},
    warning::Warning,
};

const MISMATCH_TOLERANCE: f64 = 1e-9;

/// Completes both frequency columns of `table`.
///
/// A supplied value that disagrees with the value derived from the other
/// column is replaced and reported as [`Warning::FrequencyMismatch`].
///
/// # Errors
///
/// - [`FreqTableError::InsufficientData`] if neither column holds any value
/// - [`FreqTableError::Order`] if known `faq` values decrease while `fi` is
///   being derived from them
/// - [`FreqTableError::IncompleteReconciliation`] if gaps remain in either
///   column after both passes
///
/// # Examples
///
/// ```
/// use freqtab_stats::{RawRow, Table, reconcile::reconcile};
///
/// let rows = [
///     RawRow::new("8-10", "", "2"),
///     RawRow::new("10-12", "", "8"),
///     RawRow::new("12-14", "", "18"),
/// ];
/// let (table, _) = Table::from_raw_rows(&rows).unwrap();
/// let (completed, warnings) = reconcile(table).unwrap();
/// assert!(warnings.is_empty());
/// let fi = completed.rows().iter().map(|r| r.fi).collect::<Vec<_>>();
/// assert_eq!(fi, [2.0, 6.0, 10.0]);
/// ```
pub fn reconcile(mut table: Table) -> Result<(CompletedTable, Vec<Warning>), FreqTableError> {
    let rows = table.rows();
    let any_fi = rows.iter().any(|r| r.fi.is_some());
    let any_faq = rows.iter().any(|r| r.faq.is_some());
    if !any_fi && !any_faq {
        return Err(FreqTableError::InsufficientData);
    }

    let mut warnings = vec![];

    if rows.iter().any(|r| r.fi.is_none()) && any_faq {
        derive_simple(&mut table, &mut warnings)?;
    }

    // Also runs when faq is already complete, so supplied faq values are
    // always checked against the running sum of fi.
    if table.rows().iter().all(|r| r.fi.is_some()) {
        derive_cumulative(&mut table, &mut warnings);
    }

    match CompletedTable::from_table(&table) {
        Some(completed) => Ok((completed, warnings)),
        None => {
            let labels = table
                .rows()
                .iter()
                .filter(|r| r.fi.is_none() || r.faq.is_none())
                .map(|r| r.label.clone())
                .collect();
            Err(FreqTableError::IncompleteReconciliation { labels })
        }
    }
}

fn check_cumulative_order(table: &Table) -> Result<(), FreqTableError> {
    let mut previous: Option<f64> = None;
    for row in table.rows() {
        let Some(current) = row.faq else {
            continue;
        };
        if let Some(previous) = previous
            && current < previous
        {
            return Err(FreqTableError::Order {
                label: row.label.clone(),
                previous,
                current,
            });
        }
        previous = Some(current);
    }
    Ok(())
}

fn derive_simple(table: &mut Table, warnings: &mut Vec<Warning>) -> Result<(), FreqTableError> {
    log::debug!("deriving fi from faq");
    check_cumulative_order(table)?;

    let rows = table.rows_mut();
    let derived = (0..rows.len())
        .map(|i| match i {
            0 => rows[0].faq,
            _ => Some(rows[i].faq? - rows[i - 1].faq?),
        })
        .collect::<Vec<_>>();

    for (row, derived) in rows.iter_mut().zip(derived) {
        let Some(derived) = derived else {
            continue;
        };
        if let Some(supplied) = row.fi
            && !approx_eq(supplied, derived, MISMATCH_TOLERANCE)
        {
            warnings.push(Warning::FrequencyMismatch {
                label: row.label.clone(),
                column: FrequencyColumn::Simple,
                supplied,
                derived,
            });
        }
        log::trace!("class '{}': fi = {derived} (from faq)", row.label);
        row.fi = Some(derived);
    }
    Ok(())
}

fn derive_cumulative(table: &mut Table, warnings: &mut Vec<Warning>) {
    log::debug!("deriving faq from fi");
    let mut running = 0.0;
    for row in table.rows_mut() {
        let Some(fi) = row.fi else {
            continue;
        };
        running += fi;
        if let Some(supplied) = row.faq
            && !approx_eq(supplied, running, MISMATCH_TOLERANCE)
        {
            warnings.push(Warning::FrequencyMismatch {
                label: row.label.clone(),
                column: FrequencyColumn::Cumulative,
                supplied,
                derived: running,
            });
        }
        log::trace!("class '{}': faq = {running} (from fi)", row.label);
        row.faq = Some(running);
    }
}
