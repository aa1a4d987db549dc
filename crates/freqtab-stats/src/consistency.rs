//! Geometric consistency checks over sorted class intervals.
//!
//! All findings are advisory: overlapping, gapped or unequal-width classes
//! still produce statistics, but some formulas (notably the Czuber mode)
//! assume contiguous classes of equal width.

use crate::{table::Table, warning::Warning};

/// Absolute tolerance of the width comparison.
const WIDTH_ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Reports overlaps and gaps between adjacent classes.
///
/// `table` must be sorted by lower bound, which [`Table`] guarantees.
///
/// # Examples
///
/// ```
/// use freqtab_stats::{RawRow, Table, consistency::check_adjacency};
///
/// let rows = [RawRow::new("0-10", "1", ""), RawRow::new("12-20", "1", "")];
/// let (table, _) = Table::from_raw_rows(&rows).unwrap();
/// let warnings = check_adjacency(&table);
/// assert_eq!(warnings.len(), 1);
/// assert!(warnings[0].is_gap());
/// ```
#[must_use]
pub fn check_adjacency(table: &Table) -> Vec<Warning> {
    table
        .rows()
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.lower() < previous.upper() {
                Some(Warning::Overlap {
                    previous: previous.label.clone(),
                    current: current.label.clone(),
                })
            } else if current.lower() > previous.upper() {
                Some(Warning::Gap {
                    previous: previous.label.clone(),
                    current: current.label.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Reports classes whose width differs from the first class's width.
///
/// Widths `w` are accepted while `|w - w0| <= 1e-8 + tolerance * |w0|`.
#[must_use]
pub fn check_widths(table: &Table, tolerance: f64) -> Option<Warning> {
    let reference = table.rows().first()?.width();
    let homogeneous = table.rows().iter().all(|row| {
        (row.width() - reference).abs() <= WIDTH_ABSOLUTE_TOLERANCE + tolerance * reference.abs()
    });
    if homogeneous {
        return None;
    }

    let (min_width, max_width) = table
        .rows()
        .iter()
        .map(|row| row.width())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), w| {
            (min.min(w), max.max(w))
        });
    Some(Warning::HeterogeneousWidth {
        min_width,
        max_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ClassRow;

    fn table(bounds: &[(f64, f64)]) -> Table {
        Table::from_rows(
            bounds
                .iter()
                .map(|&(l, u)| ClassRow::new(format!("{l}-{u}"), l, u).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_contiguous_classes() {
        let table = table(&[(8.0, 10.0), (10.0, 12.0), (12.0, 14.0)]);
        assert!(check_adjacency(&table).is_empty());
        assert!(check_widths(&table, 1e-5).is_none());
    }

    #[test]
    fn test_overlap_and_gap() {
        let table = table(&[(0.0, 10.0), (9.0, 19.0), (20.0, 30.0)]);
        let warnings = check_adjacency(&table);
        assert_eq!(
            warnings,
            [
                Warning::Overlap {
                    previous: "0-10".to_owned(),
                    current: "9-19".to_owned(),
                },
                Warning::Gap {
                    previous: "9-19".to_owned(),
                    current: "20-30".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_adjacency_uses_sorted_order() {
        let table = table(&[(20.0, 30.0), (0.0, 10.0), (10.0, 20.0)]);
        assert!(check_adjacency(&table).is_empty());
    }

    #[test]
    fn test_heterogeneous_width() {
        let table = table(&[(0.0, 2.0), (2.0, 4.0), (4.0, 10.0)]);
        assert_eq!(
            check_widths(&table, 1e-5),
            Some(Warning::HeterogeneousWidth {
                min_width: 2.0,
                max_width: 6.0,
            })
        );
    }

    #[test]
    fn test_width_tolerance() {
        let table = table(&[(0.0, 0.1), (0.1, 0.2), (0.2, 0.3)]);
        // 0.2 - 0.1 and 0.3 - 0.2 are not exactly 0.1 in binary
        assert!(check_widths(&table, 1e-5).is_none());
        assert!(check_widths(&Table::default(), 1e-5).is_none());
    }
}
