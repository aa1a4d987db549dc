//! Frequency table rows at each stage of the pipeline.
//!
//! - [`RawRow`]: a row as supplied by the table editor, all cells textual
//! - [`ClassRow`] / [`Table`]: parsed bounds with possibly unknown frequencies,
//!   sorted by lower bound
//! - [`CompletedRow`] / [`CompletedTable`]: every frequency known, produced by
//!   [`reconcile`](crate::reconcile::reconcile)

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{FreqTableError, FrequencyColumn, interval, warning::Warning};

/// A frequency cell as supplied by the caller.
///
/// JSON input may carry either a number or text; `null` or a missing field
/// means the value is unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }
}

/// Result of reading a [`Cell`].
#[derive(Debug, Clone, PartialEq)]
enum CellValue<'a> {
    Known(f64),
    Unknown,
    Unparsed(&'a str),
}

impl Cell {
    fn value(&self) -> CellValue<'_> {
        match self {
            Self::Empty => CellValue::Unknown,
            Self::Number(v) if v.is_finite() => CellValue::Known(*v),
            Self::Number(_) => CellValue::Unknown,
            Self::Text(text) if text.trim().is_empty() => CellValue::Unknown,
            Self::Text(text) => {
                interval::parse_decimal(text).map_or(CellValue::Unparsed(text), CellValue::Known)
            }
        }
    }
}

/// One row of the input table, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Class label, e.g. `"8-10"`.
    pub class: String,
    /// Simple frequency cell.
    #[serde(default)]
    pub fi: Cell,
    /// Cumulative frequency cell.
    #[serde(default)]
    pub faq: Cell,
}

impl RawRow {
    /// Creates a row from a class label and two frequency cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{Cell, RawRow};
    ///
    /// let row = RawRow::new("8-10", "", 2.0);
    /// assert_eq!(row.fi, Cell::Text(String::new()));
    /// assert_eq!(row.faq, Cell::Number(2.0));
    /// ```
    pub fn new(class: impl Into<String>, fi: impl Into<Cell>, faq: impl Into<Cell>) -> Self {
        Self {
            class: class.into(),
            fi: fi.into(),
            faq: faq.into(),
        }
    }

    /// Returns `true` if the class label is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.class.trim().is_empty()
    }
}

/// One class of the distribution with parsed bounds.
///
/// Width and midpoint are derived from the bounds and kept in sync by
/// [`ClassRow::set_bounds`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRow {
    /// Original label, retained for diagnostics and display.
    pub label: String,
    lower: f64,
    upper: f64,
    width: f64,
    midpoint: f64,
    /// Simple frequency, if known.
    pub fi: Option<f64>,
    /// Cumulative frequency, if known.
    pub faq: Option<f64>,
}

impl ClassRow {
    /// Creates a class row with unknown frequencies.
    ///
    /// # Errors
    ///
    /// Returns [`FreqTableError::InvalidInterval`] unless `lower < upper`.
    pub fn new(label: impl Into<String>, lower: f64, upper: f64) -> Result<Self, FreqTableError> {
        let mut row = Self {
            label: label.into(),
            lower: 0.0,
            upper: 0.0,
            width: 0.0,
            midpoint: 0.0,
            fi: None,
            faq: None,
        };
        row.set_bounds(lower, upper)?;
        Ok(row)
    }

    /// Parses a class label into a row with unknown frequencies.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::ClassRow;
    ///
    /// let row = ClassRow::parse("8 a 10").unwrap();
    /// assert_eq!(row.bounds(), (8.0, 10.0));
    /// assert_eq!(row.width(), 2.0);
    /// assert_eq!(row.midpoint(), 9.0);
    /// ```
    pub fn parse(label: &str) -> Result<Self, FreqTableError> {
        let (lower, upper) = interval::parse_class_limits(label)?;
        Self::new(label.trim(), lower, upper)
    }

    /// Sets both bounds and recomputes width and midpoint.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<(), FreqTableError> {
        if lower.partial_cmp(&upper) != Some(Ordering::Less) {
            return Err(FreqTableError::InvalidInterval {
                label: self.label.clone(),
                lower,
                upper,
            });
        }
        self.lower = lower;
        self.upper = upper;
        self.width = upper - lower;
        self.midpoint = (lower + upper) / 2.0;
        Ok(())
    }

    /// Sets both frequencies, builder style.
    #[must_use]
    pub fn with_frequencies(mut self, fi: Option<f64>, faq: Option<f64>) -> Self {
        self.fi = fi;
        self.faq = faq;
        self
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Class midpoint (`xi`).
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }
}

/// Classes sorted ascending by lower bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<ClassRow>,
}

impl Table {
    /// Builds a table from already parsed rows, sorting them by lower bound.
    #[must_use]
    pub fn from_rows(mut rows: Vec<ClassRow>) -> Self {
        rows.sort_by(|a, b| a.lower.total_cmp(&b.lower));
        Self { rows }
    }

    /// Parses editor rows into a sorted table.
    ///
    /// Rows with a blank label are dropped. Frequency cells holding
    /// non-numeric text are treated as unknown and reported as
    /// [`Warning::UnparsedFrequency`].
    ///
    /// # Errors
    ///
    /// - [`FreqTableError::Parse`] / [`FreqTableError::InvalidInterval`] for a
    ///   bad class label
    /// - [`FreqTableError::NegativeFrequency`] for a negative frequency
    ///
    /// # Examples
    ///
    /// ```
    /// use freqtab_stats::{RawRow, Table};
    ///
    /// let rows = [
    ///     RawRow::new("10-12", "6", ""),
    ///     RawRow::new("", "", ""),
    ///     RawRow::new("8-10", "2", ""),
    /// ];
    /// let (table, warnings) = Table::from_raw_rows(&rows).unwrap();
    /// assert!(warnings.is_empty());
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.rows()[0].label, "8-10");
    /// ```
    pub fn from_raw_rows<'a, I>(rows: I) -> Result<(Self, Vec<Warning>), FreqTableError>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let mut warnings = vec![];
        let mut parsed = vec![];
        for raw in rows {
            if raw.is_blank() {
                continue;
            }
            let row = ClassRow::parse(&raw.class)?;
            let fi = read_frequency(&row.label, FrequencyColumn::Simple, &raw.fi, &mut warnings)?;
            let faq = read_frequency(
                &row.label,
                FrequencyColumn::Cumulative,
                &raw.faq,
                &mut warnings,
            )?;
            parsed.push(row.with_frequencies(fi, faq));
        }
        log::debug!("parsed {} classes", parsed.len());
        Ok((Self::from_rows(parsed), warnings))
    }

    #[must_use]
    pub fn rows(&self) -> &[ClassRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [ClassRow] {
        &mut self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn read_frequency(
    label: &str,
    column: FrequencyColumn,
    cell: &Cell,
    warnings: &mut Vec<Warning>,
) -> Result<Option<f64>, FreqTableError> {
    match cell.value() {
        CellValue::Known(value) if value < 0.0 => Err(FreqTableError::NegativeFrequency {
            label: label.to_owned(),
            column,
            value,
        }),
        CellValue::Known(value) => Ok(Some(value)),
        CellValue::Unknown => Ok(None),
        CellValue::Unparsed(text) => {
            warnings.push(Warning::UnparsedFrequency {
                label: label.to_owned(),
                column,
                text: text.to_owned(),
            });
            Ok(None)
        }
    }
}

/// A class whose frequencies are all known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedRow {
    /// Original class label.
    pub label: String,
    /// Lower bound of the class.
    pub lower: f64,
    /// Upper bound of the class.
    pub upper: f64,
    /// `upper - lower`.
    pub width: f64,
    /// Class midpoint (`xi`).
    pub midpoint: f64,
    /// Simple frequency (`fi`).
    pub fi: f64,
    /// Cumulative frequency (`faq`).
    pub faq: f64,
    /// `fi * xi`.
    pub weighted_value: f64,
}

/// A fully reconciled table, ready for the statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletedTable {
    rows: Vec<CompletedRow>,
    total_frequency: f64,
}

impl CompletedTable {
    /// Builds the table from rows whose frequencies are all known.
    ///
    /// Returns `None` if any `fi` or `faq` is missing.
    pub(crate) fn from_table(table: &Table) -> Option<Self> {
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                let fi = row.fi?;
                let faq = row.faq?;
                Some(CompletedRow {
                    label: row.label.clone(),
                    lower: row.lower,
                    upper: row.upper,
                    width: row.width,
                    midpoint: row.midpoint,
                    fi,
                    faq,
                    weighted_value: fi * row.midpoint,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        let total_frequency = rows.iter().map(|r| r.fi).sum();
        Some(Self {
            rows,
            total_frequency,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[CompletedRow] {
        &self.rows
    }

    /// `Σ fi`.
    #[must_use]
    pub fn total_frequency(&self) -> f64 {
        self.total_frequency
    }

    /// `Σ fi·xi`.
    #[must_use]
    pub fn total_weighted_value(&self) -> f64 {
        self.rows.iter().map(|r| r.weighted_value).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
