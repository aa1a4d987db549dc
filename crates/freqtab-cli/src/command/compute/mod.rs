//! Table completion and statistics command
//!
//! Reads the editor rows of a grouped frequency table, fills in the missing
//! frequency column and reports the descriptive statistics as text or JSON.

mod table;

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use freqtab_stats::{Cell, CzuberBoundary, EngineConfig, FreqTableError, RawRow};

use crate::util::{self, Output};

/// Fewer non-blank classes than this are rejected before computing anything.
const MIN_CLASSES: usize = 2;

const CLASS_FORMAT_HINT: &str = "\
Hint for class labels:
  - Use formats such as \"8-10\", \"8 a 10\" or \"8 até 10\"
  - Separate the two numbers with a hyphen, \"a\" or \"até\"
  - Other separators such as \":\" or \"/\" are not recognized
  - The lower bound must be below the upper bound";

const FREQUENCY_HINT: &str = "\
Hint for frequencies:
  - Provide at least one complete column (fi or faq)
  - Cumulative frequencies (faq) must be in non-decreasing order
  - Make sure every value is a non-negative number";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How the Czuber mode treats a modal class without a neighbour on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Boundary {
    /// Missing neighbours count as frequency zero
    Zero,
    /// Use the raw mode unless the modal class is interior with positive differences
    Fallback,
}

impl From<Boundary> for CzuberBoundary {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Zero => CzuberBoundary::ZeroNeighbor,
            Boundary::Fallback => CzuberBoundary::RawModeFallback,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ComputeArg {
    /// Path to the table rows JSON file (`-` reads from stdin)
    #[arg(required_unless_present = "demo", conflicts_with = "demo")]
    pub input: Option<PathBuf>,

    /// Use the built-in multimodal example table instead of an input file
    #[arg(long)]
    pub demo: bool,

    /// Engine configuration JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Czuber boundary convention: "zero" or "fallback" (overrides --config)
    #[arg(long)]
    pub czuber_boundary: Option<Boundary>,

    /// Relative tolerance of the class width check (overrides --config)
    #[arg(long)]
    pub width_tolerance: Option<f64>,

    /// Output format: "text" or "json"
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ComputeArg) -> anyhow::Result<()> {
    let config = load_config(arg)?;
    let rows = match &arg.input {
        Some(path) => util::read_rows_file(path)?,
        None => demo_rows(),
    };
    log::debug!("loaded {} rows", rows.len());

    let classes = rows.iter().filter(|row| !row.is_blank()).count();
    if classes < MIN_CLASSES {
        anyhow::bail!("Please enter at least {MIN_CLASSES} classes with values (got {classes})");
    }

    let result = match freqtab_stats::analyze(&rows, &config) {
        Ok(result) => result,
        Err(err) => {
            if let Some(hint) = guidance(&err) {
                eprintln!("{hint}");
            }
            return Err(err).context("Failed to process the frequency table");
        }
    };

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Text => {
            table::write_report(&mut output, &result)
                .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
            output.finish()?;
        }
        OutputFormat::Json => output.write_json(&result)?,
    }

    if let Output::File { path, .. } = &output {
        eprintln!("Statistics saved to: {}", path.display());
    }
    Ok(())
}

fn load_config(arg: &ComputeArg) -> anyhow::Result<EngineConfig> {
    let mut config = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(boundary) = arg.czuber_boundary {
        config.czuber_boundary = boundary.into();
    }
    if let Some(tolerance) = arg.width_tolerance {
        config.width_tolerance = tolerance;
    }
    anyhow::ensure!(
        config.width_tolerance.is_finite() && config.width_tolerance >= 0.0,
        "width tolerance must be a non-negative number, got {}",
        config.width_tolerance
    );
    log::debug!("engine config: {config:?}");
    Ok(config)
}

/// Multimodal example table
fn demo_rows() -> Vec<RawRow> {
    [
        ("15-19", 5.0),
        ("19-23", 13.0),
        ("23-27", 13.0),
        ("27-31", 11.0),
        ("31-35", 10.0),
    ]
    .into_iter()
    .map(|(class, fi)| RawRow::new(class, fi, Cell::Empty))
    .collect()
}

fn guidance(err: &FreqTableError) -> Option<&'static str> {
    if err.is_parse() || err.is_invalid_interval() {
        Some(CLASS_FORMAT_HINT)
    } else if err.is_insufficient_data()
        || err.is_order()
        || err.is_incomplete_reconciliation()
        || err.is_negative_frequency()
    {
        Some(FREQUENCY_HINT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_rows_are_multimodal() {
        let result = freqtab_stats::analyze(&demo_rows(), &EngineConfig::default()).unwrap();
        assert_eq!(result.raw_modes.values(), &[21.0, 25.0]);
        assert_eq!(result.total_frequency, 52.0);
    }

    #[test]
    fn test_guidance() {
        let parse = FreqTableError::Parse {
            label: "x".to_owned(),
        };
        assert_eq!(guidance(&parse), Some(CLASS_FORMAT_HINT));
        assert_eq!(
            guidance(&FreqTableError::InsufficientData),
            Some(FREQUENCY_HINT)
        );
        assert_eq!(guidance(&FreqTableError::ZeroTotalFrequency), None);
    }

    #[test]
    fn test_option_values() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            CzuberBoundary::from("fallback".parse::<Boundary>().unwrap()),
            CzuberBoundary::RawModeFallback
        );
        assert!("median".parse::<Boundary>().is_err());
    }
}
