//! Text report rendering
//!
//! Derived columns and statistics are shown with two decimals; the engine
//! result itself keeps full precision.

use std::io::{self, Write};

use freqtab_stats::{CompletedTable, ModeEstimate, StatisticsResult, Warning};

// label(16) + 7 * number(10) + spaces(7)
const TABLE_WIDTH: usize = 93;

fn write_frequency_table_header<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(
        w,
        "  {:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Class", "Lower", "Upper", "Width", "xi", "fi", "faq", "fi*xi",
    )?;
    writeln!(w, "  {}", "-".repeat(TABLE_WIDTH))
}

/// Write the completed frequency table with a totals line
fn write_frequency_table<W: Write>(w: &mut W, table: &CompletedTable) -> io::Result<()> {
    write_frequency_table_header(w)?;
    for row in table.rows() {
        writeln!(
            w,
            "  {:<16} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            row.label,
            row.lower,
            row.upper,
            row.width,
            row.midpoint,
            row.fi,
            row.faq,
            row.weighted_value,
        )?;
    }
    writeln!(w, "  {}", "-".repeat(TABLE_WIDTH))?;
    writeln!(
        w,
        "  {:<16} {:>54.2} {:>10} {:>10.2}",
        "Total",
        table.total_frequency(),
        "",
        table.total_weighted_value(),
    )
}

fn format_modes(modes: &ModeEstimate) -> String {
    match modes {
        ModeEstimate::Undefined => "undefined (amodal)".to_owned(),
        ModeEstimate::Unimodal(value) => format!("{value:.2}"),
        ModeEstimate::Multimodal(values) => {
            let values = values
                .iter()
                .map(|value| format!("{value:.2}"))
                .collect::<Vec<_>>();
            format!("{} (multimodal)", values.join(", "))
        }
    }
}

fn format_optional(value: Option<f64>, suffix: &str) -> String {
    value.map_or("N/A".to_owned(), |value| format!("{value:.2}{suffix}"))
}

fn write_statistics<W: Write>(w: &mut W, result: &StatisticsResult) -> io::Result<()> {
    writeln!(w, "  {:<26} {:.2}", "Total frequency (n)", result.total_frequency)?;
    writeln!(w, "  {:<26} {:.2}", "Mean", result.mean)?;
    writeln!(w, "  {:<26} {}", "Median", format_optional(result.median, ""))?;
    writeln!(w, "  {:<26} {}", "Raw mode", format_modes(&result.raw_modes))?;
    writeln!(
        w,
        "  {:<26} {}",
        "Czuber mode",
        format_modes(&result.czuber_modes)
    )?;
    writeln!(w, "  {:<26} {:.2}", "Variance", result.variance)?;
    writeln!(w, "  {:<26} {:.2}", "Standard deviation", result.std_dev)?;
    writeln!(
        w,
        "  {:<26} {}",
        "Coefficient of variation",
        format_optional(result.coefficient_of_variation, "%")
    )
}

fn write_warnings<W: Write>(w: &mut W, warnings: &[Warning]) -> io::Result<()> {
    writeln!(w, "Warnings:")?;
    for warning in warnings {
        writeln!(w, "  - {warning}")?;
    }
    Ok(())
}

fn write_legend<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "Legend:")?;
    writeln!(w, "  xi     : Class midpoint ((lower + upper) / 2)")?;
    writeln!(w, "  fi     : Simple frequency")?;
    writeln!(w, "  faq    : Cumulative frequency")?;
    writeln!(w, "  fi*xi  : Frequency weighted midpoint")
}

/// Write the full text report: table, statistics and warnings
pub(super) fn write_report<W: Write>(w: &mut W, result: &StatisticsResult) -> io::Result<()> {
    writeln!(w, "Complete Frequency Table")?;
    writeln!(w, "========================\n")?;
    write_legend(w)?;
    writeln!(w)?;
    write_frequency_table(w, &result.table)?;
    writeln!(w)?;

    writeln!(w, "Statistics")?;
    writeln!(w, "==========\n")?;
    write_statistics(w, result)?;

    if !result.warnings.is_empty() {
        writeln!(w)?;
        write_warnings(w, &result.warnings)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use freqtab_stats::{EngineConfig, RawRow, analyze};

    use super::*;

    fn render(result: &StatisticsResult) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_modes() {
        assert_eq!(format_modes(&ModeEstimate::Undefined), "undefined (amodal)");
        assert_eq!(format_modes(&ModeEstimate::Unimodal(12.571_428)), "12.57");
        assert_eq!(
            format_modes(&ModeEstimate::Multimodal(vec![21.0, 25.0])),
            "21.00, 25.00 (multimodal)"
        );
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(None, "%"), "N/A");
        assert_eq!(format_optional(Some(20.0 / 3.0), "%"), "6.67%");
    }

    #[test]
    fn test_report_contents() {
        let rows = [
            RawRow::new("8-10", "", "2"),
            RawRow::new("10-12", "", "8"),
            RawRow::new("12-14", "", "18"),
        ];
        let report = render(&analyze(&rows, &EngineConfig::default()).unwrap());
        assert!(report.contains("12-14"));
        assert!(report.contains("130.00"));
        assert!(report.contains("12.20"));
        assert!(report.contains("12.57"));
        assert!(!report.contains("Warnings:"));
    }

    #[test]
    fn test_report_lists_warnings() {
        let rows = [RawRow::new("0-10", "3", ""), RawRow::new("10-20", "3", "")];
        let report = render(&analyze(&rows, &EngineConfig::default()).unwrap());
        assert!(report.contains("Warnings:"));
        assert!(report.contains("  - amodal distribution: every class has frequency 3"));
        assert!(report.contains("undefined (amodal)"));
    }
}
