use clap::Args;
use freqtab_stats::ClassRow;

#[derive(Debug, Clone, Args)]
pub(crate) struct ParseClassArg {
    /// Class labels to parse (e.g. "8-10", "8 a 10", "8 até 10")
    #[arg(required = true)]
    pub labels: Vec<String>,
}

pub(crate) fn run(arg: &ParseClassArg) -> anyhow::Result<()> {
    println!(
        "  {:<20} {:>10} {:>10} {:>10} {:>10}",
        "Class", "Lower", "Upper", "Width", "Midpoint"
    );
    // label(20) + 4 * number(10) + spaces(4)
    println!("  {}", "-".repeat(64));

    let mut failed = 0;
    for label in &arg.labels {
        match ClassRow::parse(label) {
            Ok(row) => println!(
                "  {:<20} {:>10} {:>10} {:>10} {:>10}",
                row.label,
                row.lower(),
                row.upper(),
                row.width(),
                row.midpoint(),
            ),
            Err(err) => {
                println!("  {label:<20} {err}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} class labels could not be parsed",
            arg.labels.len()
        );
    }
    Ok(())
}
