use clap::{ArgAction, Parser, Subcommand};

use self::{compute::ComputeArg, parse_class::ParseClassArg};

mod compute;
mod parse_class;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// What to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Complete a frequency table and compute its statistics
    Compute(#[clap(flatten)] ComputeArg),
    /// Show the bounds parsed from class labels
    ParseClass(#[clap(flatten)] ParseClassArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.verbose);
    match args.mode {
        Mode::Compute(arg) => compute::run(&arg)?,
        Mode::ParseClass(arg) => parse_class::run(&arg)?,
    }
    Ok(())
}

/// `RUST_LOG` takes precedence over the `-v` count.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
