// Collatz chain search CLI
// Prints the start below the upper bound with the longest Collatz chain

use anyhow::{Context, Result};
use clap::Parser;
use collatz_chain::{
    config::{
        DEFAULT_LOG_FILTER, DEFAULT_UPPER_BOUND, MAX_UPPER_BOUND, UPPER_BOUND_ENV,
        VERBOSE_LOG_FILTER,
    },
    solve_with_report, trajectory,
    utils::{format_trajectory, format_with_separators, parse_upper_bound},
};
use tracing_subscriber::EnvFilter;

fn parse_bound_arg(input: &str) -> Result<u64, String> {
    parse_upper_bound(input, MAX_UPPER_BOUND)
}

#[derive(Parser, Debug)]
#[command(name = "collatz")]
#[command(about = "Find the start below an upper bound with the longest Collatz chain")]
#[command(version)]
struct Args {
    /// Exclusive upper bound on starting values (accepts 1000000, 1_000_000, 1e6, 10^6)
    /// [default: 1000000, at most 10,000,000]
    #[arg(value_name = "UPPER_BOUND", value_parser = parse_bound_arg)]
    upper_bound: Option<u64>,

    /// Same as the positional UPPER_BOUND; the later of the two wins
    #[arg(
        long = "upper-bound",
        value_name = "UPPER_BOUND",
        env = UPPER_BOUND_ENV,
        overrides_with = "upper_bound",
        value_parser = parse_bound_arg
    )]
    upper_bound_flag: Option<u64>,

    /// Also print the chain length, cache size and elapsed time
    #[arg(long)]
    report: bool,

    /// Also print the winning start's full sequence
    #[arg(long)]
    trajectory: bool,

    /// Print the report as JSON instead of plain text
    #[arg(long, conflicts_with_all = ["report", "trajectory"])]
    json: bool,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Positional first, then `--upper-bound` (or its environment variable).
    fn bound(&self) -> u64 {
        self.upper_bound
            .or(self.upper_bound_flag)
            .unwrap_or(DEFAULT_UPPER_BOUND)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let upper_bound = args.bound();
    let report = solve_with_report(upper_bound)
        .with_context(|| format!("searching below {}", upper_bound))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.start);

    if args.report {
        println!("chain length: {} values", report.length);
        println!(
            "starts evaluated: {}",
            format_with_separators(report.starts_evaluated)
        );
        println!(
            "cache entries: {}",
            format_with_separators(report.cache_entries as u64)
        );
        println!("elapsed: {:.1} ms", report.elapsed_ms);
    }

    if args.trajectory {
        let chain = trajectory(report.start)
            .with_context(|| format!("tracing the chain of {}", report.start))?;
        println!("{}", format_trajectory(&chain, usize::MAX));
    }

    Ok(())
}
