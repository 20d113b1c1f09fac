//! BWE Replay - Offline estimation over a packet trace
//!
//! Reads JSON-lines packet reports from a file or stdin, feeds them to a
//! fresh estimator and prints the bandwidth estimate as it evolves.

use anyhow::Context;
use bwe_cli::{display_summary, init_tracing, replay, Config, ConfigArgs};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

#[derive(Parser, Debug)]
#[command(name = "bwe-replay")]
#[command(about = "Replay a packet trace through the bandwidth estimator", long_about = None)]
struct Args {
    /// Trace file with one JSON record per line (use '-' for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Print the estimate every N records (0 for summary only)
    #[arg(long, default_value = "100")]
    every: u64,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    if args.example_config {
        print!("{}", toml::to_string_pretty(&Config::example())?);
        return Ok(());
    }

    let config = args.config.load().context("Failed to load configuration")?;

    let reader: Box<dyn BufRead> = if args.input == "-" {
        tracing::info!("Reading trace from stdin");
        Box::new(io::stdin().lock())
    } else {
        tracing::info!("Reading trace from {}", args.input);
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open trace '{}'", args.input))?;
        Box::new(BufReader::new(file))
    };

    let mut estimator = config.build_estimator();

    let reported = replay(reader, &mut estimator, args.every, |arrival_ms, bps| {
        println!("{}\t{}", arrival_ms, bps);
    })?;

    tracing::info!("Replayed {} records", reported);

    let estimate = estimator.estimated_bandwidth();
    display_summary(&estimator.stats(), estimate);

    Ok(())
}
