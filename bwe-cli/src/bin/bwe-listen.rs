//! BWE Listen - Live estimation for an incoming RTP flow
//!
//! Receives RTP datagrams on a UDP port, stamps their arrival with a
//! monotonic clock and logs the bandwidth estimate periodically.

use anyhow::Context;
use bwe::io::RtpSocket;
use bwe::MonotonicClock;
use bwe_cli::{display_summary, init_tracing, listen, ConfigArgs, ListenOptions};
use clap::Parser;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "bwe-listen")]
#[command(about = "Estimate bandwidth of an RTP flow received over UDP", long_about = None)]
struct Args {
    /// Listen port
    #[arg(short, long)]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Socket receive buffer size in bytes
    #[arg(long)]
    recv_buffer: Option<usize>,

    /// Statistics interval in seconds (overrides the config file)
    #[arg(long)]
    stats: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<u64>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    let mut config = args.config.load().context("Failed to load configuration")?;
    if let Some(stats) = args.stats {
        config.stats_interval_secs = stats;
    }

    let listen_addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    let socket = RtpSocket::bind(listen_addr, args.recv_buffer, Some(Duration::from_millis(100)))
        .with_context(|| format!("Failed to bind {}", listen_addr))?;
    tracing::info!("Listening on: {}", socket.local_addr()?);

    let clock = MonotonicClock::new();
    let mut estimator = config.build_estimator();
    let options = ListenOptions {
        stats_interval: (config.stats_interval_secs > 0).then(|| config.stats_interval()),
        deadline: args
            .duration
            .map(|secs| Instant::now() + Duration::from_secs(secs)),
    };

    let result = listen(&mut estimator, &clock, options, |buf| socket.recv_from(buf));

    let estimate = estimator.estimated_bandwidth();
    display_summary(&estimator.stats(), estimate);

    let summary = result.context("Receive loop failed")?;
    tracing::info!(
        "Received {} datagrams, {} reported",
        summary.datagrams,
        summary.reported
    );

    Ok(())
}
