//! Statistics display and formatting

use bwe_protocol::EstimatorStats;

/// Format bytes in human-readable form
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format bandwidth in human-readable form
pub fn format_bandwidth(bps: u64) -> String {
    const KBPS: u64 = 1000;
    const MBPS: u64 = KBPS * 1000;
    const GBPS: u64 = MBPS * 1000;

    if bps >= GBPS {
        format!("{:.2} Gbps", bps as f64 / GBPS as f64)
    } else if bps >= MBPS {
        format!("{:.2} Mbps", bps as f64 / MBPS as f64)
    } else if bps >= KBPS {
        format!("{:.2} Kbps", bps as f64 / KBPS as f64)
    } else {
        format!("{} bps", bps)
    }
}

/// Format a loss fraction as a percentage
pub fn format_loss_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Format the time span covered by the flow
fn format_span(stats: &EstimatorStats) -> String {
    match (stats.start_time_ms, stats.last_time_ms) {
        (Some(start), Some(last)) if last >= start => format!("{} ms", last - start),
        (Some(_), Some(_)) => "out of order".to_string(),
        _ => "N/A".to_string(),
    }
}

/// Display the end-of-flow summary
pub fn display_summary(stats: &EstimatorStats, estimate_bps: u64) {
    println!("\n┌─────────────────────────────────────────────────────────────┐");
    println!("│ FLOW SUMMARY                                                │");
    println!("├─────────────────────────────────────────────────────────────┤");
    println!(
        "│ Packets:   {} received / {} lost",
        stats.total_packets, stats.missing_packets
    );
    println!("│ Loss rate: {}", format_loss_rate(stats.loss_rate));
    println!("│ Payload:   {}", format_bytes(stats.total_bytes));
    println!("│ Span:      {}", format_span(stats));
    println!(
        "│ Estimate:  {} ({} bps)",
        format_bandwidth(estimate_bps),
        estimate_bps
    );
    println!("└─────────────────────────────────────────────────────────────┘");
}

/// One-line statistics for periodic logging
pub fn compact_stats(stats: &EstimatorStats, estimate_bps: u64) -> String {
    format!(
        "packets={} lost={} loss={} bytes={} estimate={}",
        stats.total_packets,
        stats.missing_packets,
        format_loss_rate(stats.loss_rate),
        format_bytes(stats.total_bytes),
        format_bandwidth(estimate_bps)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> EstimatorStats {
        EstimatorStats {
            total_packets: 90,
            missing_packets: 10,
            total_bytes: 2048,
            loss_rate: 0.1,
            last_sequence_seen: None,
            start_time_ms: Some(100),
            last_time_ms: Some(1100),
            last_valid_throughput_bps: 16_384,
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.00 MB");
    }

    #[test]
    fn test_format_bandwidth() {
        assert_eq!(format_bandwidth(500), "500 bps");
        assert_eq!(format_bandwidth(100_000), "100.00 Kbps");
        assert_eq!(format_bandwidth(1_000_000), "1.00 Mbps");
    }

    #[test]
    fn test_format_loss_rate() {
        assert_eq!(format_loss_rate(0.0), "0.00%");
        assert_eq!(format_loss_rate(0.125), "12.50%");
    }

    #[test]
    fn test_span() {
        assert_eq!(format_span(&stats()), "1000 ms");

        let mut reversed = stats();
        reversed.last_time_ms = Some(50);
        assert_eq!(format_span(&reversed), "out of order");
    }

    #[test]
    fn test_compact_stats() {
        assert_eq!(
            compact_stats(&stats(), 100_000),
            "packets=90 lost=10 loss=10.00% bytes=2.00 KB estimate=100.00 Kbps"
        );
    }
}
