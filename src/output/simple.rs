use crate::engine::types::{format_rate, AggregateReport};

/// One-line summary: "↓ 12.34 MB/s (Excellent) · 3/3 runs"
pub fn summary_line(report: &AggregateReport) -> String {
    let runs = format!("{}/{} runs", report.succeeded(), report.attempts);
    match (report.mean_rate, report.tier) {
        (Some(mean), Some(tier)) => format!("↓ {} ({tier}) · {runs}", format_rate(mean)),
        _ => format!("↓ n/a · {runs}"),
    }
}

pub fn print_simple(report: &AggregateReport) {
    println!("{}", summary_line(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::ProbeResult;
    use std::time::Duration;

    #[test]
    fn test_summary_line() {
        let result = ProbeResult::new("http://x", 24_000_000, Duration::from_secs(2)).unwrap();
        let report = AggregateReport::new("http://x", 2, vec![result], Vec::new());
        assert_eq!(summary_line(&report), "↓ 12.00 MB/s (Excellent) · 1/2 runs");
    }

    #[test]
    fn test_summary_line_without_results() {
        let report = AggregateReport::new("http://x", 3, Vec::new(), Vec::new());
        assert_eq!(summary_line(&report), "↓ n/a · 0/3 runs");
    }
}
