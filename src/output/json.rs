use crate::engine::types::AggregateReport;

pub fn print_json(report: &AggregateReport) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

pub fn print_json_pretty(report: &AggregateReport) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::engine::types::{AggregateReport, ProbeResult, RunFailure};
    use std::time::Duration;

    #[test]
    fn test_report_serialization() {
        let result =
            ProbeResult::new("http://x/a.jpg", 500_000, Duration::from_millis(250)).unwrap();
        let failure = RunFailure {
            run: 2,
            error: "server responded with HTTP 503 Service Unavailable".into(),
        };
        let report = AggregateReport::new("http://x/a.jpg", 2, vec![result], vec![failure]);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["attempts"], 2);
        assert_eq!(value["results"][0]["byte_count"], 500_000);
        assert_eq!(value["results"][0]["elapsed_seconds"], 0.25);
        assert_eq!(
            value["results"][0]["average_rate_bytes_per_second"],
            2_000_000.0
        );
        assert_eq!(value["failures"][0]["run"], 2);
        assert_eq!(value["mean_rate"], 2_000_000.0);
        assert_eq!(value["tier"], "moderate");
    }

    #[test]
    fn test_empty_report_serializes_nulls() {
        let report = AggregateReport::new("http://x/a.jpg", 1, Vec::new(), Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["mean_rate"].is_null());
        assert!(value["tier"].is_null());
        assert!(value["stats"].is_null());
    }
}
