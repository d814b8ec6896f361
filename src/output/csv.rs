use std::io::Write;

use crate::engine::types::AggregateReport;

const HEADER: [&str; 7] = [
    "run",
    "status",
    "bytes",
    "elapsed_seconds",
    "rate_bytes_per_second",
    "tier",
    "error",
];

/// One row per run in run order, then a `mean` row if any run succeeded.
pub fn write_csv<W: Write>(report: &AggregateReport, out: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    let mut successes = report.results.iter();
    let mut failures = report.failures.iter().peekable();

    for run in 1..=report.attempts {
        let run_label = run.to_string();
        if let Some(failure) = failures.next_if(|failure| failure.run == run) {
            wtr.write_record([
                run_label.as_str(),
                "failed",
                "",
                "",
                "",
                "",
                &failure.error,
            ])?;
        } else if let Some(result) = successes.next() {
            wtr.write_record([
                run_label.as_str(),
                "ok",
                &result.byte_count().to_string(),
                &format!("{:.6}", result.elapsed_seconds()),
                &format!("{:.2}", result.rate()),
                &result.tier().to_string().to_lowercase(),
                "",
            ])?;
        }
    }

    if let (Some(mean), Some(tier)) = (report.mean_rate, report.tier) {
        wtr.write_record([
            "mean",
            "ok",
            "",
            "",
            &format!("{mean:.2}"),
            &tier.to_string().to_lowercase(),
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn print_csv(report: &AggregateReport) -> Result<(), csv::Error> {
    write_csv(report, std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{ProbeResult, RunFailure};
    use std::time::Duration;

    #[test]
    fn test_rows_follow_run_order() {
        let ok = |bytes| ProbeResult::new("http://x", bytes, Duration::from_secs(1)).unwrap();
        let report = AggregateReport::new(
            "http://x",
            3,
            vec![ok(1_000_000), ok(3_000_000)],
            vec![RunFailure {
                run: 2,
                error: "no data received within 2.0s".into(),
            }],
        );

        let mut buf = Vec::new();
        write_csv(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "run,status,bytes,elapsed_seconds,rate_bytes_per_second,tier,error",
                "1,ok,1000000,1.000000,1000000.00,moderate,",
                "2,failed,,,,,no data received within 2.0s",
                "3,ok,3000000,1.000000,3000000.00,moderate,",
                "mean,ok,,,2000000.00,moderate,",
            ]
        );
    }

    #[test]
    fn test_all_failed_has_no_mean_row() {
        let report = AggregateReport::new(
            "http://x",
            1,
            Vec::new(),
            vec![RunFailure {
                run: 1,
                error: "boom".into(),
            }],
        );

        let mut buf = Vec::new();
        write_csv(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("mean"));
    }
}
