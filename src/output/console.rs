use std::io::{self, Write};

use crate::engine::types::{format_bytes, format_rate, AggregateReport, ProbeEvent, ProbeResult};

const RULE_WIDTH: usize = 50;

/// Streams human-readable progress and result blocks as engine events arrive.
pub struct ConsoleReporter<W: Write> {
    out: W,
    /// A `\r` progress line is open and needs a newline before the next block.
    progress_open: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            progress_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, repeat_count: u32) -> io::Result<()> {
        writeln!(self.out, "🖼️  Image Download Speed Test")?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        if repeat_count > 1 {
            writeln!(self.out, "Running {repeat_count} tests...")?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &ProbeEvent) -> io::Result<()> {
        match event {
            ProbeEvent::RunStart { run, total, url } => {
                if *total > 1 {
                    writeln!(self.out, "\n--- Test {run}/{total} ---")?;
                }
                writeln!(self.out, "Testing download speed for: {url}")?;
                writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
            }
            ProbeEvent::ResponseReceived { content_length } => match content_length {
                Some(total) => writeln!(self.out, "File size: {}", format_bytes(*total))?,
                None => writeln!(self.out, "File size: Unknown (streaming)")?,
            },
            ProbeEvent::TransferProgress {
                bytes_so_far,
                total_bytes,
                ..
            } => {
                match total_bytes {
                    Some(total) if *total > 0 => {
                        let percent = *bytes_so_far as f64 / *total as f64 * 100.0;
                        write!(
                            self.out,
                            "\rProgress: {percent:.1}% ({}/{})",
                            format_bytes(*bytes_so_far),
                            format_bytes(*total)
                        )?;
                    }
                    _ => write!(self.out, "\rReceived: {}", format_bytes(*bytes_so_far))?,
                }
                self.out.flush()?;
                self.progress_open = true;
            }
            ProbeEvent::RunComplete { result, .. } => {
                self.close_progress()?;
                self.result_block(result)?;
            }
            ProbeEvent::RunFailed { run, total, error } => {
                self.close_progress()?;
                if *total > 1 {
                    writeln!(self.out, "❌ Test {run} failed: {error}")?;
                } else {
                    writeln!(self.out, "❌ Test failed: {error}")?;
                }
            }
            ProbeEvent::Complete(report) => {
                if report.attempts > 1 {
                    self.aggregate_block(report)?;
                }
            }
            ProbeEvent::AllRunsFailed(report) => {
                self.close_progress()?;
                writeln!(
                    self.out,
                    "\nAll {} test(s) failed, no speed could be measured",
                    report.attempts
                )?;
            }
        }
        Ok(())
    }

    fn close_progress(&mut self) -> io::Result<()> {
        if self.progress_open {
            writeln!(self.out)?;
            self.progress_open = false;
        }
        Ok(())
    }

    fn result_block(&mut self, result: &ProbeResult) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "📊 DOWNLOAD SPEED TEST RESULTS")?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "URL: {}", result.url())?;
        writeln!(self.out, "File size: {}", format_bytes(result.byte_count()))?;
        writeln!(
            self.out,
            "Download time: {:.2} seconds",
            result.elapsed_seconds()
        )?;
        writeln!(self.out, "Download speed: {}", format_rate(result.rate()))?;
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{}", result.tier().verdict())
    }

    fn aggregate_block(&mut self, report: &AggregateReport) -> io::Result<()> {
        let (Some(mean), Some(tier)) = (report.mean_rate, report.tier) else {
            return Ok(());
        };
        writeln!(self.out, "\n📈 AVERAGE SPEED: {}", format_rate(mean))?;
        writeln!(
            self.out,
            "📊 Tests completed: {}/{}",
            report.succeeded(),
            report.attempts
        )?;
        if let Some(stats) = report.stats {
            writeln!(
                self.out,
                "   min {} · median {} · max {}",
                format_rate(stats.min),
                format_rate(stats.median),
                format_rate(stats.max)
            )?;
        }
        writeln!(self.out, "{}", tier.verdict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::RunFailure;
    use std::time::Duration;

    fn render(events: &[ProbeEvent]) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        for event in events {
            reporter.handle_event(event).unwrap();
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn result(bytes: u64) -> ProbeResult {
        ProbeResult::new("http://images.test/a.jpg", bytes, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_single_run_output() {
        let out = render(&[
            ProbeEvent::RunStart {
                run: 1,
                total: 1,
                url: "http://images.test/a.jpg".into(),
            },
            ProbeEvent::ResponseReceived {
                content_length: Some(4_000_000),
            },
            ProbeEvent::TransferProgress {
                bytes_so_far: 2_000_000,
                total_bytes: Some(4_000_000),
                current_rate: 0.0,
            },
            ProbeEvent::RunComplete {
                run: 1,
                total: 1,
                result: result(4_000_000),
            },
        ]);

        assert!(!out.contains("--- Test"));
        assert!(out.contains("Testing download speed for: http://images.test/a.jpg"));
        assert!(out.contains("File size: 4.00 MB"));
        assert!(out.contains("\rProgress: 50.0% (2.00 MB/4.00 MB)\n"));
        assert!(out.contains("Download time: 2.00 seconds"));
        assert!(out.contains("Download speed: 2.00 MB/s"));
        assert!(out.contains("Moderate speed"));
    }

    #[test]
    fn test_progress_without_size() {
        let out = render(&[
            ProbeEvent::ResponseReceived {
                content_length: None,
            },
            ProbeEvent::TransferProgress {
                bytes_so_far: 8_192,
                total_bytes: None,
                current_rate: 0.0,
            },
        ]);

        assert!(out.contains("File size: Unknown (streaming)"));
        assert!(out.contains("\rReceived: 8.19 KB"));
        assert!(!out.contains('%'));
    }

    #[test]
    fn test_multi_run_aggregate() {
        let report = AggregateReport::new(
            "http://images.test/a.jpg",
            3,
            vec![result(2_000_000), result(6_000_000)],
            vec![RunFailure {
                run: 2,
                error: "no data received within 2.0s".into(),
            }],
        );
        let out = render(&[
            ProbeEvent::RunStart {
                run: 2,
                total: 3,
                url: "http://images.test/a.jpg".into(),
            },
            ProbeEvent::RunFailed {
                run: 2,
                total: 3,
                error: "no data received within 2.0s".into(),
            },
            ProbeEvent::Complete(report),
        ]);

        assert!(out.contains("--- Test 2/3 ---"));
        assert!(out.contains("❌ Test 2 failed: no data received within 2.0s"));
        assert!(out.contains("📈 AVERAGE SPEED: 2.00 MB/s"));
        assert!(out.contains("📊 Tests completed: 2/3"));
    }

    #[test]
    fn test_single_run_has_no_aggregate_block() {
        let report =
            AggregateReport::new("http://images.test/a.jpg", 1, vec![result(100)], Vec::new());
        let out = render(&[ProbeEvent::Complete(report)]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_all_failed() {
        let report = AggregateReport::new("http://images.test/a.jpg", 2, Vec::new(), Vec::new());
        let out = render(&[ProbeEvent::AllRunsFailed(report)]);
        assert!(out.contains("All 2 test(s) failed"));
    }
}
