use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use super::classify::{classify, SpeedTier};
use super::error::{ArgumentError, ProbeError};

/// Sample image used when no URL is given.
pub const DEFAULT_URL: &str = "https://picsum.photos/1920/1080";

pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

pub const DEFAULT_REPEAT_COUNT: u32 = 1;

/// Outcome of one completed download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    url: String,
    byte_count: u64,
    elapsed_seconds: f64,
    average_rate_bytes_per_second: f64,
}

impl ProbeResult {
    pub fn new(
        url: impl Into<String>,
        byte_count: u64,
        elapsed: Duration,
    ) -> Result<Self, ProbeError> {
        if elapsed.is_zero() {
            return Err(ProbeError::NonPositiveElapsed);
        }
        let elapsed_seconds = elapsed.as_secs_f64();
        Ok(Self {
            url: url.into(),
            byte_count,
            elapsed_seconds,
            average_rate_bytes_per_second: byte_count as f64 / elapsed_seconds,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn rate(&self) -> f64 {
        self.average_rate_bytes_per_second
    }

    pub fn tier(&self) -> SpeedTier {
        classify(self.average_rate_bytes_per_second)
    }
}

/// Validated invocation parameters for a measurement session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    url: Url,
    timeout: Duration,
    repeat_count: u32,
}

impl RunConfig {
    /// Build a config, falling back to [`DEFAULT_URL`] when `url` is `None`.
    pub fn new(
        url: Option<&str>,
        timeout_secs: f64,
        repeat_count: u32,
    ) -> Result<Self, ArgumentError> {
        let url = parse_url(url.unwrap_or(DEFAULT_URL))?;
        let timeout = parse_timeout(timeout_secs)?;
        if repeat_count == 0 {
            return Err(ArgumentError::InvalidRepeatCount);
        }
        Ok(Self {
            url,
            timeout,
            repeat_count,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }
}

/// Accepts absolute `http`/`https` URLs only.
pub fn parse_url(input: &str) -> Result<Url, ArgumentError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ArgumentError::EmptyUrl);
    }
    let url = Url::parse(trimmed).map_err(|e| ArgumentError::MalformedUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ArgumentError::UnsupportedScheme(other.to_string())),
    }
    Ok(url)
}

pub fn parse_timeout(secs: f64) -> Result<Duration, ArgumentError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ArgumentError::InvalidTimeout(secs));
    }
    match Duration::try_from_secs_f64(secs) {
        // Sub-nanosecond values round down to zero.
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(ArgumentError::InvalidTimeout(secs)),
    }
}

/// A run that did not produce a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunFailure {
    pub run: u32,
    pub error: String,
}

/// Distribution of per-run rates in bytes per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub avg: f64,
}

impl RateStats {
    pub fn from_rates(rates: &[f64]) -> Option<Self> {
        if rates.is_empty() {
            return None;
        }
        let mut sorted = rates.to_vec();
        sorted.sort_by(f64::total_cmp);

        let (lower, upper) = if sorted.len().is_multiple_of(2) {
            let mid = sorted.len() / 2;
            (&sorted[..mid], &sorted[mid..])
        } else {
            let mid = sorted.len().div_ceil(2);
            (&sorted[..mid], &sorted[sorted.len() - mid..])
        };

        Some(Self {
            min: sorted[0],
            q1: calc_median(lower),
            median: calc_median(&sorted),
            q3: calc_median(upper),
            max: sorted[sorted.len() - 1],
            avg: sorted.iter().sum::<f64>() / sorted.len() as f64,
        })
    }
}

fn calc_median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Everything a session produced, computed once all runs are done.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub url: String,
    pub attempts: u32,
    pub results: Vec<ProbeResult>,
    pub failures: Vec<RunFailure>,
    pub mean_rate: Option<f64>,
    pub tier: Option<SpeedTier>,
    pub stats: Option<RateStats>,
}

impl AggregateReport {
    pub fn new(
        url: impl Into<String>,
        attempts: u32,
        results: Vec<ProbeResult>,
        failures: Vec<RunFailure>,
    ) -> Self {
        let rates: Vec<f64> = results.iter().map(ProbeResult::rate).collect();
        let mean_rate = if rates.is_empty() {
            None
        } else {
            Some(rates.iter().sum::<f64>() / rates.len() as f64)
        };

        Self {
            url: url.into(),
            attempts,
            results,
            failures,
            mean_rate,
            tier: mean_rate.map(classify),
            stats: RateStats::from_rates(&rates),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results.len()
    }
}

/// Events emitted by the engine for real-time consumption.
#[derive(Debug, Clone)]
pub enum ProbeEvent {
    RunStart {
        run: u32,
        total: u32,
        url: String,
    },
    ResponseReceived {
        content_length: Option<u64>,
    },
    TransferProgress {
        bytes_so_far: u64,
        total_bytes: Option<u64>,
        current_rate: f64,
    },
    RunComplete {
        run: u32,
        total: u32,
        result: ProbeResult,
    },
    RunFailed {
        run: u32,
        total: u32,
        error: String,
    },
    Complete(AggregateReport),
    AllRunsFailed(AggregateReport),
}

pub type EventSender = mpsc::Sender<ProbeEvent>;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with decimal (1000-based) units.
pub fn format_bytes(bytes: u64) -> String {
    scale_decimal(bytes as f64, "")
}

/// Format a byte rate with decimal (1000-based) units.
pub fn format_rate(bytes_per_second: f64) -> String {
    scale_decimal(bytes_per_second, "/s")
}

fn scale_decimal(mut value: f64, suffix: &str) -> String {
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1000.0 {
            return format!("{value:.2} {unit}{suffix}");
        }
        value /= 1000.0;
    }
    format!("{value:.2} {}{suffix}", UNITS[UNITS.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_result_rate() {
        let result =
            ProbeResult::new("http://x", 3_000_000, Duration::from_millis(1500)).unwrap();
        assert_eq!(result.byte_count(), 3_000_000);
        assert!((result.elapsed_seconds() - 1.5).abs() < 1e-12);
        assert!((result.rate() - 2_000_000.0).abs() < 1e-6);
        assert_eq!(result.tier(), SpeedTier::Moderate);
    }

    #[test]
    fn test_probe_result_rejects_zero_elapsed() {
        assert_eq!(
            ProbeResult::new("http://x", 10, Duration::ZERO),
            Err(ProbeError::NonPositiveElapsed)
        );
    }

    #[test]
    fn test_probe_result_zero_bytes() {
        let result = ProbeResult::new("http://x", 0, Duration::from_micros(1)).unwrap();
        assert_eq!(result.rate(), 0.0);
        assert!(result.elapsed_seconds() > 0.0);
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new(None, DEFAULT_TIMEOUT_SECS, DEFAULT_REPEAT_COUNT).unwrap();
        assert_eq!(config.url().as_str(), DEFAULT_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.repeat_count(), 1);
    }

    #[test]
    fn test_run_config_rejects_invalid_input() {
        assert_eq!(
            RunConfig::new(Some(""), 30.0, 1),
            Err(ArgumentError::EmptyUrl)
        );
        assert_eq!(
            RunConfig::new(Some("ftp://example.com/a.jpg"), 30.0, 1),
            Err(ArgumentError::UnsupportedScheme("ftp".into()))
        );
        assert!(matches!(
            RunConfig::new(Some("not a url"), 30.0, 1),
            Err(ArgumentError::MalformedUrl { .. })
        ));
        assert_eq!(
            RunConfig::new(None, 0.0, 1),
            Err(ArgumentError::InvalidTimeout(0.0))
        );
        assert!(RunConfig::new(None, f64::NAN, 1).is_err());
        assert_eq!(
            RunConfig::new(None, 1e-12, 1),
            Err(ArgumentError::InvalidTimeout(1e-12))
        );
        assert_eq!(
            RunConfig::new(None, 30.0, 0),
            Err(ArgumentError::InvalidRepeatCount)
        );
    }

    #[test]
    fn test_parse_url_accepts_http_and_https() {
        assert!(parse_url("http://localhost:8080/img.png").is_ok());
        assert!(parse_url("  https://picsum.photos/200  ").is_ok());
        assert!(parse_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_parse_timeout_fractional() {
        assert_eq!(parse_timeout(0.25), Ok(Duration::from_millis(250)));
        assert!(parse_timeout(f64::INFINITY).is_err());
    }

    #[test]
    fn test_rate_stats_basic() {
        let stats = RateStats::from_rates(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.avg, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
    }

    #[test]
    fn test_rate_stats_empty() {
        assert_eq!(RateStats::from_rates(&[]), None);
    }

    #[test]
    fn test_aggregate_report_mean() {
        let results = [1_000_000u64, 3_000_000, 5_000_000]
            .iter()
            .map(|&bytes| ProbeResult::new("http://x", bytes, Duration::from_secs(1)).unwrap())
            .collect();
        let report = AggregateReport::new("http://x", 3, results, Vec::new());
        assert_eq!(report.succeeded(), 3);
        assert!((report.mean_rate.unwrap() - 3_000_000.0).abs() < 1e-6);
        assert_eq!(report.tier, Some(SpeedTier::Moderate));
    }

    #[test]
    fn test_aggregate_report_empty() {
        let failures = vec![RunFailure {
            run: 1,
            error: "boom".into(),
        }];
        let report = AggregateReport::new("http://x", 1, Vec::new(), failures);
        assert_eq!(report.mean_rate, None);
        assert_eq!(report.tier, None);
        assert_eq!(report.stats, None);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(100_000), "100.00 KB");
        assert_eq!(format_bytes(1_500_000), "1.50 MB");
        assert_eq!(format_bytes(25_000_000_000), "25.00 GB");
        assert_eq!(format_bytes(3_000_000_000_000_000), "3000.00 TB");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.00 B/s");
        assert_eq!(format_rate(12_340_000.0), "12.34 MB/s");
    }
}
