use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use super::types::AggregateReport;

/// Rejected invocation parameters. Raised before any network activity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("invalid URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("repeat count must be at least 1")]
    InvalidRepeatCount,
}

/// Failure of a single probe. The runner records it and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    #[error("could not connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("no data received within {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("server responded with HTTP {0}")]
    HttpStatus(StatusCode),

    #[error("elapsed time must be positive")]
    NonPositiveElapsed,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("all {} runs failed", .report.attempts)]
    AllRunsFailed { report: Box<AggregateReport> },
}
