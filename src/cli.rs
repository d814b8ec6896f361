use clap::Parser;
use clap_complete::Shell;
use std::net::IpAddr;

use crate::engine::error::ArgumentError;
use crate::engine::types::{
    parse_timeout, parse_url, RunConfig, DEFAULT_REPEAT_COUNT, DEFAULT_TIMEOUT_SECS, DEFAULT_URL,
};

/// Which output mode was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Console,
    Tui,
    Simple,
    Json,
    JsonPretty,
    Csv,
}

/// Measure the download speed of an image over HTTP
#[derive(Parser, Debug)]
#[command(name = "imgspeed", version, about)]
pub struct Cli {
    /// URL of the image to download
    #[arg(value_parser = validate_url, default_value = DEFAULT_URL)]
    pub url: String,

    /// Connect and inactivity timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = validate_timeout)]
    pub timeout: f64,

    /// Number of times to run the test
    #[arg(
        long,
        default_value_t = DEFAULT_REPEAT_COUNT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub multiple: u32,

    /// Full-screen dashboard
    #[arg(long)]
    pub tui: bool,

    /// One-line output
    #[arg(long)]
    pub simple: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Pretty JSON output
    #[arg(long = "json-pretty")]
    pub json_pretty: bool,

    /// CSV output
    #[arg(long)]
    pub csv: bool,

    /// Force IPv4 with optional source address
    #[arg(long, num_args = 0..=1, default_missing_value = "0.0.0.0", conflicts_with = "ipv6")]
    pub ipv4: Option<IpAddr>,

    /// Force IPv6 with optional source address
    #[arg(long, num_args = 0..=1, default_missing_value = "::", conflicts_with = "ipv4")]
    pub ipv6: Option<IpAddr>,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[arg(long = "generate-completion", value_name = "SHELL")]
    pub completion: Option<Shell>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.tui {
            OutputMode::Tui
        } else if self.simple {
            OutputMode::Simple
        } else if self.json {
            OutputMode::Json
        } else if self.json_pretty {
            OutputMode::JsonPretty
        } else if self.csv {
            OutputMode::Csv
        } else {
            OutputMode::Console
        }
    }

    pub fn to_config(&self) -> Result<RunConfig, ArgumentError> {
        RunConfig::new(Some(&self.url), self.timeout, self.multiple)
    }

    /// Local address to bind, if IPv4 or IPv6 was forced.
    pub fn local_address(&self) -> Option<IpAddr> {
        self.ipv4.or(self.ipv6)
    }
}

fn validate_url(input: &str) -> Result<String, ArgumentError> {
    parse_url(input).map(|url| url.to_string())
}

fn validate_timeout(input: &str) -> Result<f64, String> {
    let secs: f64 = input
        .parse()
        .map_err(|_| format!("'{input}' is not a number of seconds"))?;
    parse_timeout(secs).map_err(|e| e.to_string())?;
    Ok(secs)
}
