use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

use imgspeed::cli::{Cli, OutputMode};
use imgspeed::engine::client::build_client;
use imgspeed::engine::error::RunError;
use imgspeed::engine::fetch::HttpFetcher;
use imgspeed::engine::runner::run_probes;
use imgspeed::engine::types::{AggregateReport, RunConfig};
use imgspeed::output::console::ConsoleReporter;
use imgspeed::output::{csv, json, simple};
use imgspeed::tui;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        clap_complete::generate(shell, &mut Cli::command(), "imgspeed", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let mode = cli.output_mode();
    // The dashboard owns the terminal; log lines would tear it.
    if mode != OutputMode::Tui {
        init_tracing(cli.verbose);
    }

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    let client =
        build_client(config.timeout(), cli.local_address()).context("failed to build HTTP client")?;
    let fetcher = HttpFetcher::new(client);

    let outcome = match mode {
        OutputMode::Tui => match tui::run(fetcher, config).await? {
            Some(outcome) => outcome,
            None => return Ok(ExitCode::FAILURE),
        },
        OutputMode::Console => run_console(fetcher, config).await?,
        OutputMode::Simple | OutputMode::Json | OutputMode::JsonPretty | OutputMode::Csv => {
            // Machine-readable modes print the final report only.
            let (tx, rx) = mpsc::channel(1);
            drop(rx);
            run_probes(&fetcher, &config, tx).await
        }
    };

    let (report, succeeded) = match outcome {
        Ok(report) => (report, true),
        Err(RunError::AllRunsFailed { report }) => (*report, false),
    };

    match mode {
        OutputMode::Simple => simple::print_simple(&report),
        OutputMode::Json => json::print_json(&report)?,
        OutputMode::JsonPretty => json::print_json_pretty(&report)?,
        OutputMode::Csv => csv::print_csv(&report)?,
        OutputMode::Console | OutputMode::Tui => {}
    }

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("All {} runs failed", report.attempts);
        Ok(ExitCode::FAILURE)
    }
}

async fn run_console(
    fetcher: HttpFetcher,
    config: RunConfig,
) -> Result<Result<AggregateReport, RunError>> {
    let mut console = ConsoleReporter::new(io::stdout());
    console.banner(config.repeat_count())?;

    let (tx, mut rx) = mpsc::channel(256);
    let engine = tokio::spawn(async move { run_probes(&fetcher, &config, tx).await });

    while let Some(event) = rx.recv().await {
        console.handle_event(&event)?;
    }

    Ok(engine.await?)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "imgspeed=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
