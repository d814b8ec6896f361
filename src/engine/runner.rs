use tracing::{info, warn};

use super::error::RunError;
use super::fetch::Fetch;
use super::probe::probe;
use super::types::*;

/// Run the probe `repeat_count` times back to back, emitting events as
/// progress is made.
///
/// A failed run is reported and excluded from the aggregate; the session
/// only fails when no run succeeded.
pub async fn run_probes<F>(
    fetcher: &F,
    config: &RunConfig,
    tx: EventSender,
) -> Result<AggregateReport, RunError>
where
    F: Fetch + ?Sized,
{
    let total = config.repeat_count();
    let url = config.url().to_string();
    let mut results = Vec::with_capacity(total as usize);
    let mut failures = Vec::new();

    for run in 1..=total {
        let _ = tx
            .send(ProbeEvent::RunStart {
                run,
                total,
                url: url.clone(),
            })
            .await;

        match probe(fetcher, config.url(), config.timeout(), Some(&tx)).await {
            Ok(result) => {
                info!(
                    "Run {run}/{total}: {} in {:.2}s ({})",
                    format_bytes(result.byte_count()),
                    result.elapsed_seconds(),
                    format_rate(result.rate())
                );
                let _ = tx
                    .send(ProbeEvent::RunComplete {
                        run,
                        total,
                        result: result.clone(),
                    })
                    .await;
                results.push(result);
            }
            Err(e) => {
                warn!("Run {run}/{total} failed: {e}");
                let error = e.to_string();
                let _ = tx
                    .send(ProbeEvent::RunFailed {
                        run,
                        total,
                        error: error.clone(),
                    })
                    .await;
                failures.push(RunFailure { run, error });
            }
        }
    }

    let report = AggregateReport::new(url, total, results, failures);

    if report.results.is_empty() {
        let _ = tx.send(ProbeEvent::AllRunsFailed(report.clone())).await;
        return Err(RunError::AllRunsFailed {
            report: Box::new(report),
        });
    }

    let _ = tx.send(ProbeEvent::Complete(report.clone())).await;
    Ok(report)
}
