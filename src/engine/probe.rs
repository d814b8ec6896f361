use futures::StreamExt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use url::Url;

use super::error::ProbeError;
use super::fetch::Fetch;
use super::types::{format_bytes, format_rate, EventSender, ProbeEvent, ProbeResult};

/// Body bytes are accounted, and progress offered, in slices of this size.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Floor for a measured duration, so a near-instant transfer still has a rate.
pub const MIN_ELAPSED: Duration = Duration::from_micros(1);

/// Time one streamed GET of `url`, optionally emitting progress events.
///
/// `timeout` bounds the wait for response headers and every wait for the
/// next body chunk. The body stream is dropped before this returns.
pub async fn probe<F>(
    fetcher: &F,
    url: &Url,
    timeout: Duration,
    tx: Option<&EventSender>,
) -> Result<ProbeResult, ProbeError>
where
    F: Fetch + ?Sized,
{
    let start = Instant::now();
    let download = fetcher.fetch(url, timeout).await?;

    let total_bytes = download.content_length;
    if let Some(tx) = tx {
        let _ = tx.try_send(ProbeEvent::ResponseReceived {
            content_length: total_bytes,
        });
    }

    let mut body = download.body;
    let mut bytes_so_far: u64 = 0;

    loop {
        let next = tokio::time::timeout(timeout, body.next())
            .await
            .map_err(|_| ProbeError::Timeout(timeout))?;
        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk?;

        for slice in chunk.chunks(CHUNK_SIZE) {
            bytes_so_far += slice.len() as u64;

            if let Some(tx) = tx {
                let elapsed = start.elapsed().as_secs_f64();
                let current_rate = if elapsed > 0.0 {
                    bytes_so_far as f64 / elapsed
                } else {
                    0.0
                };
                let _ = tx.try_send(ProbeEvent::TransferProgress {
                    bytes_so_far,
                    total_bytes,
                    current_rate,
                });
            }
        }
    }

    let elapsed = start.elapsed().max(MIN_ELAPSED);
    drop(body);

    let result = ProbeResult::new(url.as_str(), bytes_so_far, elapsed)?;
    debug!(
        "Probe {url}: {} ({} in {elapsed:.2?})",
        format_rate(result.rate()),
        format_bytes(bytes_so_far)
    );
    Ok(result)
}
