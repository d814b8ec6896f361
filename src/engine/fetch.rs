use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::ProbeError;

pub type BodyStream = BoxStream<'static, Result<Bytes, ProbeError>>;

/// An open response: the advertised size, if any, and the body still to be read.
pub struct Download {
    pub content_length: Option<u64>,
    pub body: BodyStream,
}

/// Opens a streaming GET. The probe measures whatever this hands back.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Download, ProbeError>;
}

/// [`Fetch`] over a real HTTP connection.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Download, ProbeError> {
        let request = self.client.get(url.clone()).send();
        let resp = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ProbeError::Timeout(timeout))?
            .map_err(|e| map_reqwest_error(url.as_str(), timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status));
        }

        let content_length = resp.content_length();
        debug!("GET {url} -> {status}, content-length {content_length:?}");

        let target = url.to_string();
        let body = resp
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| map_reqwest_error(&target, timeout, e)))
            .boxed();

        Ok(Download {
            content_length,
            body,
        })
    }
}

fn map_reqwest_error(url: &str, timeout: Duration, err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout(timeout)
    } else if let Some(status) = err.status() {
        ProbeError::HttpStatus(status)
    } else {
        ProbeError::Connection {
            url: url.to_string(),
            reason: error_chain(&err),
        }
    }
}

/// reqwest's top-level message is terse; append the underlying causes.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
