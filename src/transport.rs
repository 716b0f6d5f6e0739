//! HTTP transport for posting envelopes to the collection endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::client::ClientError;
use crate::event::EventEnvelope;

/// Issues a single request carrying one envelope.
///
/// Implementations must not retry; the client treats every call as final.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `envelope` as JSON to `url`.
    async fn post(&self, url: &str, envelope: &EventEnvelope) -> Result<(), ClientError>;
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client (reused for connection pooling)
    client: Client,

    /// Request timeout, if one was configured
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a transport. Without a timeout, reqwest's defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Get the request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, envelope: &EventEnvelope) -> Result<(), ClientError> {
        let response = self.client.post(url).json(envelope).send().await?;
        let status = response.status();

        debug!(status = %status, kind = %envelope.kind, "Endpoint responded");

        // Response body is never read
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Status { code: status })
        }
    }
}
