//! Event client module for building envelopes and dispatching them.
//!
//! Every tracking method builds one envelope and hands it to a background task
//! that issues a single POST. Outcomes go to the configured
//! [`DeliveryObserver`]; nothing is returned to the caller.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::{Config, DEFAULT_ENDPOINT_URL};
use crate::event::{ClickShape, EventEnvelope, EventKind, Metadata};
use crate::observer::{DeliveryObserver, TracingObserver};
use crate::transport::{HttpTransport, Transport};

/// Errors produced by the tracking client.
///
/// Only `InvalidArgument` and `Config` ever reach a caller, and only during
/// construction. Every other variant is a delivery failure and is handed to the
/// observer instead.
#[derive(Debug)]
pub enum ClientError {
    /// Construction argument failed validation
    InvalidArgument(String),

    /// HTTP client could not be built
    Config(String),

    /// HTTP request failed
    Request(reqwest::Error),

    /// Request timed out
    Timeout,

    /// Endpoint answered with a non-success status code
    Status { code: StatusCode },

    /// No tokio runtime was available to run the request
    NoRuntime,
}

impl ClientError {
    /// Whether this error happened while delivering an envelope.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Request(_)
                | ClientError::Timeout
                | ClientError::Status { .. }
                | ClientError::NoRuntime
        )
    }

    /// Status code returned by the endpoint, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { code } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            ClientError::Config(e) => write!(f, "Client configuration error: {}", e),
            ClientError::Request(e) => write!(f, "HTTP request failed: {}", e),
            ClientError::Timeout => write!(f, "Request timed out"),
            ClientError::Status { code } => write!(f, "Endpoint rejected event ({})", code),
            ClientError::NoRuntime => write!(f, "No async runtime available for dispatch"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Request(err)
        }
    }
}

/// Fire-and-forget event tracking client.
///
/// The project id and endpoint are fixed at construction. Clones share the
/// transport and observer.
///
/// # Example
///
/// ```no_run
/// use serde_json::json;
/// use tracking_client::EventClient;
///
/// #[tokio::main]
/// async fn main() {
///     let client = EventClient::create("my-project", None).expect("valid project id");
///
///     let mut metadata = tracking_client::Metadata::new();
///     metadata.insert("path".to_string(), json!("/pricing"));
///     client.visit(Some(metadata));
///
///     client.click("signup", None);
/// }
/// ```
#[derive(Clone)]
pub struct EventClient {
    project_id: Arc<str>,
    endpoint_url: Arc<str>,
    click_shape: ClickShape,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn DeliveryObserver>,
}

impl fmt::Debug for EventClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClient")
            .field("project_id", &self.project_id)
            .field("endpoint_url", &self.endpoint_url)
            .field("click_shape", &self.click_shape)
            .finish()
    }
}

impl EventClient {
    /// Create a client for `project_id`.
    ///
    /// A `Some` non-empty `endpoint_url` replaces the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidArgument` if `project_id` is empty, or
    /// `ClientError::Config` if the HTTP client cannot be built.
    pub fn create(project_id: &str, endpoint_url: Option<&str>) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(None)?;
        Self::build(project_id, endpoint_url, ClickShape::default(), Arc::new(transport))
    }

    /// Create a client from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidArgument` if the configuration has no
    /// project id or an empty one.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let project_id = config.project_id.as_deref().ok_or_else(|| {
            ClientError::InvalidArgument("project id is required".to_string())
        })?;
        let transport = HttpTransport::new(config.request_timeout)?;

        Self::build(
            project_id,
            Some(config.endpoint_url.as_str()),
            config.click_shape,
            Arc::new(transport),
        )
    }

    fn build(
        project_id: &str,
        endpoint_url: Option<&str>,
        click_shape: ClickShape,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        if project_id.is_empty() {
            return Err(ClientError::InvalidArgument(
                "project id must be a non-empty string".to_string(),
            ));
        }

        let endpoint_url = endpoint_url
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT_URL);

        Ok(Self {
            project_id: Arc::from(project_id),
            endpoint_url: Arc::from(endpoint_url),
            click_shape,
            transport,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the transport used for dispatch.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the delivery observer.
    pub fn with_observer(mut self, observer: Arc<dyn DeliveryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Choose how click metadata is laid out.
    pub fn with_click_shape(mut self, shape: ClickShape) -> Self {
        self.click_shape = shape;
        self
    }

    /// Get the project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Get the configured endpoint URL.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Get the click envelope shape.
    pub fn click_shape(&self) -> ClickShape {
        self.click_shape
    }

    /// Track a click on the control named `label`.
    ///
    /// `None` metadata is treated as an empty mapping; a click is always sent.
    pub fn click(&self, label: &str, metadata: Option<Metadata>) {
        let envelope = EventEnvelope::click(
            self.project_id.to_string(),
            label,
            metadata.unwrap_or_default(),
            self.click_shape,
        );
        self.send(envelope);
    }

    /// Track a log entry.
    pub fn log(&self, metadata: Option<Metadata>) {
        self.track(EventKind::Log, metadata);
    }

    /// Track a generic event.
    pub fn event(&self, metadata: Option<Metadata>) {
        self.track(EventKind::Event, metadata);
    }

    /// Track a page or screen visit.
    pub fn visit(&self, metadata: Option<Metadata>) {
        self.track(EventKind::Visit, metadata);
    }

    /// Track an application error.
    pub fn error(&self, metadata: Option<Metadata>) {
        self.track(EventKind::Error, metadata);
    }

    /// Track an interaction with a form field.
    pub fn form_interact(&self, metadata: Option<Metadata>) {
        self.track(EventKind::FormInteract, metadata);
    }

    /// Track a form submission.
    pub fn form_submit(&self, metadata: Option<Metadata>) {
        self.track(EventKind::FormSubmit, metadata);
    }

    /// Track the start of a session.
    pub fn session_start(&self, metadata: Option<Metadata>) {
        self.track(EventKind::SessionStart, metadata);
    }

    /// Track the end of a session.
    pub fn session_end(&self, metadata: Option<Metadata>) {
        self.track(EventKind::SessionEnd, metadata);
    }

    /// Flat-envelope path shared by every non-click method. `None` is a no-op.
    fn track(&self, kind: EventKind, metadata: Option<Metadata>) {
        let Some(metadata) = metadata else {
            debug!(kind = %kind, "Null metadata, event skipped");
            return;
        };

        self.send(EventEnvelope::flat(kind, self.project_id.to_string(), metadata));
    }

    /// Hand the envelope to a background task. Never blocks, never fails.
    fn send(&self, envelope: EventEnvelope) {
        debug!(
            kind = %envelope.kind,
            url = %self.endpoint_url,
            "Dispatching event"
        );

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                self.observer
                    .on_delivery_error(&envelope, &ClientError::NoRuntime);
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let observer = Arc::clone(&self.observer);
        let url = Arc::clone(&self.endpoint_url);

        handle.spawn(async move {
            match transport.post(&url, &envelope).await {
                Ok(()) => observer.on_delivered(&envelope),
                Err(e) => observer.on_delivery_error(&envelope, &e),
            }
        });
    }
}
