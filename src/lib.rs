//! Tracking Client Library
//!
//! This library sends typed tracking events to a remote collection endpoint,
//! fire-and-forget:
//!
//! - **config**: Environment-based configuration for the client
//! - **event**: Event kinds and the envelope sent per tracking call
//! - **transport**: HTTP transport posting one envelope per request
//! - **observer**: Hooks that see delivery outcomes the caller never does
//! - **client**: The tracking client and its error type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use tracking_client::config::Config;
//! use tracking_client::{EventClient, Metadata, StatsObserver};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Load configuration from environment
//!     let config = Config::from_env().expect("Failed to load config");
//!
//!     // Count delivery outcomes while still logging them
//!     let stats = Arc::new(StatsObserver::new());
//!     let client = EventClient::from_config(&config)
//!         .expect("Failed to create client")
//!         .with_observer(stats.clone());
//!
//!     let mut metadata = Metadata::new();
//!     metadata.insert("path".to_string(), json!("/docs"));
//!     client.session_start(Some(Metadata::new()));
//!     client.visit(Some(metadata));
//!     client.click("download", None);
//! }
//! ```

// Module declarations
pub mod client;
pub mod config;
pub mod event;
pub mod observer;
pub mod transport;

// Re-export commonly used types at crate root for convenience
pub use client::{ClientError, EventClient};
pub use config::{Config, ConfigError, DEFAULT_ENDPOINT_URL};
pub use event::{ClickShape, EventEnvelope, EventKind, Metadata};
pub use observer::{DeliveryObserver, DeliveryStats, NoopObserver, StatsObserver, TracingObserver};
pub use transport::{HttpTransport, Transport};
