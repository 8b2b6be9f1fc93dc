//! buoycast-client
//!
//! NDFD transport and typed-observation layer around the
//! `buoycast-core` reconciliation engine.
//!
//! This crate owns request construction, the HTTP fetch, XML tree
//! building, and shaping reconciled records into [`MarineForecast`]
//! values. It does **not** contain any merge logic; that lives in
//! `buoycast-core` and stays pure.

pub mod observation;
pub mod request;

pub use observation::{ForecastSeries, MarineForecast, Measurement};
pub use request::{ForecastRequest, RequestError, UnitSystem};

use std::fmt;

use buoycast_core::{reconcile, ReconcileError, MARINE_LOCATORS};
use buoycast_xml::{Document, XmlError};

/// Production NDFD endpoint host.
pub const NDFD_BASE_URL: &str = "https://graphical.weather.gov";

const NDFD_ENDPOINT_PATH: &str = "/xml/sample_products/browser_interface/ndfdXMLclient.php";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from a forecast fetch, across every layer it touches.
#[derive(Debug)]
pub enum FeedError {
    /// The request failed local validation; nothing was sent.
    Request(RequestError),
    /// Network or transport failure.
    Transport(String),
    /// The endpoint answered with a non-success HTTP status.
    Status { code: u16 },
    /// The response body was not a usable XML document.
    Xml(XmlError),
    /// The document could not be reconciled (malformed timestamp).
    Reconcile(ReconcileError),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Request(e) => write!(f, "invalid request: {e}"),
            FeedError::Transport(msg) => write!(f, "transport error: {msg}"),
            FeedError::Status { code } => write!(f, "ndfd http status {code}"),
            FeedError::Xml(e) => write!(f, "response body rejected: {e}"),
            FeedError::Reconcile(e) => write!(f, "reconciliation failed: {e}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Request(e) => Some(e),
            FeedError::Xml(e) => Some(e),
            FeedError::Reconcile(e) => Some(e),
            FeedError::Transport(_) | FeedError::Status { .. } => None,
        }
    }
}

impl From<RequestError> for FeedError {
    fn from(e: RequestError) -> Self {
        FeedError::Request(e)
    }
}

impl From<XmlError> for FeedError {
    fn from(e: XmlError) -> Self {
        FeedError::Xml(e)
    }
}

impl From<ReconcileError> for FeedError {
    fn from(e: ReconcileError) -> Self {
        FeedError::Reconcile(e)
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Transport(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Forecast source contract, object-safe so callers can hold a
/// `Box<dyn ForecastProvider>` without knowing the concrete transport.
#[async_trait::async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Human-readable name identifying this provider (e.g. `"ndfd"`).
    fn source_name(&self) -> &'static str;

    /// Fetch and reconcile the marine time-series for `req`.
    async fn marine_forecast(&self, req: &ForecastRequest) -> Result<ForecastSeries, FeedError>;
}

// ---------------------------------------------------------------------------
// NDFD client
// ---------------------------------------------------------------------------

/// HTTP client for the NDFD graphical forecast REST endpoint.
#[derive(Debug, Clone)]
pub struct NdfdClient {
    http: reqwest::Client,
    base_url: String,
}

impl NdfdClient {
    pub fn new() -> Self {
        Self::new_with_base_url(NDFD_BASE_URL.to_string())
    }

    /// Point the client at a different host (tests use a mock server).
    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), NDFD_ENDPOINT_PATH)
    }
}

impl Default for NdfdClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ForecastProvider for NdfdClient {
    fn source_name(&self) -> &'static str {
        "ndfd"
    }

    async fn marine_forecast(&self, req: &ForecastRequest) -> Result<ForecastSeries, FeedError> {
        req.validate()?;

        tracing::debug!(
            lat = req.latitude,
            lon = req.longitude,
            begin = %req.begin,
            end = %req.end,
            "requesting ndfd time-series"
        );

        let response = self
            .http
            .get(self.endpoint_url())
            .query(&req.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let doc = Document::parse(&body)?;
        let outcome = reconcile(&doc, MARINE_LOCATORS)?;

        if outcome.skipped_layout_blocks > 0 {
            tracing::warn!(
                skipped = outcome.skipped_layout_blocks,
                "time-layout blocks without a layout-key were skipped"
            );
        }

        Ok(ForecastSeries::from_records(outcome.records, req.units))
    }
}

// ---------------------------------------------------------------------------
// Tests (no network; transport covered in tests/)
// ---------------------------------------------------------------------------
