//! eBus HTTP client.
//!
//! Async methods for querying the eBus site. Uses a semaphore to limit
//! concurrent requests; the stop-list fetch carries its own bounded
//! readiness timeout.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{DirectedSequences, DirectedStopEntry, RouteCode, Stop, StopId};
use crate::matcher::{SourceError, TransitSource};

use super::error::EbusError;
use super::types::{RouteStopDto, RoutesOfStopDto, StopsOfRouteDto};

/// Default base URL for the eBus site.
const DEFAULT_BASE_URL: &str = "https://ebus.gov.taipei";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Bounded wait for a route's stop list to materialise.
pub const SEQUENCE_TIMEOUT_SECS: u64 = 10;

/// Configuration for the eBus client.
#[derive(Debug, Clone)]
pub struct EbusConfig {
    /// Base URL for the site (defaults to production eBus)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds (membership and other plain fetches)
    pub timeout_secs: u64,
}

impl EbusConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for EbusConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// eBus site client.
///
/// Provides methods for querying a stop's route membership and a
/// route's directed stop sequences.
#[derive(Debug, Clone)]
pub struct EbusClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl EbusClient {
    /// Create a new eBus client with the given configuration.
    pub fn new(config: EbusConfig) -> Result<Self, EbusError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// The set of route display names serving a stop.
    ///
    /// One page fetch per stop id. Fails outright when the page cannot
    /// be retrieved or parsed; no partial set is ever returned.
    pub async fn routes_of_stop(&self, stop: &StopId) -> Result<BTreeSet<String>, EbusError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| EbusError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/Stop/RoutesOfStop?Stopid={}", self.base_url, stop.as_str());

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbusError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let dto: RoutesOfStopDto = serde_json::from_str(&body).map_err(|e| EbusError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let routes: BTreeSet<String> = dto
            .routes
            .into_iter()
            .map(|r| r.route_name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        debug!(stop = %stop, routes = routes.len(), "fetched route membership");
        Ok(routes)
    }

    /// Both directed stop sequences for a route code.
    ///
    /// The stop list materialises lazily, so this fetch is bounded by
    /// [`SEQUENCE_TIMEOUT_SECS`]; on timeout the route stays
    /// unverified. Position indices are assigned from document order,
    /// 1-based; empty arrival annotations become `None`.
    pub async fn stops_of_route(&self, route: &RouteCode) -> Result<DirectedSequences, EbusError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| EbusError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!(
            "{}/Route/StopsOfRoute?routeid={}",
            self.base_url,
            route.as_str()
        );

        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(SEQUENCE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EbusError::Timeout {
                        secs: SEQUENCE_TIMEOUT_SECS,
                    }
                } else {
                    EbusError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EbusError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let dto: StopsOfRouteDto = serde_json::from_str(&body).map_err(|e| EbusError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let sequences = DirectedSequences {
            outbound: convert_entries(dto.go)?,
            inbound: convert_entries(dto.back)?,
        };

        debug!(
            route = %route,
            outbound = sequences.outbound.len(),
            inbound = sequences.inbound.len(),
            "fetched stop sequences"
        );
        Ok(sequences)
    }
}

/// Convert one direction's DTO entries into domain entries, assigning
/// 1-based position indices from document order.
fn convert_entries(items: Vec<RouteStopDto>) -> Result<Vec<DirectedStopEntry>, EbusError> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let id = StopId::parse(item.uni_stop_id.trim()).map_err(|e| EbusError::Json {
                message: format!("stop id {:?}: {e}", item.uni_stop_id),
                body: None,
            })?;
            let arrival = {
                let text = item.estimate_time.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                }
            };
            Ok(DirectedStopEntry {
                seq: idx as u32 + 1,
                stop: Stop {
                    id,
                    name: item.stop_name.trim().to_string(),
                    latitude: item.latitude,
                    longitude: item.longitude,
                },
                arrival,
            })
        })
        .collect()
}

impl From<EbusError> for SourceError {
    fn from(err: EbusError) -> Self {
        match err {
            EbusError::Timeout { secs } => SourceError::Timeout(secs),
            other => SourceError::Fetch(other.to_string()),
        }
    }
}

impl TransitSource for EbusClient {
    async fn routes_for_stop(&self, stop: &StopId) -> Result<BTreeSet<String>, SourceError> {
        self.routes_of_stop(stop).await.map_err(SourceError::from)
    }

    async fn directed_sequences(&self, route: &RouteCode) -> Result<DirectedSequences, SourceError> {
        self.stops_of_route(route).await.map_err(SourceError::from)
    }
}
