// Model projection fetching.
//
// Each player's model-computed season total is served by a read-only HTTP
// endpoint keyed by player id. All fetches for a view are issued at once and
// joined before the view is rendered; a failed fetch leaves that player's
// model value at zero.

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::entity::ProjectionRecord;
use crate::metric::MetricKey;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MODEL_PROJECTION_PATH: &str = "/projections/api/player_projections_ml";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("record `{name}` has no id to fetch by")]
    MissingId { name: String },
}

// ---------------------------------------------------------------------------
// ModelSource
// ---------------------------------------------------------------------------

/// Anything that can produce a model projection for a player.
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// The metric the fetched value belongs to.
    fn metric(&self) -> MetricKey {
        MetricKey::Points
    }

    /// Fetch the model value for `player_id`.
    ///
    /// `Ok(None)` means the source answered but carried no value.
    async fn fetch(&self, player_id: u64) -> Result<Option<f64>, FetchError>;
}

/// Body returned by the model projection endpoint.
#[derive(Debug, Deserialize)]
struct ModelProjectionBody {
    #[serde(rename = "PROJECTED_PTS_ML", default)]
    projected_pts: Option<f64>,
}

/// Extract the projected value from a response body.
pub fn parse_model_body(body: &str) -> Result<Option<f64>, FetchError> {
    let parsed: ModelProjectionBody = serde_json::from_str(body)?;
    Ok(parsed.projected_pts.filter(|v| v.is_finite()))
}

/// HTTP client for the model projection endpoint.
pub struct HttpModelSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpModelSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, player_id: u64) -> String {
        format!("{}{}/{}", self.base_url, MODEL_PROJECTION_PATH, player_id)
    }
}

#[async_trait]
impl ModelSource for HttpModelSource {
    async fn fetch(&self, player_id: u64) -> Result<Option<f64>, FetchError> {
        let url = self.endpoint(player_id);
        debug!("fetching model projection from {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        parse_model_body(&body)
    }
}

/// Model source selected from config: a live HTTP client, or nothing.
pub enum ModelClient {
    /// Augmentation endpoint is configured.
    Active(HttpModelSource),
    /// Augmentation is switched off; model values stay at zero.
    Disabled,
}

impl ModelClient {
    pub fn from_config(config: &Config) -> Self {
        let aug = &config.augmentation;
        if aug.enabled && !aug.base_url.is_empty() {
            ModelClient::Active(HttpModelSource::new(aug.base_url.clone()))
        } else {
            ModelClient::Disabled
        }
    }
}

#[async_trait]
impl ModelSource for ModelClient {
    async fn fetch(&self, player_id: u64) -> Result<Option<f64>, FetchError> {
        match self {
            ModelClient::Active(source) => source.fetch(player_id).await,
            ModelClient::Disabled => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Gather
// ---------------------------------------------------------------------------

/// Fetch the model value for every record concurrently and merge the results.
///
/// Returns only after every fetch has settled. Each record's model value for
/// the source's metric ends up either the fetched value or `0.0`. Failures
/// are logged and not retried. Returns the number of successful fetches.
pub async fn gather_model_values<S>(source: &S, records: &mut [ProjectionRecord]) -> usize
where
    S: ModelSource + ?Sized,
{
    let metric = source.metric();

    let requests: Vec<(String, Option<u64>)> = records
        .iter()
        .map(|r| (r.name().to_string(), r.record.id))
        .collect();

    let results = join_all(requests.into_iter().map(|(name, id)| async move {
        match id {
            Some(id) => source.fetch(id).await,
            None => Err(FetchError::MissingId { name }),
        }
    }))
    .await;

    let mut resolved = 0;
    for (record, result) in records.iter_mut().zip(results) {
        match result {
            Ok(Some(value)) => {
                record.set_model(metric, value);
                resolved += 1;
            }
            Ok(None) => record.set_model(metric, 0.0),
            Err(e) => {
                warn!("model projection for {} unavailable: {}", record.name(), e);
                record.set_model(metric, 0.0);
            }
        }
    }

    info!(
        "model projections resolved for {}/{} players",
        resolved,
        records.len()
    );
    resolved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
