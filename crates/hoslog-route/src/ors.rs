//! OpenRouteService directions client

use async_trait::async_trait;
use hoslog_api::RouteInstruction;
use hoslog_config::RoutingConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{Coordinates, RouteError, RouteProvider, RouteResult, RouteSummary};

/// Directions client for the OpenRouteService v2 API
pub struct OpenRouteServiceClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    summary: DirectionsSummary,
    geometry: Option<String>,
    #[serde(default)]
    segments: Vec<DirectionsSegment>,
}

// ORS leaves out both fields for a zero-length route
#[derive(Debug, Default, Deserialize)]
struct DirectionsSummary {
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct DirectionsSegment {
    #[serde(default)]
    steps: Vec<RouteInstruction>,
}

impl OpenRouteServiceClient {
    pub fn new(
        base_url: &str,
        profile: &str,
        api_key: impl Into<String>,
        timeout: std::time::Duration,
    ) -> RouteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v2/directions/{}/json",
                base_url.trim_end_matches('/'),
                profile
            ),
            api_key: api_key.into(),
        })
    }

    /// Build a client from config, reading the API key from the environment
    pub fn from_config(config: &RoutingConfig) -> RouteResult<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| RouteError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(&config.base_url, &config.profile, api_key, config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RouteProvider for OpenRouteServiceClient {
    async fn route(&self, from: Coordinates, to: Coordinates) -> RouteResult<RouteSummary> {
        let body = json!({ "coordinates": [from.as_pair(), to.as_pair()] });
        debug!(endpoint = %self.endpoint, %body, "Requesting directions");

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                reqwest::header::ACCEPT,
                "application/json, application/geo+json",
            )
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Directions request failed");
            return Err(RouteError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value = response.json().await?;
        let summary = parse_directions(raw)?;
        info!(
            duration_secs = summary.duration_secs,
            distance_m = summary.distance_m,
            steps = summary.steps.len(),
            "Route found"
        );
        Ok(summary)
    }
}

/// Extract the first route from a directions response body
pub fn parse_directions(raw: serde_json::Value) -> RouteResult<RouteSummary> {
    if raw.get("routes").is_none() {
        return Err(RouteError::NoRoutes);
    }

    let parsed: DirectionsResponse =
        serde_json::from_value(raw.clone()).map_err(|e| RouteError::Malformed(e.to_string()))?;
    let route = parsed.routes.into_iter().next().ok_or(RouteError::NoRoutes)?;

    if !route.summary.duration.is_finite() || route.summary.duration < 0.0 {
        return Err(RouteError::Malformed(format!(
            "route duration {}",
            route.summary.duration
        )));
    }

    Ok(RouteSummary {
        duration_secs: route.summary.duration,
        distance_m: route.summary.distance,
        geometry: route.geometry,
        steps: route
            .segments
            .into_iter()
            .next()
            .map(|s| s.steps)
            .unwrap_or_default(),
        raw,
    })
}
