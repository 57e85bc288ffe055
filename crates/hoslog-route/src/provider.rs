//! Route provider trait and a fixed-answer implementation

use async_trait::async_trait;
use hoslog_api::RouteInstruction;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::{Coordinates, RouteError, RouteResult};

/// What the planner needs from a driving route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Driving time in seconds
    pub duration_secs: f64,
    /// Distance in meters
    pub distance_m: f64,
    /// Encoded polyline, passed through untouched
    pub geometry: Option<String>,
    pub steps: Vec<RouteInstruction>,
    /// Full provider response, kept for persistence
    pub raw: serde_json::Value,
}

/// Source of driving routes
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(&self, from: Coordinates, to: Coordinates) -> RouteResult<RouteSummary>;
}

/// Provider that answers every request with the same summary.
///
/// Used offline and in tests; it records the coordinate pairs it was asked for.
pub struct FixedRouteProvider {
    summary: Option<RouteSummary>,
    requests: Mutex<Vec<(Coordinates, Coordinates)>>,
}

impl FixedRouteProvider {
    pub fn new(summary: RouteSummary) -> Self {
        Self {
            summary: Some(summary),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A route of the given driving time with no steps or geometry
    pub fn from_hours(hours: f64) -> Self {
        Self::new(RouteSummary {
            duration_secs: hours * 3600.0,
            distance_m: 0.0,
            geometry: None,
            steps: Vec::new(),
            raw: serde_json::Value::Null,
        })
    }

    /// A provider that finds no route for anything
    pub fn empty() -> Self {
        Self {
            summary: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Coordinates, Coordinates)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RouteProvider for FixedRouteProvider {
    async fn route(&self, from: Coordinates, to: Coordinates) -> RouteResult<RouteSummary> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((from, to));
        }
        self.summary.clone().ok_or(RouteError::NoRoutes)
    }
}
