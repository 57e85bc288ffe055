//! Store trait definitions

use chrono::{DateTime, Local};
use hoslog_api::TripRequest;
use hoslog_util::TripId;
use serde::{Deserialize, Serialize};

use crate::{AuditEvent, StoreResult};

/// Main store trait
pub trait Store: Send + Sync {
    // Trips

    /// Save a planned trip, returning its id
    fn save_trip(&self, record: &TripRecord) -> StoreResult<TripId>;

    /// Look up a trip by id
    fn get_trip(&self, id: &TripId) -> StoreResult<Option<TripRecord>>;

    /// Most recent trips first
    fn list_trips(&self, limit: usize) -> StoreResult<Vec<TripRecord>>;

    /// Trips whose pickup or dropoff location contains `term`, most recent first
    fn search_trips(&self, term: &str, limit: usize) -> StoreResult<Vec<TripRecord>>;

    // Audit log

    /// Append an audit event
    fn append_audit(&self, event: AuditEvent) -> StoreResult<()>;

    /// Get recent audit events
    fn get_recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}

/// A persisted trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: TripId,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_used_hours: f64,
    /// The computed trip (route and daily logs) as returned to the caller
    pub trip_data: serde_json::Value,
    pub created_at: DateTime<Local>,
}

impl TripRecord {
    /// New record for a request, stamped now
    pub fn new(request: &TripRequest, trip_data: serde_json::Value) -> Self {
        Self {
            id: TripId::new(),
            current_location: request.current_location.clone(),
            pickup_location: request.pickup_location.clone(),
            dropoff_location: request.dropoff_location.clone(),
            current_cycle_used_hours: request.current_cycle_used_hours,
            trip_data,
            created_at: hoslog_util::now(),
        }
    }

    pub fn request(&self) -> TripRequest {
        TripRequest {
            current_location: self.current_location.clone(),
            pickup_location: self.pickup_location.clone(),
            dropoff_location: self.dropoff_location.clone(),
            current_cycle_used_hours: self.current_cycle_used_hours,
        }
    }
}
