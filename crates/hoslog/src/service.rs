//! Trip service: request in, persisted trip response out

use hoslog_api::{TripLog, TripRequest, TripResponse};
use hoslog_config::Policy;
use hoslog_core::TripPlanner;
use hoslog_route::{FixedRouteProvider, Geocoder, RouteProvider, RouteSummary};
use hoslog_store::{AuditEvent, AuditEventType, Store, TripRecord};
use hoslog_util::{as_hours_f64, HoslogError, Result, TripId};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What gets persisted alongside a trip's request fields
#[derive(Debug, Serialize)]
struct StoredTrip<'a> {
    route_data: &'a serde_json::Value,
    trip_log: &'a TripLog,
}

pub struct TripService {
    planner: TripPlanner,
    geocoder: Geocoder,
    routes: Arc<dyn RouteProvider>,
    store: Arc<dyn Store>,
}

impl TripService {
    pub fn new(policy: &Policy, routes: Arc<dyn RouteProvider>, store: Arc<dyn Store>) -> Self {
        Self {
            planner: TripPlanner::new(policy.rules.clone()),
            geocoder: Geocoder::from_config(&policy.routing),
            routes,
            store,
        }
    }

    pub fn planner(&self) -> &TripPlanner {
        &self.planner
    }

    /// Validate, route, plan and save a trip.
    ///
    /// The route runs from pickup to dropoff; the current location is kept
    /// on the record only.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripResponse> {
        let cycle_limit = as_hours_f64(self.planner.rules().cycle_limit);
        if let Err(e) = request.validate_with_limit(cycle_limit) {
            self.audit(AuditEventType::RequestRejected {
                reason: e.to_string(),
            });
            return Err(e);
        }

        let from = self.geocoder.resolve(&request.pickup_location);
        let to = self.geocoder.resolve(&request.dropoff_location);

        let route: RouteSummary = match self.routes.route(from, to).await {
            Ok(route) => route,
            Err(e) => {
                warn!(error = %e, "Route lookup failed");
                self.audit(AuditEventType::RouteLookupFailed {
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };

        let plan = self
            .planner
            .plan(route.duration_secs, request.current_cycle_used_hours);
        let log = plan.to_trip_log();
        if !log.is_complete() {
            warn!(outcome = %log.outcome, "Trip could not be fully planned");
        }

        let trip_data = serde_json::to_value(StoredTrip {
            route_data: &route.raw,
            trip_log: &log,
        })
        .map_err(|e| HoslogError::internal(format!("encoding trip: {e}")))?;
        let trip_id = self.store.save_trip(&TripRecord::new(request, trip_data))?;

        info!(
            trip_id = %trip_id,
            outcome = %log.outcome,
            days = log.days,
            distance_miles = plan.distance_miles,
            "Trip planned"
        );
        self.audit(AuditEventType::TripPlanned {
            trip_id: trip_id.clone(),
            outcome: log.outcome,
            days: log.days,
            driving_hours: log.driving_hours_covered,
        });

        Ok(TripResponse {
            trip_id: Some(trip_id.to_string()),
            route_instructions: route.steps,
            route_geometry: route.geometry,
            daily_logs: log.entries,
            outcome: log.outcome,
        })
    }

    /// Saved trips, most recent first, optionally filtered by location
    pub fn history(&self, search: Option<&str>, limit: usize) -> Result<Vec<TripRecord>> {
        let trips = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => self.store.search_trips(term, limit)?,
            None => self.store.list_trips(limit)?,
        };
        Ok(trips)
    }

    pub fn trip(&self, id: &TripId) -> Result<TripRecord> {
        self.store
            .get_trip(id)?
            .ok_or_else(|| HoslogError::TripNotFound(id.clone()))
    }

    // Audit failures never fail the request
    fn audit(&self, event: AuditEventType) {
        if let Err(e) = self.store.append_audit(AuditEvent::new(event)) {
            warn!(error = %e, "Failed to append audit event");
        }
    }
}

/// Fixed-duration routes for planning without the routing service
pub fn offline_routes(hours: f64) -> Result<FixedRouteProvider> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(HoslogError::validation(format!(
            "offline driving hours must be a non-negative number, got {hours}"
        )));
    }
    Ok(FixedRouteProvider::from_hours(hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoslog_api::{DutyStatus, PlanOutcome};
    use hoslog_route::Coordinates;
    use hoslog_store::SqliteStore;

    fn request(hours: f64) -> TripRequest {
        TripRequest {
            current_location: "Washington, D.C.".into(),
            pickup_location: "Washington, D.C.".into(),
            dropoff_location: "Baltimore, MD".into(),
            current_cycle_used_hours: hours,
        }
    }

    fn service(routes: FixedRouteProvider) -> (TripService, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = TripService::new(&Policy::default(), Arc::new(routes), store.clone());
        (service, store)
    }

    #[tokio::test]
    async fn plans_and_saves_trip() {
        let (service, store) = service(FixedRouteProvider::from_hours(8.0));

        let response = service.plan_trip(&request(10.0)).await.unwrap();
        assert_eq!(response.outcome, PlanOutcome::Completed);
        assert_eq!(response.daily_logs[0].status, DutyStatus::OnDuty);

        let id: TripId = response.trip_id.unwrap().parse().unwrap();
        let record = service.trip(&id).unwrap();
        assert_eq!(record.dropoff_location, "Baltimore, MD");
        assert_eq!(record.trip_data["trip_log"]["outcome"], "completed");

        let audits = store.get_recent_audits(10).unwrap();
        assert!(matches!(audits[0].event, AuditEventType::TripPlanned { .. }));
    }

    #[tokio::test]
    async fn invalid_request_not_routed() {
        let routes = Arc::new(FixedRouteProvider::from_hours(1.0));
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let service = TripService::new(&Policy::default(), routes.clone(), store.clone());

        let result = service.plan_trip(&request(71.0)).await;
        assert!(matches!(result, Err(HoslogError::ValidationError(_))));
        assert!(routes.requests().is_empty());
        assert!(store.list_trips(10).unwrap().is_empty());
        assert!(matches!(
            store.get_recent_audits(1).unwrap()[0].event,
            AuditEventType::RequestRejected { .. }
        ));
    }

    #[tokio::test]
    async fn route_failure_reported() {
        let (service, store) = service(FixedRouteProvider::empty());

        let result = service.plan_trip(&request(0.0)).await;
        assert!(matches!(result, Err(HoslogError::RoutingError(_))));
        assert!(store.list_trips(10).unwrap().is_empty());
    }

    #[test]
    fn unknown_trip() {
        let (service, _) = service(FixedRouteProvider::from_hours(1.0));
        assert!(matches!(
            service.trip(&TripId::new()),
            Err(HoslogError::TripNotFound(_))
        ));
    }

    #[tokio::test]
    async fn offline_routes_use_the_given_hours() {
        let routes = offline_routes(2.5).unwrap();
        let here = Coordinates::new(-77.0, 38.9);
        let route = routes.route(here, here).await.unwrap();
        assert_eq!(route.duration_secs, 9000.0);

        assert!(offline_routes(0.0).is_ok());
    }

    #[test]
    fn offline_routes_reject_bad_hours() {
        for hours in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                offline_routes(hours),
                Err(HoslogError::ValidationError(_))
            ));
        }
    }
}
