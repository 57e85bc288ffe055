//! SQLite-based store implementation

use chrono::{DateTime, Local};
use hoslog_util::TripId;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{AuditEvent, AuditEventType, Store, StoreError, StoreResult, TripRecord};

const TRIP_COLUMNS: &str = "id, current_location, pickup_location, dropoff_location, \
     current_cycle_used_hours, trip_json, created_at";

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Trip row as stored, before the text columns are parsed
struct TripRow {
    id: String,
    current_location: String,
    pickup_location: String,
    dropoff_location: String,
    current_cycle_used_hours: f64,
    trip_json: String,
    created_at: String,
}

impl TripRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            current_location: row.get(1)?,
            pickup_location: row.get(2)?,
            dropoff_location: row.get(3)?,
            current_cycle_used_hours: row.get(4)?,
            trip_json: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_record(self) -> StoreResult<TripRecord> {
        let id = self
            .id
            .parse::<TripId>()
            .map_err(|e| StoreError::Database(format!("bad trip id '{}': {e}", self.id)))?;

        Ok(TripRecord {
            id,
            current_location: self.current_location,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            current_cycle_used_hours: self.current_cycle_used_hours,
            trip_data: serde_json::from_str(&self.trip_json)?,
            created_at: parse_timestamp(&self.created_at),
        })
    }
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r#"
            -- Planned trips
            CREATE TABLE IF NOT EXISTS trips (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                current_location TEXT NOT NULL,
                pickup_location TEXT NOT NULL,
                dropoff_location TEXT NOT NULL,
                current_cycle_used_hours REAL NOT NULL,
                trip_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Audit log (append-only)
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                event_json TEXT NOT NULL
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_trips_created ON trips(created_at);
            CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    fn query_trips(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<TripRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, TripRow::from_row)?;

        let mut trips = Vec::new();
        for row in rows {
            trips.push(row?.into_record()?);
        }
        Ok(trips)
    }
}

impl Store for SqliteStore {
    fn save_trip(&self, record: &TripRecord) -> StoreResult<TripId> {
        let conn = self.lock()?;
        let trip_json = serde_json::to_string(&record.trip_data)?;

        conn.execute(
            r#"
            INSERT INTO trips (id, current_location, pickup_location, dropoff_location,
                               current_cycle_used_hours, trip_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                record.id.to_string(),
                record.current_location,
                record.pickup_location,
                record.dropoff_location,
                record.current_cycle_used_hours,
                trip_json,
                record.created_at.to_rfc3339(),
            ],
        )?;

        debug!(trip_id = %record.id, "Trip saved");
        Ok(record.id.clone())
    }

    fn get_trip(&self, id: &TripId) -> StoreResult<Option<TripRecord>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                &format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?"),
                [id.to_string()],
                TripRow::from_row,
            )
            .optional()?;

        row.map(TripRow::into_record).transpose()
    }

    fn list_trips(&self, limit: usize) -> StoreResult<Vec<TripRecord>> {
        self.query_trips(
            &format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY seq DESC LIMIT ?"),
            params![limit],
        )
    }

    fn search_trips(&self, term: &str, limit: usize) -> StoreResult<Vec<TripRecord>> {
        // instr() rather than LIKE so '%' and '_' in the term match literally
        self.query_trips(
            &format!(
                "SELECT {TRIP_COLUMNS} FROM trips \
                 WHERE instr(lower(pickup_location), lower(?1)) > 0 \
                    OR instr(lower(dropoff_location), lower(?1)) > 0 \
                 ORDER BY seq DESC LIMIT ?2"
            ),
            params![term, limit],
        )
    }

    fn append_audit(&self, mut event: AuditEvent) -> StoreResult<()> {
        let conn = self.lock()?;
        let event_json = serde_json::to_string(&event.event)?;

        conn.execute(
            "INSERT INTO audit_log (timestamp, event_json) VALUES (?, ?)",
            params![event.timestamp.to_rfc3339(), event_json],
        )?;

        event.id = conn.last_insert_rowid();
        debug!(event_id = event.id, "Audit event appended");

        Ok(())
    }

    fn get_recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, event_json FROM audit_log ORDER BY id DESC LIMIT ?",
        )?;

        let rows = stmt.query_map([limit], |row| {
            let id: i64 = row.get(0)?;
            let timestamp_str: String = row.get(1)?;
            let event_json: String = row.get(2)?;
            Ok((id, timestamp_str, event_json))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp_str, event_json) = row?;
            let event: AuditEventType = serde_json::from_str(&event_json)?;

            events.push(AuditEvent {
                id,
                timestamp: parse_timestamp(&timestamp_str),
                event,
            });
        }

        Ok(events)
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

fn parse_timestamp(s: &str) -> DateTime<Local> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local))
        .unwrap_or_else(|_| hoslog_util::now())
}
