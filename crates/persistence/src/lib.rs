// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for gigdesk.
//!
//! Stores bookable events, their rosters, attendance records, payouts, the
//! staff directory and the audit trail in `SQLite` through Diesel.
//!
//! ## Layout
//!
//! - `backend` holds the little raw SQL Diesel cannot express: connection
//!   setup, PRAGMA configuration, migrations and `last_insert_rowid()`.
//! - `queries` holds read-only Diesel DSL queries.
//! - `mutations` holds writes. Each state change is written together with
//!   its audit event inside one immediate transaction.
//!
//! ## Concurrency
//!
//! Writes against an existing event are guarded by the event's `version`
//! column. Callers pass the version they loaded; if another writer has
//! committed since, the write fails with `ConcurrentModification` and
//! nothing is stored. A unique index on `(event, roster, staff)` backs the
//! one-claim-per-roster rule independently of that check.
//!
//! ## Testing
//!
//! `new_in_memory()` gives every caller its own shared-cache in-memory
//! database, so tests never observe each other's data.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use gigdesk_audit::AuditEvent;
use gigdesk_domain::{
    AttendanceRecord, BookableEvent, EventKind, EventRef, PayoutQuote, StaffId, StaffMember,
};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AttendanceListing, PayoutRecord};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter over one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Events & Rosters
    // ========================================================================

    /// Stores a newly created event and its audit event.
    ///
    /// Returns the event with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_event(
        &mut self,
        event: &BookableEvent,
        audit_event: &AuditEvent,
    ) -> Result<BookableEvent, PersistenceError> {
        mutations::persist_new_event(&mut self.conn, event, audit_event)
    }

    /// Deletes an event last seen at `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` or `ConcurrentModification` when the event
    /// is gone or has changed.
    pub fn delete_event(
        &mut self,
        event_ref: EventRef,
        expected_version: i64,
        audit_event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::persist_event_deletion(&mut self.conn, event_ref, expected_version, audit_event)
    }

    /// Loads an event with both rosters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_event(
        &mut self,
        event_ref: EventRef,
    ) -> Result<Option<BookableEvent>, PersistenceError> {
        queries::events::lookup_event(&mut self.conn, event_ref)
    }

    /// Lists events of one kind, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(&mut self, kind: EventKind) -> Result<Vec<BookableEvent>, PersistenceError> {
        queries::events::list_events(&mut self.conn, kind)
    }

    /// Stores a roster transition computed from `before`.
    ///
    /// Returns `after` at its new version.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the event changed after `before`
    /// was loaded.
    pub fn persist_roster_transition(
        &mut self,
        event_ref: EventRef,
        before: &BookableEvent,
        after: &BookableEvent,
        audit_event: &AuditEvent,
    ) -> Result<BookableEvent, PersistenceError> {
        mutations::persist_roster_transition(&mut self.conn, event_ref, before, after, audit_event)
    }

    // ========================================================================
    // Attendance & Payouts
    // ========================================================================

    /// Loads one staff member's attendance record at an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_attendance(
        &mut self,
        event_ref: EventRef,
        staff_id: &StaffId,
    ) -> Result<Option<AttendanceRecord>, PersistenceError> {
        queries::attendance::lookup_attendance(&mut self.conn, event_ref, staff_id)
    }

    /// Stores an attendance record against an event last seen at
    /// `expected_version`. Returns the event's new version.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the event changed meanwhile.
    pub fn persist_attendance(
        &mut self,
        event_ref: EventRef,
        expected_version: i64,
        record: &AttendanceRecord,
        audit_event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_attendance(
            &mut self.conn,
            event_ref,
            expected_version,
            record,
            audit_event,
        )
    }

    /// Marks a record paid and records its payout. Returns the payout ID.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the event changed meanwhile.
    pub fn persist_payment(
        &mut self,
        event_ref: EventRef,
        expected_version: i64,
        record: &AttendanceRecord,
        quote: &PayoutQuote,
        paid_at: OffsetDateTime,
        audit_event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_payment(
            &mut self.conn,
            event_ref,
            expected_version,
            record,
            quote,
            paid_at,
            audit_event,
        )
    }

    /// Lists all attendance records with their events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attendance(&mut self) -> Result<Vec<AttendanceListing>, PersistenceError> {
        queries::attendance::list_attendance(&mut self.conn)
    }

    /// Lists recorded payouts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payouts(&mut self) -> Result<Vec<PayoutRecord>, PersistenceError> {
        queries::payouts::list_payouts(&mut self.conn)
    }

    // ========================================================================
    // Staff Directory
    // ========================================================================

    /// Adds a staff member to the directory.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the username is taken.
    pub fn register_staff(
        &mut self,
        member: &StaffMember,
        audit_event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        mutations::persist_staff_registration(&mut self.conn, member, audit_event)
    }

    /// Lists the staff directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_staff(&mut self) -> Result<Vec<StaffMember>, PersistenceError> {
        queries::staff::list_staff(&mut self.conn)
    }

    /// Resolves display names for usernames; unknown usernames map to
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn display_names(
        &mut self,
        staff_ids: &[&StaffId],
    ) -> Result<HashMap<String, String>, PersistenceError> {
        queries::staff::display_names(&mut self.conn, staff_ids)
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, audit_event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, audit_event_id)
    }

    /// Retrieves the audit timeline of one event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        event_ref: EventRef,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, event_ref)
    }
}
