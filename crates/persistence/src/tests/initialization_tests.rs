// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use gigdesk_domain::EventKind;

use super::{create_persisted_event, create_test_gig};
use crate::Persistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    create_persisted_event(&mut db1, &create_test_gig(1, 1));

    assert_eq!(db1.list_events(EventKind::Gig).unwrap().len(), 1);
    assert!(
        db2.list_events(EventKind::Gig).unwrap().is_empty(),
        "db2 must not see db1's events"
    );
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_events(EventKind::Appointment).is_ok());
    assert!(persistence.list_attendance().is_ok());
    assert!(persistence.list_payouts().is_ok());
    assert!(persistence.list_staff().is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "gigdesk_init_test_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        create_persisted_event(&mut persistence, &create_test_gig(2, 0));
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let events = reopened.list_events(EventKind::Gig).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].staff_needed, 2);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("sqlite3-wal"));
    let _ = std::fs::remove_file(path.with_extension("sqlite3-shm"));
}
