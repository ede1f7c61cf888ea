// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task runner for the gigdesk workspace.
//!
//! `cargo run -p xtask -- ci` runs everything CI runs: clippy, a format
//! check, the test suite and the migration round trip.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeSet;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Tables every migrated database must contain.
const REQUIRED_TABLES: [&str; 6] = [
    "events",
    "roster_claims",
    "attendance",
    "payouts",
    "staff",
    "audit_events",
];

/// Child tables of `events` and the delete action each must declare.
const EVENT_REFERENCES: [(&str, &str); 3] = [
    ("roster_claims", "CASCADE"),
    ("attendance", "CASCADE"),
    ("payouts", "SET NULL"),
];

/// Column sets that must be backed by a unique index.
const UNIQUE_KEYS: [(&str, &str); 2] = [
    ("roster_claims", "event_id,roster,staff_id"),
    ("attendance", "event_id,staff_id"),
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbosity.log_level_filter().as_trace())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Task,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Task {
    /// Lint, test and verify migrations
    CI,

    /// Build every target
    #[command(visible_alias = "b")]
    Build,

    /// Run clippy with warnings denied and check formatting
    #[command(visible_alias = "l")]
    Lint,

    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    Format,

    /// Run the test suite
    #[command(visible_alias = "t")]
    Test,

    /// Apply, revert and re-apply the `SQLite` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Task {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => {
                lint()?;
                test()?;
                verify_migrations()
            }
            Self::Build => cargo(&["build", "--workspace", "--all-targets"]),
            Self::Lint => lint(),
            Self::Format => cargo(&["fmt", "--all"]),
            Self::Test => test(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Runs `cargo` with `args`, logging the command line first.
fn cargo(args: &[&str]) -> Result<()> {
    tracing::info!("cargo {}", args.join(" "));
    cmd("cargo", args)
        .run()
        .map(drop)
        .wrap_err_with(|| format!("cargo {} failed", args.join(" ")))
}

fn lint() -> Result<()> {
    cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])?;
    cargo(&["fmt", "--all", "--check"])
}

fn test() -> Result<()> {
    cargo(&["test", "--workspace", "--all-targets"])
}

// ============================================================================
// Migration verification
// ============================================================================

/// One column of an application table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    declared_type: String,
    #[diesel(sql_type = Integer)]
    not_null: i32,
    #[diesel(sql_type = Integer)]
    primary_key: i32,
}

/// One foreign key column and the action taken when its parent is deleted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    from_column: String,
    #[diesel(sql_type = Text)]
    parent_table: String,
    #[diesel(sql_type = Text)]
    parent_column: String,
    #[diesel(sql_type = Text)]
    on_delete: String,
}

/// One index with its columns joined by commas in key order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, QueryableByName)]
struct IndexRow {
    #[diesel(sql_type = Text)]
    table_name: String,
    #[diesel(sql_type = Text)]
    index_name: String,
    #[diesel(sql_type = Integer)]
    is_unique: i32,
    #[diesel(sql_type = Text)]
    columns: String,
}

/// Everything the migrations declare, as sorted rows.
#[derive(Debug, PartialEq, Eq)]
struct Schema {
    columns: BTreeSet<ColumnRow>,
    foreign_keys: BTreeSet<ForeignKeyRow>,
    indexes: BTreeSet<IndexRow>,
}

impl Schema {
    fn tables(&self) -> BTreeSet<&str> {
        self.columns
            .iter()
            .map(|column| column.table_name.as_str())
            .collect()
    }
}

const APPLICATION_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
     AND name != '__diesel_schema_migrations'";

/// Reads the schema through SQLite's table-valued pragma functions.
fn introspect(conn: &mut SqliteConnection) -> Result<Schema> {
    let columns: Vec<ColumnRow> = diesel::sql_query(format!(
        "SELECT t.name AS table_name, c.name AS column_name, \
         upper(c.type) AS declared_type, c.\"notnull\" AS not_null, \
         c.pk AS primary_key \
         FROM ({APPLICATION_TABLES}) t JOIN pragma_table_info(t.name) c"
    ))
    .load(conn)
    .wrap_err("Failed to read columns")?;

    let foreign_keys: Vec<ForeignKeyRow> = diesel::sql_query(format!(
        "SELECT t.name AS table_name, f.\"from\" AS from_column, \
         f.\"table\" AS parent_table, coalesce(f.\"to\", '') AS parent_column, \
         f.on_delete AS on_delete \
         FROM ({APPLICATION_TABLES}) t JOIN pragma_foreign_key_list(t.name) f"
    ))
    .load(conn)
    .wrap_err("Failed to read foreign keys")?;

    let indexes: Vec<IndexRow> = diesel::sql_query(format!(
        "SELECT t.name AS table_name, i.name AS index_name, i.\"unique\" AS is_unique, \
         (SELECT group_concat(k.name, ',') FROM \
            (SELECT name FROM pragma_index_info(i.name) ORDER BY seqno) k) AS columns \
         FROM ({APPLICATION_TABLES}) t JOIN pragma_index_list(t.name) i"
    ))
    .load(conn)
    .wrap_err("Failed to read indexes")?;

    Ok(Schema {
        columns: columns.into_iter().collect(),
        foreign_keys: foreign_keys.into_iter().collect(),
        indexes: indexes.into_iter().collect(),
    })
}

/// Lists what the storage layer relies on but the schema lacks.
fn missing_requirements(schema: &Schema) -> Vec<String> {
    let tables = schema.tables();
    let mut missing: Vec<String> = REQUIRED_TABLES
        .iter()
        .filter(|table| !tables.contains(*table))
        .map(|table| format!("table {table}"))
        .collect();

    for (child, action) in EVENT_REFERENCES {
        let declared = schema.foreign_keys.iter().any(|fk| {
            fk.table_name == child
                && fk.from_column == "event_id"
                && fk.parent_table == "events"
                && fk.parent_column == "event_id"
                && fk.on_delete == action
        });
        if !declared {
            missing.push(format!(
                "{child}.event_id -> events(event_id) ON DELETE {action}"
            ));
        }
    }

    for (table, columns) in UNIQUE_KEYS {
        let declared = schema.indexes.iter().any(|index| {
            index.table_name == table && index.is_unique == 1 && index.columns == columns
        });
        if !declared {
            missing.push(format!("UNIQUE ({columns}) on {table}"));
        }
    }

    missing
}

fn log_drift<T: Ord + std::fmt::Debug>(what: &str, first: &BTreeSet<T>, second: &BTreeSet<T>) {
    for row in first.difference(second) {
        tracing::error!("{what} lost on re-apply: {row:?}");
    }
    for row in second.difference(first) {
        tracing::error!("{what} gained on re-apply: {row:?}");
    }
}

/// Applies every migration to a scratch database, checks the result, reverts
/// everything and applies again. The second schema must equal the first.
fn verify_migrations() -> Result<()> {
    let mut conn =
        SqliteConnection::establish(":memory:").wrap_err("Failed to open scratch database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys")?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply migrations: {e}"))?;
    tracing::info!("Applied {} migration(s)", applied.len());

    let first = introspect(&mut conn)?;
    let missing = missing_requirements(&first);
    if !missing.is_empty() {
        for item in &missing {
            tracing::error!("Schema is missing {item}");
        }
        return Err(eyre!("Schema lacks {} required item(s)", missing.len()));
    }

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert migrations: {e}"))?;
    let leftover = introspect(&mut conn)?;
    if !leftover.columns.is_empty() {
        return Err(eyre!(
            "Tables left behind after reverting: {:?}",
            leftover.tables()
        ));
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to re-apply migrations: {e}"))?;
    let second = introspect(&mut conn)?;
    if first != second {
        log_drift("column", &first.columns, &second.columns);
        log_drift("foreign key", &first.foreign_keys, &second.foreign_keys);
        log_drift("index", &first.indexes, &second.indexes);
        return Err(eyre!("Schema changed after revert and re-apply"));
    }

    tracing::info!(
        "Migrations verified: {} tables round-trip cleanly",
        first.tables().len()
    );
    Ok(())
}
