//! Schema steps for the record tables.
//!
//! # Invariants
//! - Steps are numbered 1, 2, 3... with no gaps; `PRAGMA user_version`
//!   holds the number of the last applied step.
//! - Pending steps run in one transaction, so a failed upgrade leaves the
//!   previous version intact.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step and the tables it introduces.
struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "sources_configurations_contribution_types",
        sql: include_str!("0001_init.sql"),
    },
    Step {
        version: 2,
        name: "repositories_contributors_contributions",
        sql: include_str!("0002_repositories_contributions.sql"),
    },
];

/// Schema version a fully migrated connection reports.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `MisorderedMigration` when the step table is not numbered 1..=n.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    check_step_order(STEPS)?;

    let from = current_user_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending = STEPS.iter().filter(|step| step.version > from);
    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(())
}

/// Reads the applied schema version.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn check_step_order(steps: &[Step]) -> DbResult<()> {
    for (expected, step) in (1u32..).zip(steps) {
        if step.version != expected {
            return Err(DbError::MisorderedMigration {
                expected,
                found: step.version,
            });
        }
    }
    Ok(())
}
