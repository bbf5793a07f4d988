//! Preferences schema migrations.
//!
//! Versions are mirrored to `PRAGMA user_version`. Pending scripts run in
//! one transaction, so a failing script leaves the previous version intact.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// `(version, script)` in strictly increasing version order.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Schema transition performed by [`apply_migrations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from: u32,
    pub to: u32,
}

impl MigrationReport {
    pub fn applied(&self) -> u32 {
        self.to - self.from
    }
}

pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from = schema_version(conn)?;
    let supported = latest_version();
    if from > supported {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported,
        });
    }

    let pending = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > from)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(MigrationReport { from, to: from });
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        tx.execute_batch(script)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration {
                version: *version,
                source,
            })?;
    }
    tx.commit()?;
    Ok(MigrationReport {
        from,
        to: supported,
    })
}
