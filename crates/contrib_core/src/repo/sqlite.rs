//! SQLite-backed record store.
//!
//! # Responsibility
//! - Provide one `RecordStore` implementation shared by all records.
//! - Keep SQL text and SQLite error codes inside the persistence boundary.
//!
//! # Invariants
//! - The first column of every table description is the id column.
//! - SQLite failures are categorized by result code, never by message.
//! - An update or delete that matches no row is a concurrency conflict:
//!   services only write after they have read the row.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{DbError, DbResult};
use crate::model::{Audit, Record, RecordId};
use crate::repo::{RecordStore, StoreError, StoreResult};
use rusqlite::types::{FromSql, Value};
use rusqlite::{ffi, params_from_iter, Connection, ErrorCode, Row};
use std::marker::PhantomData;
use uuid::Uuid;

/// Table description binding a record to its SQLite table.
pub trait SqlRecord: Record {
    const TABLE: &'static str;
    /// Column names in bind order; `COLUMNS[0]` is the id column.
    const COLUMNS: &'static [&'static str];

    /// Values for `COLUMNS`, in the same order.
    fn to_row(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> StoreResult<Self>;
}

/// SQLite-backed store for one record type.
pub struct SqliteStore<'conn, R> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: SqlRecord> SqliteStore<'conn, R> {
    /// Creates a store from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when the record's table is absent.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        ensure_store_connection_ready(conn, R::TABLE)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }
}

impl<R: SqlRecord> RecordStore<R> for SqliteStore<'_, R> {
    fn insert(&self, record: &R) -> StoreResult<R> {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            R::TABLE,
            R::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(record.to_row()))
            .map_err(store_error)?;
        Ok(record.clone())
    }

    fn update(&self, record: &R) -> StoreResult<R> {
        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?1;",
            R::TABLE,
            R::COLUMNS[0]
        );

        let changed = self
            .conn
            .execute(&sql, params_from_iter(record.to_row()))
            .map_err(store_error)?;
        if changed == 0 {
            return Err(StoreError::ConcurrencyConflict { id: record.id() });
        }
        Ok(record.clone())
    }

    fn delete(&self, record: &R) -> StoreResult<R> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1;", R::TABLE, R::COLUMNS[0]);
        let changed = self
            .conn
            .execute(&sql, [record.id().to_string()])
            .map_err(store_error)?;
        if changed == 0 {
            return Err(StoreError::ConcurrencyConflict { id: record.id() });
        }
        Ok(record.clone())
    }

    fn select_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        let sql = format!("{} WHERE {} = ?1;", Self::select_sql(), R::COLUMNS[0]);
        let mut stmt = self.conn.prepare(&sql).map_err(store_error)?;
        let mut rows = stmt.query([id.to_string()]).map_err(store_error)?;
        match rows.next().map_err(store_error)? {
            Some(row) => Ok(Some(R::from_row(row)?)),
            None => Ok(None),
        }
    }

    fn select_all(&self) -> StoreResult<Vec<R>> {
        let sql = format!(
            "{} ORDER BY created_date ASC, {} ASC;",
            Self::select_sql(),
            R::COLUMNS[0]
        );
        let mut stmt = self.conn.prepare(&sql).map_err(store_error)?;
        let mut rows = stmt.query([]).map_err(store_error)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(store_error)? {
            records.push(R::from_row(row)?);
        }
        Ok(records)
    }
}

/// Categorizes a rusqlite failure by result code.
pub fn store_error(err: rusqlite::Error) -> StoreError {
    if matches!(
        err,
        rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
    ) {
        return StoreError::InvalidData(err.to_string());
    }

    let Some((code, extended_code)) = err
        .sqlite_error()
        .map(|failure| (failure.code, failure.extended_code))
    else {
        return StoreError::Operation(Box::new(err));
    };

    match extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            return StoreError::UniqueViolation(Box::new(err));
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
            return StoreError::ReferenceViolation(Box::new(err));
        }
        _ => {}
    }

    match code {
        ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::CannotOpen
        | ErrorCode::SystemIoFailure
        | ErrorCode::DiskFull
        | ErrorCode::DatabaseCorrupt
        | ErrorCode::NotADatabase
        | ErrorCode::PermissionDenied
        | ErrorCode::ReadOnly
        | ErrorCode::OutOfMemory => StoreError::Unavailable(Box::new(err)),
        _ => StoreError::Operation(Box::new(err)),
    }
}

/// SQLite extended result code behind a boxed store cause.
pub(crate) fn extended_code(
    err: &(dyn std::error::Error + Send + Sync + 'static),
) -> Option<i32> {
    err.downcast_ref::<rusqlite::Error>()
        .and_then(rusqlite::Error::sqlite_error)
        .map(|failure| failure.extended_code)
}

pub(crate) fn read<T: FromSql>(row: &Row<'_>, column: &str) -> StoreResult<T> {
    row.get(column).map_err(store_error)
}

pub(crate) fn read_id(row: &Row<'_>, column: &'static str) -> StoreResult<RecordId> {
    let text: String = read(row, column)?;
    Uuid::parse_str(&text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid `{text}` in {column}")))
}

pub(crate) fn read_bool(row: &Row<'_>, column: &'static str) -> StoreResult<bool> {
    match read::<i64>(row, column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid boolean `{other}` in {column}"
        ))),
    }
}

pub(crate) fn read_audit(row: &Row<'_>) -> StoreResult<Audit> {
    Ok(Audit {
        created_by: read(row, "created_by")?,
        created_date: read(row, "created_date")?,
        updated_by: read(row, "updated_by")?,
        updated_date: read(row, "updated_date")?,
    })
}

pub(crate) fn id_value(id: RecordId) -> Value {
    Value::Text(id.to_string())
}

pub(crate) fn text_value(text: &str) -> Value {
    Value::Text(text.to_string())
}

pub(crate) fn opt_text_value(text: Option<&str>) -> Value {
    text.map_or(Value::Null, text_value)
}

pub(crate) fn bool_value(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

pub(crate) fn audit_values(audit: &Audit) -> [Value; 4] {
    [
        text_value(&audit.created_by),
        Value::Integer(audit.created_date),
        text_value(&audit.updated_by),
        Value::Integer(audit.updated_date),
    ]
}

fn ensure_store_connection_ready(conn: &Connection, table: &'static str) -> DbResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(DbError::MissingRequiredTable(table));
    }

    Ok(())
}
