//! Persistence contract consumed by foundation services.
//!
//! # Responsibility
//! - Define the per-record store interface services call into.
//! - Define the shape-only error vocabulary the classifier matches on.
//!
//! # Invariants
//! - Store errors carry their category in the variant, never only in text.
//! - Stores never retry; conflicts surface to the service as-is.
//!
//! # See also
//! - `sqlite` for the SQLite-backed implementation.

use crate::model::{Record, RecordId};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;
mod tables;

pub use sqlite::{SqlRecord, SqliteStore};

/// Boxed underlying failure kept as the cause of a store error.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure, categorized by shape.
#[derive(Debug)]
pub enum StoreError {
    /// A unique key is already taken.
    UniqueViolation(BoxError),
    /// A referenced row does not exist or is still referenced.
    ReferenceViolation(BoxError),
    /// The row changed or vanished between read and write.
    ConcurrencyConflict { id: RecordId },
    /// Storage cannot be reached or is not usable.
    Unavailable(BoxError),
    /// The statement itself failed.
    Operation(BoxError),
    /// Stored data cannot be decoded into a record.
    InvalidData(String),
    Unexpected(BoxError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniqueViolation(err) => write!(f, "unique key violation: {err}"),
            Self::ReferenceViolation(err) => write!(f, "reference violation: {err}"),
            Self::ConcurrencyConflict { id } => {
                write!(f, "row {id} changed or vanished during the operation")
            }
            Self::Unavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Operation(err) => write!(f, "storage operation failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
            Self::Unexpected(err) => write!(f, "unexpected storage failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UniqueViolation(err)
            | Self::ReferenceViolation(err)
            | Self::Unavailable(err)
            | Self::Operation(err)
            | Self::Unexpected(err) => Some(err.as_ref()),
            Self::ConcurrencyConflict { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

/// Structured detail carried by a store error, when the backend has any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreDiagnostic {
    /// Backend result code, e.g. the SQLite extended code.
    pub code: Option<i32>,
    /// Row the failure concerns.
    pub id: Option<RecordId>,
}

impl StoreError {
    pub fn diagnostic(&self) -> StoreDiagnostic {
        match self {
            Self::ConcurrencyConflict { id } => StoreDiagnostic {
                code: None,
                id: Some(*id),
            },
            Self::UniqueViolation(err)
            | Self::ReferenceViolation(err)
            | Self::Unavailable(err)
            | Self::Operation(err)
            | Self::Unexpected(err) => StoreDiagnostic {
                code: sqlite::extended_code(err.as_ref()),
                id: None,
            },
            Self::InvalidData(_) => StoreDiagnostic::default(),
        }
    }
}

/// Store interface for one record type.
pub trait RecordStore<R: Record> {
    fn insert(&self, record: &R) -> StoreResult<R>;
    fn update(&self, record: &R) -> StoreResult<R>;
    fn delete(&self, record: &R) -> StoreResult<R>;
    fn select_by_id(&self, id: RecordId) -> StoreResult<Option<R>>;
    fn select_all(&self) -> StoreResult<Vec<R>>;
}

impl<R: Record, S: RecordStore<R> + ?Sized> RecordStore<R> for &S {
    fn insert(&self, record: &R) -> StoreResult<R> {
        (**self).insert(record)
    }

    fn update(&self, record: &R) -> StoreResult<R> {
        (**self).update(record)
    }

    fn delete(&self, record: &R) -> StoreResult<R> {
        (**self).delete(record)
    }

    fn select_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        (**self).select_by_id(id)
    }

    fn select_all(&self) -> StoreResult<Vec<R>> {
        (**self).select_all()
    }
}
