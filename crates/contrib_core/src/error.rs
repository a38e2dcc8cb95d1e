//! Tiered error taxonomy raised by foundation services.
//!
//! # Responsibility
//! - Define the one error type that leaves a foundation service.
//! - Map persistence failures onto kinds and tiers by shape only.
//!
//! # Invariants
//! - `tier()` and `severity()` are pure functions of `kind()`.
//! - `classify` never inspects error text, so one store error shape always
//!   yields the same kind.

use crate::model::{RecordId, RecordKind};
use crate::repo::{StoreDiagnostic, StoreError};
use crate::validation::Violations;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Broad category deciding severity and how a caller can react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Caller-fixable input problem.
    Validation,
    /// Caller-fixable problem rooted in stored state.
    DependencyValidation,
    /// Storage failure the caller cannot fix.
    Dependency,
    /// Unclassified failure; treated as a defect.
    Service,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DependencyValidation => "dependency_validation",
            Self::Dependency => "dependency",
            Self::Service => "service",
        }
    }
}

/// Log severity a raised error is dispatched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Error => "error",
        }
    }
}

/// Specific classified error within a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullRecord,
    InvalidRecord,
    NotFound,
    AlreadyExists,
    InvalidReference,
    Locked,
    FailedStorage,
    FailedOperation,
    FailedService,
}

impl ErrorKind {
    pub fn tier(self) -> Tier {
        match self {
            Self::NullRecord | Self::InvalidRecord | Self::NotFound => Tier::Validation,
            Self::AlreadyExists | Self::InvalidReference | Self::Locked => {
                Tier::DependencyValidation
            }
            Self::FailedStorage | Self::FailedOperation => Tier::Dependency,
            Self::FailedService => Tier::Service,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::FailedStorage => Severity::Critical,
            _ => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NullRecord => "null_record",
            Self::InvalidRecord => "invalid_record",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::InvalidReference => "invalid_reference",
            Self::Locked => "locked",
            Self::FailedStorage => "failed_storage",
            Self::FailedOperation => "failed_operation",
            Self::FailedService => "failed_service",
        }
    }
}

/// Error raised by every foundation service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// The submitted record was absent.
    NullRecord {
        record: RecordKind,
        violations: Violations,
    },
    /// One or more field rules failed.
    InvalidRecord {
        record: RecordKind,
        violations: Violations,
    },
    /// No stored record has the requested id.
    NotFound { record: RecordKind, id: RecordId },
    AlreadyExists {
        record: RecordKind,
        source: StoreError,
    },
    InvalidReference {
        record: RecordKind,
        source: StoreError,
    },
    /// The stored row changed or vanished under the operation.
    Locked {
        record: RecordKind,
        source: StoreError,
    },
    FailedStorage {
        record: RecordKind,
        source: StoreError,
    },
    FailedOperation {
        record: RecordKind,
        source: StoreError,
    },
    FailedService {
        record: RecordKind,
        source: StoreError,
    },
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullRecord { .. } => ErrorKind::NullRecord,
            Self::InvalidRecord { .. } => ErrorKind::InvalidRecord,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::Locked { .. } => ErrorKind::Locked,
            Self::FailedStorage { .. } => ErrorKind::FailedStorage,
            Self::FailedOperation { .. } => ErrorKind::FailedOperation,
            Self::FailedService { .. } => ErrorKind::FailedService,
        }
    }

    pub fn tier(&self) -> Tier {
        self.kind().tier()
    }

    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }

    pub fn record(&self) -> RecordKind {
        match self {
            Self::NullRecord { record, .. }
            | Self::InvalidRecord { record, .. }
            | Self::NotFound { record, .. }
            | Self::AlreadyExists { record, .. }
            | Self::InvalidReference { record, .. }
            | Self::Locked { record, .. }
            | Self::FailedStorage { record, .. }
            | Self::FailedOperation { record, .. }
            | Self::FailedService { record, .. } => *record,
        }
    }

    /// Per-field detail for validation errors.
    pub fn data(&self) -> Option<&Violations> {
        match self {
            Self::NullRecord { violations, .. } | Self::InvalidRecord { violations, .. } => {
                Some(violations)
            }
            _ => None,
        }
    }

    /// Structured detail copied from the store failure: the conflicting
    /// row for `Locked`, the backend result code for constraint and
    /// infrastructure failures.
    pub fn diagnostic(&self) -> Option<StoreDiagnostic> {
        self.store_error().map(StoreError::diagnostic)
    }

    /// Wrapped persistence failure, when the error came from storage.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::AlreadyExists { source, .. }
            | Self::InvalidReference { source, .. }
            | Self::Locked { source, .. }
            | Self::FailedStorage { source, .. }
            | Self::FailedOperation { source, .. }
            | Self::FailedService { source, .. } => Some(source),
            Self::NullRecord { .. } | Self::InvalidRecord { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = self.record().label();
        match self {
            Self::NullRecord { .. } => write!(f, "{label} is null"),
            Self::InvalidRecord { violations, .. } => write!(
                f,
                "invalid {}, fix the errors and try again: {violations}",
                self.record()
            ),
            Self::NotFound { id, .. } => {
                write!(f, "couldn't find {} with id: {id}", self.record())
            }
            Self::AlreadyExists { .. } => write!(f, "{label} with the same key already exists"),
            Self::InvalidReference { .. } => {
                write!(f, "invalid {} reference error occurred", self.record())
            }
            Self::Locked { .. } => write!(f, "{label} is locked, please try again"),
            Self::FailedStorage { .. } => {
                write!(f, "failed {} storage error occurred, contact support", self.record())
            }
            Self::FailedOperation { .. } => {
                write!(f, "failed {} operation error occurred", self.record())
            }
            Self::FailedService { .. } => {
                write!(f, "failed {} service error occurred, contact support", self.record())
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.store_error().map(|err| err as &(dyn Error + 'static))
    }
}

/// Maps a persistence failure onto the taxonomy.
pub fn classify(record: RecordKind, error: StoreError) -> ServiceError {
    match error {
        source @ StoreError::UniqueViolation(_) => ServiceError::AlreadyExists { record, source },
        source @ StoreError::ReferenceViolation(_) => {
            ServiceError::InvalidReference { record, source }
        }
        source @ StoreError::ConcurrencyConflict { .. } => ServiceError::Locked { record, source },
        source @ StoreError::Unavailable(_) => ServiceError::FailedStorage { record, source },
        source @ StoreError::Operation(_) => ServiceError::FailedOperation { record, source },
        source @ (StoreError::InvalidData(_) | StoreError::Unexpected(_)) => {
            ServiceError::FailedService { record, source }
        }
    }
}
