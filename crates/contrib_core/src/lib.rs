//! Core domain logic for the contribution tracker.
//! This crate is the single source of truth for record invariants and the
//! error taxonomy every foundation service raises.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{ConfigError, CoreConfig, ServiceConfig};
pub use error::{classify, ErrorKind, ServiceError, ServiceResult, Severity, Tier};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::configuration::Configuration;
pub use model::contribution::Contribution;
pub use model::contribution_type::ContributionType;
pub use model::contributor::Contributor;
pub use model::repository::Repository;
pub use model::source::Source;
pub use model::{Audit, EpochMs, Field, Record, RecordId, RecordKind};
pub use repo::{RecordStore, SqliteStore, StoreDiagnostic, StoreError, StoreResult};
pub use service::{
    Clock, ConfigurationService, ContributionService, ContributionTypeService,
    ContributorService, CoreLog, ErrorLog, RecordService, RepositoryService, SourceService,
    SystemClock,
};
pub use validation::{RecencyWindow, Subject, Violations};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
