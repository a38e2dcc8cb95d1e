//! Foundation services.
//!
//! # Responsibility
//! - Expose add/modify/remove/retrieve entry points per record type.
//! - Keep presentation layers decoupled from storage and error details.
//!
//! # Invariants
//! - All six record services are the same generic engine.

pub mod clock;
pub mod dispatch;
pub mod foundation;

use crate::model::configuration::Configuration;
use crate::model::contribution::Contribution;
use crate::model::contribution_type::ContributionType;
use crate::model::contributor::Contributor;
use crate::model::repository::Repository;
use crate::model::source::Source;

pub use clock::{Clock, SystemClock};
pub use dispatch::{dispatch, CoreLog, ErrorLog};
pub use foundation::RecordService;

pub type ConfigurationService<S, C = SystemClock, L = CoreLog> =
    RecordService<Configuration, S, C, L>;
pub type ContributionService<S, C = SystemClock, L = CoreLog> =
    RecordService<Contribution, S, C, L>;
pub type ContributionTypeService<S, C = SystemClock, L = CoreLog> =
    RecordService<ContributionType, S, C, L>;
pub type ContributorService<S, C = SystemClock, L = CoreLog> = RecordService<Contributor, S, C, L>;
pub type RepositoryService<S, C = SystemClock, L = CoreLog> = RecordService<Repository, S, C, L>;
pub type SourceService<S, C = SystemClock, L = CoreLog> = RecordService<Source, S, C, L>;
