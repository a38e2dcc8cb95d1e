//! Domain records served by the foundation services.
//!
//! # Responsibility
//! - Define the six persisted records and their shared audit quad.
//! - Declare, per record, the field order and the field-level rules the
//!   rule evaluator runs before persistence.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`; the nil UUID is the
//!   default sentinel and never a valid identity.
//! - Dates are Unix epoch milliseconds; `0` is the default sentinel.
//! - Violation keys come from the static `Field` table, never from runtime
//!   reflection.

use crate::validation::Violations;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

pub mod configuration;
pub mod contribution;
pub mod contribution_type;
pub mod contributor;
pub mod repository;
pub mod source;

/// Stable identifier shared by all records.
pub type RecordId = Uuid;

/// Unix epoch milliseconds.
pub type EpochMs = i64;

/// Which of the six records an operation or error concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Configuration,
    Contribution,
    ContributionType,
    Contributor,
    Repository,
    Source,
}

impl RecordKind {
    /// Stable machine name, used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Contribution => "contribution",
            Self::ContributionType => "contribution_type",
            Self::Contributor => "contributor",
            Self::Repository => "repository",
            Self::Source => "source",
        }
    }

    /// Capitalized label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Configuration => "Configuration",
            Self::Contribution => "Contribution",
            Self::ContributionType => "Contribution type",
            Self::Contributor => "Contributor",
            Self::Repository => "Repository",
            Self::Source => "Source",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field tags used as keys of the violation data map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Value,
    Url,
    SourceId,
    RepositoryId,
    ContributorId,
    ContributionTypeId,
    ExternalId,
    Username,
    AvatarUrl,
    Email,
    Owner,
    Token,
    TokenExpireAt,
    Description,
    Title,
    ExternalCreatedAt,
    CreatedBy,
    CreatedDate,
    UpdatedBy,
    UpdatedDate,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Value => "value",
            Self::Url => "url",
            Self::SourceId => "source_id",
            Self::RepositoryId => "repository_id",
            Self::ContributorId => "contributor_id",
            Self::ContributionTypeId => "contribution_type_id",
            Self::ExternalId => "external_id",
            Self::Username => "username",
            Self::AvatarUrl => "avatar_url",
            Self::Email => "email",
            Self::Owner => "owner",
            Self::Token => "token",
            Self::TokenExpireAt => "token_expire_at",
            Self::Description => "description",
            Self::Title => "title",
            Self::ExternalCreatedAt => "external_created_at",
            Self::CreatedBy => "created_by",
            Self::CreatedDate => "created_date",
            Self::UpdatedBy => "updated_by",
            Self::UpdatedDate => "updated_date",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit fields every record carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_by: String,
    pub created_date: EpochMs,
    pub updated_by: String,
    pub updated_date: EpochMs,
}

impl Audit {
    /// Audit quad for a record created by `by` at `at`.
    ///
    /// # Invariants
    /// - `updated_by`/`updated_date` mirror the created values, which is
    ///   what the add path requires.
    pub fn created(by: impl Into<String>, at: EpochMs) -> Self {
        let by = by.into();
        Self {
            created_by: by.clone(),
            created_date: at,
            updated_by: by,
            updated_date: at,
        }
    }

    /// Records a modification by `by` at `at`, keeping the created values.
    pub fn touch(&mut self, by: impl Into<String>, at: EpochMs) {
        self.updated_by = by.into();
        self.updated_date = at;
    }
}

/// Contract every record served by a foundation service implements.
pub trait Record: Clone + Debug {
    /// Which record this is.
    const KIND: RecordKind;
    /// Declared field order, identity first and audit quad last.
    const FIELDS: &'static [Field];

    fn id(&self) -> RecordId;
    fn audit(&self) -> &Audit;
    /// Runs the record-specific domain field rules.
    ///
    /// Identity and audit rules are shared and run by the evaluator.
    fn check_fields(&self, violations: &mut Violations);
}
