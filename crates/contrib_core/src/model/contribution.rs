//! Contribution: one piece of work by a contributor in a repository.
//!
//! # Invariants
//! - References to repository, contributor and contribution type are
//!   required; existence is enforced by storage.
//! - `external_merged_at` stays `None` until the work is merged.

use crate::model::{Audit, EpochMs, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};

pub const CONTRIBUTION_TEXT_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: RecordId,
    pub repository_id: RecordId,
    pub contributor_id: RecordId,
    pub contribution_type_id: RecordId,
    pub external_id: String,
    pub title: String,
    pub external_created_at: EpochMs,
    pub external_merged_at: Option<EpochMs>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Record for Contribution {
    const KIND: RecordKind = RecordKind::Contribution;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::RepositoryId,
        Field::ContributorId,
        Field::ContributionTypeId,
        Field::ExternalId,
        Field::Title,
        Field::ExternalCreatedAt,
        Field::CreatedBy,
        Field::CreatedDate,
        Field::UpdatedBy,
        Field::UpdatedDate,
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn check_fields(&self, violations: &mut Violations) {
        violations.check(Field::RepositoryId, rules::is_invalid_id(self.repository_id));
        violations.check(Field::ContributorId, rules::is_invalid_id(self.contributor_id));
        violations.check(
            Field::ContributionTypeId,
            rules::is_invalid_id(self.contribution_type_id),
        );
        for (field, text) in [
            (Field::ExternalId, &self.external_id),
            (Field::Title, &self.title),
        ] {
            violations.check(field, rules::is_blank(text));
            violations.check(field, rules::exceeds_length(text, CONTRIBUTION_TEXT_MAX_LEN));
        }
        violations.check(
            Field::ExternalCreatedAt,
            rules::is_invalid_date(self.external_created_at),
        );
    }
}
