//! Repository: a code repository hosted on a source.

use crate::model::{Audit, EpochMs, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};

pub const REPOSITORY_TEXT_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: RecordId,
    pub source_id: RecordId,
    pub name: String,
    pub owner: String,
    pub external_id: String,
    pub is_organization: bool,
    pub is_private: bool,
    /// Access token used to pull contributions.
    pub token: String,
    pub token_expire_at: EpochMs,
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Record for Repository {
    const KIND: RecordKind = RecordKind::Repository;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::SourceId,
        Field::Name,
        Field::Owner,
        Field::ExternalId,
        Field::Token,
        Field::TokenExpireAt,
        Field::Description,
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
        violations.check(Field::SourceId, rules::is_invalid_id(self.source_id));
        for (field, text) in [
            (Field::Name, &self.name),
            (Field::Owner, &self.owner),
            (Field::ExternalId, &self.external_id),
        ] {
            violations.check(field, rules::is_blank(text));
            violations.check(field, rules::exceeds_length(text, REPOSITORY_TEXT_MAX_LEN));
        }
        violations.check(Field::Token, rules::is_blank(&self.token));
        violations.check(
            Field::TokenExpireAt,
            rules::is_invalid_date(self.token_expire_at),
        );
        violations.check(
            Field::Description,
            rules::exceeds_length_opt(self.description.as_deref(), REPOSITORY_TEXT_MAX_LEN),
        );
    }
}
