//! Contributor: an account on a source that authors contributions.
//!
//! # Invariants
//! - `(source_id, external_id)` identifies the account on its platform.
//! - `email` is optional but bounded when present.

use crate::model::{Audit, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};

pub const CONTRIBUTOR_TEXT_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: RecordId,
    pub source_id: RecordId,
    /// Account id on the source platform.
    pub external_id: String,
    pub username: String,
    /// Display name.
    pub name: String,
    pub avatar_url: String,
    pub email: Option<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Record for Contributor {
    const KIND: RecordKind = RecordKind::Contributor;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::SourceId,
        Field::ExternalId,
        Field::Username,
        Field::Name,
        Field::AvatarUrl,
        Field::Email,
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
            (Field::ExternalId, &self.external_id),
            (Field::Username, &self.username),
            (Field::Name, &self.name),
        ] {
            violations.check(field, rules::is_blank(text));
            violations.check(field, rules::exceeds_length(text, CONTRIBUTOR_TEXT_MAX_LEN));
        }
        violations.check(Field::AvatarUrl, rules::is_blank(&self.avatar_url));
        violations.check(
            Field::Email,
            rules::exceeds_length_opt(self.email.as_deref(), CONTRIBUTOR_TEXT_MAX_LEN),
        );
    }
}
