//! Source: an external hosting platform contributions are collected from.

use crate::model::{Audit, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SOURCE_NAME_MAX_LEN: usize = 450;
pub const SOURCE_URL_MAX_LEN: usize = 450;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: RecordId,
    pub name: String,
    pub url: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Source {
    /// Creates a source with a generated stable ID.
    pub fn new(name: impl Into<String>, url: impl Into<String>, audit: Audit) -> Self {
        Self::with_id(Uuid::new_v4(), name, url, audit)
    }

    pub fn with_id(
        id: RecordId,
        name: impl Into<String>,
        url: impl Into<String>,
        audit: Audit,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            audit,
        }
    }
}

impl Record for Source {
    const KIND: RecordKind = RecordKind::Source;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::Name,
        Field::Url,
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
        violations.check(Field::Name, rules::is_blank(&self.name));
        violations.check(
            Field::Name,
            rules::exceeds_length(&self.name, SOURCE_NAME_MAX_LEN),
        );
        violations.check(Field::Url, rules::is_blank(&self.url));
        violations.check(Field::Url, rules::exceeds_length(&self.url, SOURCE_URL_MAX_LEN));
    }
}
