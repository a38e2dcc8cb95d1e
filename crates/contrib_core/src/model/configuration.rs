//! Configuration: a named runtime setting stored alongside the domain data.

use crate::model::{Audit, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONFIGURATION_NAME_MAX_LEN: usize = 450;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: RecordId,
    /// Unique setting key.
    pub name: String,
    pub value: String,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Configuration {
    pub fn new(name: impl Into<String>, value: impl Into<String>, audit: Audit) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value: value.into(),
            audit,
        }
    }
}

impl Record for Configuration {
    const KIND: RecordKind = RecordKind::Configuration;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::Name,
        Field::Value,
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
            rules::exceeds_length(&self.name, CONFIGURATION_NAME_MAX_LEN),
        );
        violations.check(Field::Value, rules::is_blank(&self.value));
    }
}
