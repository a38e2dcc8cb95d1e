//! Contribution type: a category of contribution (pull request, issue,
//! review...) with the score it is worth.

use crate::model::{Audit, Field, Record, RecordId, RecordKind};
use crate::validation::{rules, Violations};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CONTRIBUTION_TYPE_NAME_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionType {
    pub id: RecordId,
    pub name: String,
    /// Score awarded per contribution of this type.
    pub value: i32,
    #[serde(flatten)]
    pub audit: Audit,
}

impl ContributionType {
    pub fn new(name: impl Into<String>, value: i32, audit: Audit) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            audit,
        }
    }
}

impl Record for ContributionType {
    const KIND: RecordKind = RecordKind::ContributionType;
    const FIELDS: &'static [Field] = &[
        Field::Id,
        Field::Name,
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
            rules::exceeds_length(&self.name, CONTRIBUTION_TYPE_NAME_MAX_LEN),
        );
    }
}
