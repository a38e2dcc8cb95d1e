//! Table descriptions for the six records.
//!
//! # Invariants
//! - Column lists match the migrated schema and `to_row` order exactly.
//! - Audit columns always come last.

use crate::model::configuration::Configuration;
use crate::model::contribution::Contribution;
use crate::model::contribution_type::ContributionType;
use crate::model::contributor::Contributor;
use crate::model::repository::Repository;
use crate::model::source::Source;
use crate::model::Audit;
use crate::repo::sqlite::{
    audit_values, bool_value, id_value, opt_text_value, read, read_audit, read_bool, read_id,
    text_value, SqlRecord,
};
use crate::repo::StoreResult;
use rusqlite::types::Value;
use rusqlite::Row;

/// Record columns followed by the audit columns.
macro_rules! columns {
    ($($column:literal),* $(,)?) => {
        &[$($column,)* "created_by", "created_date", "updated_by", "updated_date"]
    };
}

fn with_audit(mut values: Vec<Value>, audit: &Audit) -> Vec<Value> {
    values.extend(audit_values(audit));
    values
}

impl SqlRecord for Source {
    const TABLE: &'static str = "sources";
    const COLUMNS: &'static [&'static str] = columns!["id", "name", "url"];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                text_value(&self.name),
                text_value(&self.url),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            name: read(row, "name")?,
            url: read(row, "url")?,
            audit: read_audit(row)?,
        })
    }
}

impl SqlRecord for Configuration {
    const TABLE: &'static str = "configurations";
    const COLUMNS: &'static [&'static str] = columns!["id", "name", "value"];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                text_value(&self.name),
                text_value(&self.value),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            name: read(row, "name")?,
            value: read(row, "value")?,
            audit: read_audit(row)?,
        })
    }
}

impl SqlRecord for ContributionType {
    const TABLE: &'static str = "contribution_types";
    const COLUMNS: &'static [&'static str] = columns!["id", "name", "value"];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                text_value(&self.name),
                Value::Integer(i64::from(self.value)),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            name: read(row, "name")?,
            value: read(row, "value")?,
            audit: read_audit(row)?,
        })
    }
}

impl SqlRecord for Contributor {
    const TABLE: &'static str = "contributors";
    const COLUMNS: &'static [&'static str] = columns![
        "id",
        "source_id",
        "external_id",
        "username",
        "name",
        "avatar_url",
        "email",
    ];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                id_value(self.source_id),
                text_value(&self.external_id),
                text_value(&self.username),
                text_value(&self.name),
                text_value(&self.avatar_url),
                opt_text_value(self.email.as_deref()),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            source_id: read_id(row, "source_id")?,
            external_id: read(row, "external_id")?,
            username: read(row, "username")?,
            name: read(row, "name")?,
            avatar_url: read(row, "avatar_url")?,
            email: read(row, "email")?,
            audit: read_audit(row)?,
        })
    }
}

impl SqlRecord for Repository {
    const TABLE: &'static str = "repositories";
    const COLUMNS: &'static [&'static str] = columns![
        "id",
        "source_id",
        "name",
        "owner",
        "external_id",
        "is_organization",
        "is_private",
        "token",
        "token_expire_at",
        "description",
    ];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                id_value(self.source_id),
                text_value(&self.name),
                text_value(&self.owner),
                text_value(&self.external_id),
                bool_value(self.is_organization),
                bool_value(self.is_private),
                text_value(&self.token),
                Value::Integer(self.token_expire_at),
                opt_text_value(self.description.as_deref()),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            source_id: read_id(row, "source_id")?,
            name: read(row, "name")?,
            owner: read(row, "owner")?,
            external_id: read(row, "external_id")?,
            is_organization: read_bool(row, "is_organization")?,
            is_private: read_bool(row, "is_private")?,
            token: read(row, "token")?,
            token_expire_at: read(row, "token_expire_at")?,
            description: read(row, "description")?,
            audit: read_audit(row)?,
        })
    }
}

impl SqlRecord for Contribution {
    const TABLE: &'static str = "contributions";
    const COLUMNS: &'static [&'static str] = columns![
        "id",
        "repository_id",
        "contributor_id",
        "contribution_type_id",
        "external_id",
        "title",
        "external_created_at",
        "external_merged_at",
    ];

    fn to_row(&self) -> Vec<Value> {
        with_audit(
            vec![
                id_value(self.id),
                id_value(self.repository_id),
                id_value(self.contributor_id),
                id_value(self.contribution_type_id),
                text_value(&self.external_id),
                text_value(&self.title),
                Value::Integer(self.external_created_at),
                self.external_merged_at.map_or(Value::Null, Value::Integer),
            ],
            &self.audit,
        )
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            id: read_id(row, "id")?,
            repository_id: read_id(row, "repository_id")?,
            contributor_id: read_id(row, "contributor_id")?,
            contribution_type_id: read_id(row, "contribution_type_id")?,
            external_id: read(row, "external_id")?,
            title: read(row, "title")?,
            external_created_at: read(row, "external_created_at")?,
            external_merged_at: read(row, "external_merged_at")?,
            audit: read_audit(row)?,
        })
    }
}
