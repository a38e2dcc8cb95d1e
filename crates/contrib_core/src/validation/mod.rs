//! Rule evaluation and violation aggregation.
//!
//! # Responsibility
//! - Evaluate every rule for a record and collect all failures.
//! - Turn a non-empty violation set into exactly one validation error.
//!
//! # Invariants
//! - An absent record short-circuits to the single whole-record violation
//!   and the clock is never read.
//! - Otherwise no rule short-circuits another; the full failing set is
//!   reported.
//! - Evaluation is pure apart from reading `now` at most once.

use crate::error::{ServiceError, ServiceResult};
use crate::model::{EpochMs, Field, Record, RecordId, RecordKind};

pub mod recency;
pub mod rules;
mod violations;

pub use recency::RecencyWindow;
pub use violations::{Subject, Violations};

/// Which lifecycle step a record is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Add,
    Modify,
}

/// Evaluates all rules for `record` at the instant returned by `now`.
pub fn evaluate<R: Record>(
    record: Option<&R>,
    phase: Phase,
    now: impl FnOnce() -> EpochMs,
    window: &RecencyWindow,
) -> Violations {
    let Some(record) = record else {
        return Violations::absent(R::KIND);
    };

    let now = now();
    let audit = record.audit();
    let mut violations = Violations::new(R::FIELDS);

    violations.check(Field::Id, rules::is_invalid_id(record.id()));
    record.check_fields(&mut violations);
    violations.check(Field::CreatedBy, rules::is_blank(&audit.created_by));
    violations.check(Field::UpdatedBy, rules::is_blank(&audit.updated_by));
    violations.check(Field::CreatedDate, rules::is_invalid_date(audit.created_date));
    violations.check(Field::UpdatedDate, rules::is_invalid_date(audit.updated_date));

    match phase {
        Phase::Add => {
            violations.check(
                Field::UpdatedBy,
                rules::is_not_same_text(
                    &audit.updated_by,
                    &audit.created_by,
                    Field::CreatedBy.as_str(),
                ),
            );
            violations.check(
                Field::UpdatedDate,
                rules::is_not_same_date(
                    audit.updated_date,
                    audit.created_date,
                    Field::CreatedDate.as_str(),
                ),
            );
            violations.check(
                Field::CreatedDate,
                rules::is_not_recent(audit.created_date, now, window),
            );
        }
        Phase::Modify => {
            violations.check(
                Field::UpdatedDate,
                rules::is_same_date(
                    audit.updated_date,
                    audit.created_date,
                    Field::CreatedDate.as_str(),
                ),
            );
            violations.check(
                Field::UpdatedDate,
                rules::is_not_recent(audit.updated_date, now, window),
            );
        }
    }

    violations
}

/// Compares a modify submission with the stored copy of the same record.
///
/// # Invariants
/// - `created_by` and `created_date` are immutable once stored.
/// - `updated_date` must move past the stored value.
pub fn evaluate_against_stored<R: Record>(submitted: &R, stored: &R) -> Violations {
    let submitted = submitted.audit();
    let stored = stored.audit();
    let mut violations = Violations::new(R::FIELDS);

    violations.check(
        Field::CreatedBy,
        rules::is_not_same_text(
            &submitted.created_by,
            &stored.created_by,
            "stored created_by",
        ),
    );
    violations.check(
        Field::CreatedDate,
        rules::is_not_same_date(
            submitted.created_date,
            stored.created_date,
            "stored created_date",
        ),
    );
    violations.check(
        Field::UpdatedDate,
        rules::is_same_date(
            submitted.updated_date,
            stored.updated_date,
            "stored updated_date",
        ),
    );

    violations
}

/// Identity-only evaluation used by fetch and remove by id.
pub fn evaluate_id<R: Record>(id: RecordId) -> Violations {
    let mut violations = Violations::new(R::FIELDS);
    violations.check(Field::Id, rules::is_invalid_id(id));
    violations
}

/// Builds the validation error for a non-empty violation set.
pub fn violation_error(record: RecordKind, violations: Violations) -> ServiceError {
    if violations.is_absent() {
        ServiceError::NullRecord { record, violations }
    } else {
        ServiceError::InvalidRecord { record, violations }
    }
}

/// Passes an empty set, raises the complete set otherwise.
pub fn ensure_valid(record: RecordKind, violations: Violations) -> ServiceResult<()> {
    if violations.is_empty() {
        return Ok(());
    }
    Err(violation_error(record, violations))
}

/// Evaluates `record` and hands it back only when every rule passed.
pub fn validate<'a, R: Record>(
    record: Option<&'a R>,
    phase: Phase,
    now: impl FnOnce() -> EpochMs,
    window: &RecencyWindow,
) -> ServiceResult<&'a R> {
    ensure_valid(R::KIND, evaluate(record, phase, now, window))?;
    record.ok_or_else(|| violation_error(R::KIND, Violations::absent(R::KIND)))
}
