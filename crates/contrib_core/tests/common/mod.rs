//! Recording collaborators and record fixtures shared by integration tests.

#![allow(dead_code)]

use contrib_core::{
    Audit, Clock, Configuration, Contribution, ContributionType, Contributor, EpochMs, ErrorKind,
    ErrorLog, Record, RecordId, RecordService, RecordStore, Repository, ServiceError, Severity,
    Source, StoreError, StoreResult,
};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

pub const NOW: EpochMs = 1_700_000_000_000;
pub const AUTHOR: &str = "alice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Insert,
    Update,
    Delete,
    SelectById,
    SelectAll,
}

/// In-memory store that records every call and can fail one of them.
pub struct RecordingStore<R> {
    rows: RefCell<Vec<R>>,
    calls: RefCell<Vec<Call>>,
    failure: RefCell<Option<(Call, StoreError)>>,
}

impl<R: Record> RecordingStore<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(rows: Vec<R>) -> Self {
        Self {
            rows: RefCell::new(rows),
            calls: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
        }
    }

    /// Makes the next `call` return `error` instead of touching rows.
    pub fn fail_on(&self, call: Call, error: StoreError) {
        *self.failure.borrow_mut() = Some((call, error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.borrow().iter().filter(|made| **made == call).count()
    }

    pub fn rows(&self) -> Vec<R> {
        self.rows.borrow().clone()
    }

    fn enter(&self, call: Call) -> StoreResult<()> {
        self.calls.borrow_mut().push(call);
        let mut failure = self.failure.borrow_mut();
        if failure.as_ref().is_some_and(|(target, _)| *target == call) {
            if let Some((_, error)) = failure.take() {
                return Err(error);
            }
        }
        Ok(())
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.rows.borrow().iter().position(|row| row.id() == id)
    }
}

impl<R: Record> RecordStore<R> for RecordingStore<R> {
    fn insert(&self, record: &R) -> StoreResult<R> {
        self.enter(Call::Insert)?;
        self.rows.borrow_mut().push(record.clone());
        Ok(record.clone())
    }

    fn update(&self, record: &R) -> StoreResult<R> {
        self.enter(Call::Update)?;
        let index = self
            .position(record.id())
            .ok_or(StoreError::ConcurrencyConflict { id: record.id() })?;
        self.rows.borrow_mut()[index] = record.clone();
        Ok(record.clone())
    }

    fn delete(&self, record: &R) -> StoreResult<R> {
        self.enter(Call::Delete)?;
        let index = self
            .position(record.id())
            .ok_or(StoreError::ConcurrencyConflict { id: record.id() })?;
        Ok(self.rows.borrow_mut().remove(index))
    }

    fn select_by_id(&self, id: RecordId) -> StoreResult<Option<R>> {
        self.enter(Call::SelectById)?;
        Ok(self.rows.borrow().iter().find(|row| row.id() == id).cloned())
    }

    fn select_all(&self) -> StoreResult<Vec<R>> {
        self.enter(Call::SelectAll)?;
        Ok(self.rows())
    }
}

/// Clock pinned to one instant that counts its reads.
pub struct FixedClock {
    now: EpochMs,
    reads: Cell<usize>,
}

impl FixedClock {
    pub fn at(now: EpochMs) -> Self {
        Self {
            now,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> EpochMs {
        self.reads.set(self.reads.get() + 1);
        self.now
    }
}

/// Error log that keeps `(severity, kind)` of every dispatched error.
#[derive(Default)]
pub struct RecordingLog {
    entries: RefCell<Vec<(Severity, ErrorKind)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(Severity, ErrorKind)> {
        self.entries.borrow().clone()
    }
}

impl ErrorLog for RecordingLog {
    fn log_critical(&self, error: &ServiceError) {
        self.entries
            .borrow_mut()
            .push((Severity::Critical, error.kind()));
    }

    fn log_error(&self, error: &ServiceError) {
        self.entries.borrow_mut().push((Severity::Error, error.kind()));
    }
}

pub type TestService<'a, R> =
    RecordService<R, &'a RecordingStore<R>, &'a FixedClock, &'a RecordingLog>;

pub fn service<'a, R: Record>(
    store: &'a RecordingStore<R>,
    clock: &'a FixedClock,
    log: &'a RecordingLog,
) -> TestService<'a, R> {
    RecordService::with_collaborators(store, clock, log)
}

pub fn fresh_audit() -> Audit {
    Audit::created(AUTHOR, NOW)
}

/// Audit of a record created an hour before `NOW`.
pub fn hour_old_audit() -> Audit {
    Audit::created(AUTHOR, NOW - 3_600_000)
}

pub fn source() -> Source {
    Source::new("GitHub", "https://github.com", fresh_audit())
}

pub fn configuration() -> Configuration {
    Configuration::new("sync.interval", "15m", fresh_audit())
}

pub fn contribution_type() -> ContributionType {
    ContributionType::new("pull_request", 10, fresh_audit())
}

pub fn contributor(source_id: RecordId) -> Contributor {
    Contributor {
        id: Uuid::new_v4(),
        source_id,
        external_id: "583231".to_string(),
        username: "octocat".to_string(),
        name: "The Octocat".to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
        email: None,
        audit: fresh_audit(),
    }
}

pub fn repository(source_id: RecordId) -> Repository {
    Repository {
        id: Uuid::new_v4(),
        source_id,
        name: "hello-world".to_string(),
        owner: "octocat".to_string(),
        external_id: "1296269".to_string(),
        is_organization: false,
        is_private: false,
        token: "ghp_token".to_string(),
        token_expire_at: NOW + 86_400_000,
        description: Some("My first repository".to_string()),
        audit: fresh_audit(),
    }
}

pub fn contribution(
    repository_id: RecordId,
    contributor_id: RecordId,
    contribution_type_id: RecordId,
) -> Contribution {
    Contribution {
        id: Uuid::new_v4(),
        repository_id,
        contributor_id,
        contribution_type_id,
        external_id: "1347".to_string(),
        title: "Fix typo in README".to_string(),
        external_created_at: NOW - 86_400_000,
        external_merged_at: None,
        audit: fresh_audit(),
    }
}
