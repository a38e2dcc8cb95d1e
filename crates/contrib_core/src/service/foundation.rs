//! Foundation service: the per-record operation orchestrator.
//!
//! # Responsibility
//! - Sequence validation, storage reads/writes, classification and logging
//!   identically for every record type.
//!
//! # Invariants
//! - Validation failures make no storage write; add makes no storage call
//!   at all.
//! - The clock is read at most once per operation, before any storage call.
//! - Every error leaving a public operation has been dispatched to the
//!   error log exactly once; successes are never dispatched.
//! - Nothing is retried.

use crate::config::ServiceConfig;
use crate::error::{classify, ServiceError, ServiceResult};
use crate::model::{Record, RecordId};
use crate::repo::{RecordStore, StoreError};
use crate::service::clock::{Clock, SystemClock};
use crate::service::dispatch::{dispatch, CoreLog, ErrorLog};
use crate::validation::{
    ensure_valid, evaluate_against_stored, evaluate_id, validate, Phase, RecencyWindow,
};
use std::marker::PhantomData;

/// Generic foundation service over one record type.
pub struct RecordService<R, S, C = SystemClock, L = CoreLog> {
    store: S,
    clock: C,
    log: L,
    window: RecencyWindow,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, S: RecordStore<R>> RecordService<R, S> {
    /// Creates a service with the wall clock and the `log` facade.
    pub fn new(store: S) -> Self {
        Self::with_collaborators(store, SystemClock, CoreLog)
    }
}

impl<R, S, C, L> RecordService<R, S, C, L>
where
    R: Record,
    S: RecordStore<R>,
    C: Clock,
    L: ErrorLog,
{
    pub fn with_collaborators(store: S, clock: C, log: L) -> Self {
        Self {
            store,
            clock,
            log,
            window: RecencyWindow::default(),
            _record: PhantomData,
        }
    }

    pub fn with_config(mut self, config: &ServiceConfig) -> Self {
        self.window = config.recency_window;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates a new record and inserts it.
    ///
    /// Returns the stored record as the store returned it.
    pub fn add(&self, record: impl Into<Option<R>>) -> ServiceResult<R> {
        let record = record.into();
        self.observe(self.try_add(record.as_ref()))
    }

    /// Validates a changed record against its rules and its stored copy,
    /// then updates it.
    pub fn modify(&self, record: impl Into<Option<R>>) -> ServiceResult<R> {
        let record = record.into();
        self.observe(self.try_modify(record.as_ref()))
    }

    /// Deletes the record stored under `id` and returns it.
    pub fn remove_by_id(&self, id: RecordId) -> ServiceResult<R> {
        self.observe(self.try_remove_by_id(id))
    }

    pub fn retrieve_by_id(&self, id: RecordId) -> ServiceResult<R> {
        self.observe(self.try_retrieve_by_id(id))
    }

    pub fn retrieve_all(&self) -> ServiceResult<Vec<R>> {
        self.observe(self.store.select_all().map_err(Self::classified))
    }

    fn try_add(&self, record: Option<&R>) -> ServiceResult<R> {
        let record = validate(record, Phase::Add, || self.clock.now(), &self.window)?;
        self.store.insert(record).map_err(Self::classified)
    }

    fn try_modify(&self, record: Option<&R>) -> ServiceResult<R> {
        let record = validate(record, Phase::Modify, || self.clock.now(), &self.window)?;
        let stored = self.fetch_existing(record.id())?;
        ensure_valid(R::KIND, evaluate_against_stored(record, &stored))?;
        self.store.update(record).map_err(Self::classified)
    }

    fn try_remove_by_id(&self, id: RecordId) -> ServiceResult<R> {
        ensure_valid(R::KIND, evaluate_id::<R>(id))?;
        let stored = self.fetch_existing(id)?;
        self.store.delete(&stored).map_err(Self::classified)
    }

    fn try_retrieve_by_id(&self, id: RecordId) -> ServiceResult<R> {
        ensure_valid(R::KIND, evaluate_id::<R>(id))?;
        self.fetch_existing(id)
    }

    fn fetch_existing(&self, id: RecordId) -> ServiceResult<R> {
        self.store
            .select_by_id(id)
            .map_err(Self::classified)?
            .ok_or(ServiceError::NotFound {
                record: R::KIND,
                id,
            })
    }

    fn classified(err: StoreError) -> ServiceError {
        classify(R::KIND, err)
    }

    fn observe<T>(&self, result: ServiceResult<T>) -> ServiceResult<T> {
        result.map_err(|err| {
            dispatch(&self.log, &err);
            err
        })
    }
}
