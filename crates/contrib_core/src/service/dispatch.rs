//! Error log collaborator and severity dispatch.
//!
//! # Invariants
//! - `dispatch` makes exactly one log call per error.
//! - Only `FailedStorage` is logged as critical.

use crate::error::{ServiceError, Severity};
use log::error;

/// Logging collaborator receiving every raised service error.
pub trait ErrorLog {
    fn log_critical(&self, error: &ServiceError);
    fn log_error(&self, error: &ServiceError);
}

impl<L: ErrorLog + ?Sized> ErrorLog for &L {
    fn log_critical(&self, error: &ServiceError) {
        (**self).log_critical(error);
    }

    fn log_error(&self, error: &ServiceError) {
        (**self).log_error(error);
    }
}

/// Forwards service errors to the `log` facade.
///
/// `log` has no critical level; critical errors go out at `error` level
/// with `severity=critical`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreLog;

impl CoreLog {
    fn emit(severity: Severity, err: &ServiceError) {
        error!("{}", event_line(severity, err));
    }
}

impl ErrorLog for CoreLog {
    fn log_critical(&self, error: &ServiceError) {
        Self::emit(Severity::Critical, error);
    }

    fn log_error(&self, error: &ServiceError) {
        Self::emit(Severity::Error, error);
    }
}

fn event_line(severity: Severity, err: &ServiceError) -> String {
    format!(
        "event=service_error module=service status=error severity={} record={} kind={} tier={} error={err}",
        severity.as_str(),
        err.record(),
        err.kind().as_str(),
        err.tier().as_str()
    )
}

/// Logs `error` once at the severity its kind implies.
pub fn dispatch(log: &impl ErrorLog, error: &ServiceError) {
    match error.severity() {
        Severity::Critical => log.log_critical(error),
        Severity::Error => log.log_error(error),
    }
}
