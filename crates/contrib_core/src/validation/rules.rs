//! Primitive field rules.
//!
//! Each rule returns `Some(message)` when it fails and `None` otherwise, so
//! the evaluator can run every rule and keep all failures.

use crate::model::{EpochMs, RecordId};
use crate::validation::recency::RecencyWindow;

pub const INVALID_ID: &str = "Id is invalid.";
pub const REQUIRED_TEXT: &str = "Text is required.";
pub const INVALID_DATE: &str = "Date is invalid.";

pub fn is_invalid_id(id: RecordId) -> Option<String> {
    id.is_nil().then(|| INVALID_ID.to_string())
}

pub fn is_blank(text: &str) -> Option<String> {
    text.trim().is_empty().then(|| REQUIRED_TEXT.to_string())
}

pub fn is_invalid_date(date: EpochMs) -> Option<String> {
    (date == 0).then(|| INVALID_DATE.to_string())
}

/// Fails when `text` is longer than `max_chars` characters.
///
/// The message reports how far over the bound the value is.
pub fn exceeds_length(text: &str, max_chars: usize) -> Option<String> {
    let length = text.chars().count();
    (length > max_chars).then(|| {
        format!(
            "Text exceeds max length by {} characters.",
            length - max_chars
        )
    })
}

/// Optional variant of `exceeds_length`; absent values always pass.
pub fn exceeds_length_opt(text: Option<&str>, max_chars: usize) -> Option<String> {
    text.and_then(|value| exceeds_length(value, max_chars))
}

pub fn is_not_recent(date: EpochMs, now: EpochMs, window: &RecencyWindow) -> Option<String> {
    if window.contains(now, date) {
        return None;
    }
    let (start, end) = window.bounds(now);
    Some(format!(
        "Date is not recent. Expected a value between {start} and {end} but found {date}."
    ))
}

pub fn is_not_same_text(first: &str, second: &str, second_name: &str) -> Option<String> {
    (first != second).then(|| format!("Text is not the same as {second_name}."))
}

pub fn is_not_same_date(first: EpochMs, second: EpochMs, second_name: &str) -> Option<String> {
    (first != second).then(|| format!("Date is not the same as {second_name}."))
}

pub fn is_same_date(first: EpochMs, second: EpochMs, second_name: &str) -> Option<String> {
    (first == second).then(|| format!("Date is the same as {second_name}."))
}
