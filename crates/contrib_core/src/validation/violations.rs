//! Ordered violation set.
//!
//! # Invariants
//! - Entries are kept in the record's declared field order, whatever order
//!   the rules ran in.
//! - Messages within one field keep evaluation order.
//! - A whole-record violation never shares the set with field entries.

use crate::model::{Field, RecordKind};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::{Display, Formatter};

/// What a violation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// The record as a whole (it was absent).
    Record,
    Field(Field),
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Field(field) => field.as_str(),
        }
    }
}

/// Field-grouped violation messages produced by the rule evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    order: &'static [Field],
    entries: Vec<(Subject, Vec<String>)>,
}

impl Violations {
    /// Empty set ordered by `order`.
    pub fn new(order: &'static [Field]) -> Self {
        Self {
            order,
            entries: Vec::new(),
        }
    }

    /// The single whole-record violation raised for an absent record.
    pub fn absent(kind: RecordKind) -> Self {
        Self {
            order: &[],
            entries: vec![(Subject::Record, vec![format!("{} is required.", kind.label())])],
        }
    }

    /// Appends `message` to `field`, creating the entry in declared order.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        let subject = Subject::Field(field);
        if let Some((_, messages)) = self.entries.iter_mut().find(|(s, _)| *s == subject) {
            messages.push(message.into());
            return;
        }

        let rank = self.rank(subject);
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| self.rank(*existing) > rank)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, (subject, vec![message.into()]));
    }

    /// Records the outcome of one rule; `None` means the rule passed.
    pub fn check(&mut self, field: Field, outcome: Option<String>) {
        if let Some(message) = outcome {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of violated subjects (not messages).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this set is the whole-record absence sentinel.
    pub fn is_absent(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|(subject, _)| *subject == Subject::Record)
    }

    /// Messages attached to `field`, empty when the field passed.
    pub fn messages(&self, field: Field) -> &[String] {
        self.messages_for(Subject::Field(field))
    }

    pub fn messages_for(&self, subject: Subject) -> &[String] {
        self.entries
            .iter()
            .find(|(s, _)| *s == subject)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subject, &[String])> {
        self.entries
            .iter()
            .map(|(subject, messages)| (*subject, messages.as_slice()))
    }

    /// Violated fields in declared order.
    pub fn fields(&self) -> Vec<Field> {
        self.entries
            .iter()
            .filter_map(|(subject, _)| match subject {
                Subject::Field(field) => Some(*field),
                Subject::Record => None,
            })
            .collect()
    }

    fn rank(&self, subject: Subject) -> usize {
        match subject {
            Subject::Record => 0,
            Subject::Field(field) => self
                .order
                .iter()
                .position(|declared| *declared == field)
                .map_or(self.order.len() + 1, |index| index + 1),
        }
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (subject, messages)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", subject.as_str(), messages.join(" "))?;
        }
        Ok(())
    }
}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (subject, messages) in &self.entries {
            map.serialize_entry(subject.as_str(), messages)?;
        }
        map.end()
    }
}
