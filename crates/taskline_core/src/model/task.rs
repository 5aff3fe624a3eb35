//! Task variants and their shared capability set.
//!
//! # Responsibility
//! - Model the closed set of task kinds: undated, deadline-bound, time-ranged.
//! - Provide done-flag flips, snoozing, rendering, and the persisted record
//!   codec for one task.
//!
//! # Invariants
//! - `description` is non-empty after trimming.
//! - Dated variants hold fields that parsed successfully at construction;
//!   a task is never created in a partially-valid state.
//! - `description` never contains the record delimiter `|`, so every
//!   constructed task round-trips through its persisted record.
//! - Snoozing a time-ranged task moves both bounds by the same delta, so the
//!   duration between them is preserved exactly; a snooze that fails leaves
//!   both bounds where they were.

use crate::error::{DomainError, TasklineError, TasklineResult};
use crate::model::date_time::DateTimeValue;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Kind-specific data for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    /// No temporal anchor.
    Todo,
    /// Due at a single instant.
    Deadline { due: DateTimeValue },
    /// Occupies the closed interval `[start, end]`.
    Event {
        start: DateTimeValue,
        end: DateTimeValue,
    },
}

/// Duration unit accepted by snooze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeUnit {
    Day,
    Hour,
    Minute,
}

impl SnoozeUnit {
    /// Normalizes a unit token: `days -> day`, `hours -> hour`,
    /// `minutes|min -> minute`. Any other token is rejected.
    pub fn parse(token: &str) -> TasklineResult<Self> {
        match token.to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" | "min" => Ok(Self::Minute),
            other => Err(DomainError::UnknownUnit(other.to_string()).into()),
        }
    }
}

impl Display for SnoozeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
        };
        write!(f, "{name}")
    }
}

/// What a snooze call did to the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeOutcome {
    /// The relevant date/time field(s) moved forward.
    Moved,
    /// The task is undated; nothing to move. Deliberately not an error.
    NoTemporalAnchor,
}

/// A unit of tracked work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
    done: bool,
    #[serde(flatten)]
    kind: TaskKind,
}

impl Task {
    fn new(description: &str, kind: TaskKind) -> TasklineResult<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DomainError::EmptyDescription {
                task_type: kind_name(&kind),
            }
            .into());
        }
        if description.contains('|') {
            return Err(DomainError::ReservedCharacter('|').into());
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    /// Creates an undated task.
    pub fn todo(description: &str) -> TasklineResult<Self> {
        Self::new(description, TaskKind::Todo)
    }

    /// Creates a deadline-bound task; `due_text` must parse as `d/M/yyyy HHmm`.
    pub fn deadline(description: &str, due_text: &str) -> TasklineResult<Self> {
        let due = DateTimeValue::parse(due_text).map_err(TasklineError::Format)?;
        Self::new(description, TaskKind::Deadline { due })
    }

    /// Creates a time-ranged task; both bounds must parse as `d/M/yyyy HHmm`.
    pub fn event(description: &str, start_text: &str, end_text: &str) -> TasklineResult<Self> {
        let start = DateTimeValue::parse(start_text).map_err(TasklineError::Format)?;
        let end = DateTimeValue::parse(end_text).map_err(TasklineError::Format)?;
        Self::new(description, TaskKind::Event { start, end })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Flags the task as done. Idempotent.
    pub fn mark(&mut self) {
        self.done = true;
    }

    /// Flags the task as not done. Idempotent.
    pub fn unmark(&mut self) {
        self.done = false;
    }

    /// Pushes the task's date/time field(s) forward by `amount` units.
    ///
    /// Deadline-bound tasks advance `due`; time-ranged tasks advance both
    /// bounds by the same delta. Undated tasks have no anchor to move and
    /// report [`SnoozeOutcome::NoTemporalAnchor`] instead of failing.
    ///
    /// # Errors
    /// [`DomainError::DateOutOfRange`] when the delta would push a field past
    /// the representable date range; the task is left unchanged, never with
    /// one event bound moved and the other not.
    pub fn snooze(&mut self, unit: SnoozeUnit, amount: u32) -> TasklineResult<SnoozeOutcome> {
        let (days, hours, minutes) = match unit {
            SnoozeUnit::Day => (i64::from(amount), 0, 0),
            SnoozeUnit::Hour => (0, i64::from(amount), 0),
            SnoozeUnit::Minute => (0, 0, i64::from(amount)),
        };
        match &mut self.kind {
            TaskKind::Todo => Ok(SnoozeOutcome::NoTemporalAnchor),
            TaskKind::Deadline { due } => {
                due.advance(days, hours, minutes)?;
                Ok(SnoozeOutcome::Moved)
            }
            TaskKind::Event { start, end } => {
                let mut moved_start = *start;
                let mut moved_end = *end;
                moved_start.advance(days, hours, minutes)?;
                moved_end.advance(days, hours, minutes)?;
                *start = moved_start;
                *end = moved_end;
                Ok(SnoozeOutcome::Moved)
            }
        }
    }

    /// Whether the task occurs at the given instant.
    ///
    /// Deadlines match on exact equality; events match when
    /// `start <= instant <= end`. Undated tasks never match.
    pub fn occurs_on(&self, instant: &DateTimeValue) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { due } => due.is_equal(instant),
            TaskKind::Event { start, end } => {
                !start.is_after(instant) && !end.is_before(instant)
            }
        }
    }

    /// Serializes this task to its persisted record, regenerated from
    /// canonical fields.
    pub fn to_record(&self) -> String {
        let done = if self.done { '1' } else { '0' };
        match &self.kind {
            TaskKind::Todo => format!("T | {done} | {}", self.description),
            TaskKind::Deadline { due } => format!(
                "D | {done} | {} | {}",
                self.description,
                due.to_persisted_string()
            ),
            TaskKind::Event { start, end } => format!(
                "E | {done} | {} | {} | {}",
                self.description,
                start.to_persisted_string(),
                end.to_persisted_string()
            ),
        }
    }

    /// Reconstructs the exact variant and done-state from a persisted record.
    pub fn from_record(record: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = record.split(" | ").collect();
        if fields.len() < 3 {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        }
        let done = match fields[1] {
            "0" => false,
            "1" => true,
            other => return Err(RecordError::BadDoneFlag(other.to_string())),
        };
        let description = fields[2];
        let mut task = match (fields[0], fields.len()) {
            ("T", 3) => Task::todo(description),
            ("D", 4) => Task::deadline(description, fields[3]),
            ("E", 5) => Task::event(description, fields[3], fields[4]),
            ("T" | "D" | "E", len) => return Err(RecordError::FieldCount { found: len }),
            (tag, _) => return Err(RecordError::UnknownTag(tag.to_string())),
        }
        .map_err(|err| RecordError::InvalidFields(err.to_string()))?;
        if done {
            task.mark();
        }
        Ok(task)
    }

    fn type_tag(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let done_tag = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{done_tag}] {}", self.type_tag(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due } => write!(f, " (by: {due})"),
            TaskKind::Event { start, end } => write!(f, " (from: {start} to: {end})"),
        }
    }
}

fn kind_name(kind: &TaskKind) -> &'static str {
    match kind {
        TaskKind::Todo => "todo",
        TaskKind::Deadline { .. } => "deadline",
        TaskKind::Event { .. } => "event",
    }
}

/// Failure to reconstruct a task from a persisted record.
///
/// Surfaces during rehydration only; the loader treats any of these as a
/// corrupt store and falls back to an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    FieldCount { found: usize },
    UnknownTag(String),
    BadDoneFlag(String),
    InvalidFields(String),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount { found } => {
                write!(f, "record has an unexpected field count: {found}")
            }
            Self::UnknownTag(tag) => write!(f, "unknown record tag `{tag}`"),
            Self::BadDoneFlag(value) => write!(f, "invalid done flag `{value}`"),
            Self::InvalidFields(message) => write!(f, "invalid record fields: {message}"),
        }
    }
}

impl Error for RecordError {}
