//! User-facing error types for command handling.
//!
//! # Responsibility
//! - Distinguish input that does not match a command's grammar
//!   ([`FormatError`]) from well-formed input that violates a domain rule
//!   ([`DomainError`]).
//! - Render every error as a complete response sentence; the dispatcher
//!   converts errors to response strings verbatim at the boundary.
//!
//! # Invariants
//! - No error is fatal; the command loop continues after any of these.
//! - Error text never echoes un-normalized internal state, only the input
//!   pieces needed to explain the failure.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TasklineResult<T> = Result<T, TasklineError>;

/// Input that does not match the grammar of its command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Date/time text did not split into exactly a date token and a time token.
    DateTimeTokenCount { found: usize },
    /// Date token does not match the `d/M/yyyy` pattern or names no real date.
    InvalidDateToken(String),
    /// Time token does not match the 24-hour `HHmm` pattern.
    InvalidTimeToken(String),
    /// An index-taking command was given no task number at all.
    MissingTaskNumber,
    /// An index-taking command was given more than one argument token.
    TooManyArguments,
    /// `find` was given nothing to search for.
    MissingKeyword,
    /// `snooze` input has the wrong token count or is missing the `/by` literal.
    MalformedSnooze,
    /// Snooze amount is not a positive whole number.
    InvalidSnoozeAmount(String),
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateTimeTokenCount { found } => write!(
                f,
                "Expected a date and a time separated by a space, e.g. `1/10/2024 1700` (got {found} token{}).",
                plural(*found)
            ),
            Self::InvalidDateToken(token) => write!(
                f,
                "`{token}` is not a valid date. Use d/M/yyyy, e.g. `1/10/2024`."
            ),
            Self::InvalidTimeToken(token) => write!(
                f,
                "`{token}` is not a valid time. Use 24-hour HHmm, e.g. `1700`."
            ),
            Self::MissingTaskNumber => {
                write!(f, "Which task are you referring to? Add a task number, e.g. `mark 1`.")
            }
            Self::TooManyArguments => {
                write!(f, "That command takes exactly one task number. Type `help` for reference.")
            }
            Self::MissingKeyword => write!(f, "Tell me what to look for, e.g. `find report`."),
            Self::MalformedSnooze => {
                write!(f, "Use `snooze <n>` or `snooze <n> /by <amount> <unit>`.")
            }
            Self::InvalidSnoozeAmount(token) => {
                write!(f, "`{token}` is not a positive whole number of units.")
            }
        }
    }
}

impl Error for FormatError {}

/// Well-formed input that violates a domain rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Task description is empty after trimming.
    EmptyDescription { task_type: &'static str },
    /// `deadline` payload has no ` /by ` section.
    MissingDeadline,
    /// `event` payload does not carry both a `/from` and a `/to` section.
    MissingEventTimes,
    /// An event's `from` or `to` value is blank.
    BlankEventBound { bound: &'static str },
    /// First word of an add command is not a recognized task type.
    UnknownTaskType(String),
    /// Description contains a character reserved by the persisted record
    /// layout.
    ReservedCharacter(char),
    /// The task list is empty, so there is nothing to show or act on.
    EmptyList,
    /// A date/time delta would move the date past the supported range.
    DateOutOfRange,
    /// Requested task number is outside the live list, sized for messaging.
    IndexOutOfRange { size: usize },
    /// Snooze unit is not one of day/hour/minute.
    UnknownUnit(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription { task_type } => {
                write!(f, "Your {task_type} needs a description.")
            }
            Self::MissingDeadline => write!(
                f,
                "When is this due? Add ` /by <date> <time>`, e.g. `/by 1/10/2024 1700`."
            ),
            Self::MissingEventTimes => write!(
                f,
                "An event needs both `/from <date> <time>` and `/to <date> <time>`."
            ),
            Self::BlankEventBound { bound } => {
                write!(f, "The {bound} time of an event cannot be left blank.")
            }
            Self::UnknownTaskType(word) => {
                write!(f, "Unknown task type `{word}`. Use todo, deadline, or event.")
            }
            Self::ReservedCharacter(character) => write!(
                f,
                "Descriptions can't contain `{character}`; it's reserved for the save file."
            ),
            Self::EmptyList => write!(f, "You don't have any tasks yet."),
            Self::DateOutOfRange => write!(
                f,
                "That moves the date further ahead than I can track. Try a smaller amount."
            ),
            Self::IndexOutOfRange { size } => write!(
                f,
                "You only have {size} task{}! Pick a number from 1 to {size}.",
                plural(*size)
            ),
            Self::UnknownUnit(unit) => {
                write!(f, "Unknown unit `{unit}`. Use day, hour, or minute.")
            }
        }
    }
}

impl Error for DomainError {}

/// Union of the two user-facing error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TasklineError {
    Format(FormatError),
    Domain(DomainError),
}

impl Display for TasklineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(err) => write!(f, "{err}"),
            Self::Domain(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TasklineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Domain(err) => Some(err),
        }
    }
}

impl From<FormatError> for TasklineError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<DomainError> for TasklineError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
