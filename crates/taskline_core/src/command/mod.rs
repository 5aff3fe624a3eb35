//! Command classification layer.
//!
//! # Responsibility
//! - Turn a raw input line into a command kind plus the unmodified text.
//!
//! # Invariants
//! - Classification never fails: unrecognized first tokens fall back to the
//!   implicit add command so descriptions are never rejected for their
//!   first word.

pub mod parser;
