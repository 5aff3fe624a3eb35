//! Calendar date + time-of-day value.
//!
//! # Responsibility
//! - Parse the canonical `d/M/yyyy HHmm` input form into validated fields.
//! - Provide total ordering and additive date/time arithmetic.
//! - Regenerate the persisted form from canonical fields, never from raw input.
//!
//! # Invariants
//! - A constructed value always holds a valid date and a valid time.
//! - Ordering is lexicographic on the `(date, time)` pair: a value is not
//!   after another unless its date is strictly later, or the dates are equal
//!   and its time is strictly later.
//! - Time arithmetic that crosses midnight carries whole days into the date,
//!   one day per crossing.

use crate::error::{DomainError, FormatError};
use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

// Pattern constants are owned by this component; nothing else formats dates.
const INPUT_DATE_PATTERN: &str = "%d/%m/%Y";
const INPUT_TIME_PATTERN: &str = "%H%M";
const PERSISTED_DATE_PATTERN: &str = "%-d/%-m/%Y";
const PERSISTED_TIME_PATTERN: &str = "%H%M";
const DISPLAY_DATE_PATTERN: &str = "%b %d %Y";
const DISPLAY_TIME_PATTERN: &str = "%-I.%M %P";

const SECONDS_PER_DAY: i64 = 86_400;

static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid date token regex"));
static TIME_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("valid time token regex"));

/// A calendar date paired with a time-of-day, totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeValue {
    date: NaiveDate,
    time: NaiveTime,
}

impl DateTimeValue {
    /// Parses the canonical `d/M/yyyy HHmm` form.
    ///
    /// Expects exactly two whitespace-separated tokens, date then time.
    ///
    /// # Errors
    /// - [`FormatError::DateTimeTokenCount`] when the token count is not 2.
    /// - [`FormatError::InvalidDateToken`] / [`FormatError::InvalidTimeToken`]
    ///   when a token fails its pattern or names no real calendar instant.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(FormatError::DateTimeTokenCount {
                found: tokens.len(),
            });
        }
        let (date_token, time_token) = (tokens[0], tokens[1]);
        if !DATE_TOKEN_RE.is_match(date_token) {
            return Err(FormatError::InvalidDateToken(date_token.to_string()));
        }
        if !TIME_TOKEN_RE.is_match(time_token) {
            return Err(FormatError::InvalidTimeToken(time_token.to_string()));
        }
        // Regex guards shape; chrono still rejects impossible instants
        // like 31/2/2024 or 2460.
        let date = NaiveDate::parse_from_str(date_token, INPUT_DATE_PATTERN)
            .map_err(|_| FormatError::InvalidDateToken(date_token.to_string()))?;
        let time = NaiveTime::parse_from_str(time_token, INPUT_TIME_PATTERN)
            .map_err(|_| FormatError::InvalidTimeToken(time_token.to_string()))?;
        Ok(Self { date, time })
    }

    /// Returns the current local date and time, truncated to minutes.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        let time = NaiveTime::from_hms_opt(now.time().hour(), now.time().minute(), 0)
            .unwrap_or(now.time());
        Self {
            date: now.date(),
            time,
        }
    }

    /// Applies a date/time delta.
    ///
    /// Time overflow past midnight carries into the date, one day per
    /// 24 hours of wrap, so minute deltas larger than a day are handled.
    ///
    /// # Errors
    /// [`DomainError::DateOutOfRange`] when the resulting date would fall
    /// outside chrono's representable range. The value is left untouched.
    pub fn advance(&mut self, days: i64, hours: i64, minutes: i64) -> Result<(), DomainError> {
        let delta = hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .and_then(Duration::try_minutes)
            .ok_or(DomainError::DateOutOfRange)?;
        let (time, wrap_seconds) = self.time.overflowing_add_signed(delta);
        let carried_days = wrap_seconds / SECONDS_PER_DAY;
        let date = days
            .checked_add(carried_days)
            .and_then(Duration::try_days)
            .and_then(|d| self.date.checked_add_signed(d))
            .ok_or(DomainError::DateOutOfRange)?;
        self.date = date;
        self.time = time;
        Ok(())
    }

    /// Adds minutes, advancing the date when the addition crosses midnight.
    pub fn push_back_time(&mut self, minutes: i64) -> Result<(), DomainError> {
        self.advance(0, 0, minutes)
    }

    /// Adds days unconditionally.
    pub fn push_back_date(&mut self, days: i64) -> Result<(), DomainError> {
        self.advance(days, 0, 0)
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Canonical persisted form, regenerated from fields: `d/M/yyyy HHmm`.
    ///
    /// Round-trips losslessly through [`DateTimeValue::parse`].
    pub fn to_persisted_string(&self) -> String {
        format!(
            "{} {}",
            self.date.format(PERSISTED_DATE_PATTERN),
            self.time.format(PERSISTED_TIME_PATTERN)
        )
    }
}

impl Display for DateTimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}",
            self.date.format(DISPLAY_DATE_PATTERN),
            self.time.format(DISPLAY_TIME_PATTERN)
        )
    }
}

impl Serialize for DateTimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_persisted_string())
    }
}

impl<'de> Deserialize<'de> for DateTimeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(D::Error::custom)
    }
}
