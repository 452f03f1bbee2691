//! Rental period arithmetic
//!
//! Day counting is the one temporal computation the financial core depends
//! on, and the two counting rules differ on purpose:
//!
//! - `billable_days`: `end - start` in whole days, floored at 1. Used by the
//!   pricing engine.
//! - `inclusive_days`: calendar days from start date through end date,
//!   counting both endpoints. Used by closure reconciliation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// The agreed rental window of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl RentalPeriod {
    /// Creates a new rental period
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the start of the period
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the end of the period
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole days between start and end, floored at 1
    pub fn billable_days(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        days.max(1) as u32
    }

    /// Calendar days from start date through end date, both inclusive
    pub fn inclusive_days(&self) -> u32 {
        let days = (self.end.date_naive() - self.start.date_naive()).num_days() + 1;
        days.max(1) as u32
    }

    /// Returns a copy with the end advanced by the given number of days
    pub fn extended_by_days(&self, days: u32) -> Self {
        Self {
            start: self.start,
            end: self.end + chrono::Duration::days(days as i64),
        }
    }

    /// Whole days the given moment lies past the period end (0 if on time)
    pub fn late_days(&self, at: DateTime<Utc>) -> u32 {
        if at <= self.end {
            return 0;
        }
        (at - self.end).num_days().max(0) as u32
    }

    /// Returns true if the moment falls within the period
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}
