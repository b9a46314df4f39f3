//! Inclusive calendar date range of a booking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Longest range a single booking may hold, in days
pub const MAX_RENTAL_DAYS: i64 = 366;

/// Inclusive `[start, end]` range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl BookingPeriod {
    /// Validated constructor for requested ranges
    ///
    /// Rejects reversed ranges and ranges longer than [`MAX_RENTAL_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::invalid_request(
                "Start date must not be after end date",
            ));
        }
        if (end - start).num_days() >= MAX_RENTAL_DAYS {
            return Err(DomainError::invalid_request(format!(
                "Booking cannot exceed {} days",
                MAX_RENTAL_DAYS
            )));
        }
        Ok(Self { start, end })
    }

    /// Rebuilds a range read back from storage without re-validating it
    pub(crate) fn from_stored(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive overlap: ranges sharing a single day collide
    pub fn overlaps(&self, other: &BookingPeriod) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Number of billable days, never less than one
    pub fn rental_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// Price of the range at `unit_price` per day
    pub fn total_amount(&self, unit_price: i64) -> DomainResult<i64> {
        unit_price
            .checked_mul(self.rental_days())
            .ok_or_else(|| DomainError::invalid_request("Booking total is out of range"))
    }

    /// Every calendar day in the range, in order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
