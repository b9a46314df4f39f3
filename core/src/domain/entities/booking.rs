//! Booking entity: a renter's time-bounded claim on an item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::BookingPeriod;
use crate::errors::DomainResult;

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Schema default; the engine never produces it
    #[default]
    Pending,
    /// Holds the item for its dates
    Confirmed,
    /// Rejected by the owner or cancelled by the renter
    Cancelled,
    /// Rental finished
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// No further transitions leave this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Whether a booking in this status keeps its dates off the calendar
    pub fn holds_dates(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("Invalid booking status: {}", other)),
        }
    }
}

/// Booking record as stored and as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Storage primary key
    pub id: Uuid,

    /// Client-facing identifier, time-ordered (UUID v7)
    pub booking_id: Uuid,

    /// Owner of the booked item
    pub owner: Uuid,

    /// User holding the booking
    pub renter: Uuid,

    /// Booked item
    pub item: Uuid,

    /// Price for the whole range, in whole currency units
    pub total_amount: i64,

    /// First rental day (inclusive)
    pub start_date: NaiveDate,

    /// Last rental day (inclusive)
    pub end_date: NaiveDate,

    pub status: BookingStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a confirmed booking priced at `unit_price` per rental day
    ///
    /// Creation auto-confirms: there is no pending approval step.
    pub fn new_confirmed(
        owner: Uuid,
        renter: Uuid,
        item: Uuid,
        period: BookingPeriod,
        unit_price: i64,
    ) -> DomainResult<Self> {
        let total_amount = period.total_amount(unit_price)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            booking_id: Uuid::now_v7(),
            owner,
            renter,
            item,
            total_amount,
            start_date: period.start(),
            end_date: period.end(),
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        })
    }

    /// The booked date range
    pub fn period(&self) -> BookingPeriod {
        BookingPeriod::from_stored(self.start_date, self.end_date)
    }

    /// Whether this booking's inclusive range intersects `period`
    pub fn overlaps(&self, period: &BookingPeriod) -> bool {
        self.period().overlaps(period)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    pub fn is_rented_by(&self, user_id: Uuid) -> bool {
        self.renter == user_id
    }

    /// Whether `user_id` is either party of the booking
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.is_owned_by(user_id) || self.is_rented_by(user_id)
    }

    pub fn confirm(&mut self) {
        self.set_status(BookingStatus::Confirmed);
    }

    pub fn cancel(&mut self) {
        self.set_status(BookingStatus::Cancelled);
    }

    fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
