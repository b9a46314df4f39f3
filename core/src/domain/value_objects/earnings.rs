//! Owner earnings summary.

use serde::Serialize;

use super::booking_details::BookingDetails;
use crate::domain::entities::BookingStatus;

/// Earnings of one owner across their bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsSummary {
    /// Sum over confirmed and completed bookings
    pub total: i64,
    /// Sum over pending bookings
    pub pending: i64,
    /// Non-cancelled bookings, in the order given
    pub transactions: Vec<BookingDetails>,
}

impl EarningsSummary {
    /// Tallies the owner's bookings; cancelled ones are dropped
    pub fn tally(bookings: Vec<BookingDetails>) -> Self {
        let mut total = 0i64;
        let mut pending = 0i64;

        let transactions: Vec<BookingDetails> = bookings
            .into_iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .inspect(|b| match b.status {
                BookingStatus::Pending => pending = pending.saturating_add(b.total_amount),
                _ => total = total.saturating_add(b.total_amount),
            })
            .collect();

        Self { total, pending, transactions }
    }
}
