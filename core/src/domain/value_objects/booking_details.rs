//! Display projections of bookings with their references resolved.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingStatus, Item, User};

/// Public view of a user referenced by a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserSummary {
    /// Summary for a reference whose record is gone
    pub fn id_only(id: Uuid) -> Self {
        Self { id, name: None, email: None }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
        }
    }
}

/// Public view of the booked item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ItemSummary {
    pub fn id_only(id: Uuid) -> Self {
        Self { id, name: None }
    }
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self { id: item.id, name: Some(item.name.clone()) }
    }
}

/// Booking with owner, renter and item expanded for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub owner: UserSummary,
    pub renter: UserSummary,
    pub item: ItemSummary,
    pub total_amount: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingDetails {
    /// Expands `booking` using the given lookups; misses fall back to id-only summaries
    pub fn resolve(
        booking: Booking,
        users: &HashMap<Uuid, User>,
        items: &HashMap<Uuid, Item>,
    ) -> Self {
        let user = |id: Uuid| {
            users
                .get(&id)
                .map(UserSummary::from)
                .unwrap_or_else(|| UserSummary::id_only(id))
        };

        Self {
            id: booking.id,
            booking_id: booking.booking_id,
            owner: user(booking.owner),
            renter: user(booking.renter),
            item: items
                .get(&booking.item)
                .map(ItemSummary::from)
                .unwrap_or_else(|| ItemSummary::id_only(booking.item)),
            total_amount: booking.total_amount,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
