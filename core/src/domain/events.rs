//! Booking lifecycle events published on the in-process bus.

use serde::Serialize;
use uuid::Uuid;

use super::entities::Booking;

/// Kind of lifecycle event; doubles as the SSE event name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingEventKind {
    Created,
    Updated,
}

impl BookingEventKind {
    pub const ALL: [BookingEventKind; 2] = [BookingEventKind::Created, BookingEventKind::Updated];

    pub fn name(&self) -> &'static str {
        match self {
            BookingEventKind::Created => "bookingCreated",
            BookingEventKind::Updated => "bookingUpdated",
        }
    }
}

impl std::fmt::Display for BookingEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Event payload: the booking plus the user it is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    #[serde(skip)]
    pub kind: BookingEventKind,
    pub owner_id: Uuid,
    pub booking: Booking,
}

impl BookingEvent {
    pub fn created(booking: Booking) -> Self {
        Self::new(BookingEventKind::Created, booking)
    }

    pub fn updated(booking: Booking) -> Self {
        Self::new(BookingEventKind::Updated, booking)
    }

    fn new(kind: BookingEventKind, booking: Booking) -> Self {
        Self { kind, owner_id: booking.owner, booking }
    }

    pub fn is_addressed_to(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
