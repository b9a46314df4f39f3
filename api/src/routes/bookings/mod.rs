//! Booking routes mounted under `/api/bookings`

pub mod create;
pub mod queries;
pub mod stream;
pub mod transitions;

pub use create::create_booking;
pub use queries::{blocked_dates, bookings_for_item, bookings_for_user};
pub use stream::stream_bookings;
pub use transitions::{accept_booking, cancel_booking, reject_booking};
