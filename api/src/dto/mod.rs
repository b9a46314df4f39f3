pub mod booking;

pub use booking::{BlockedDatesResponse, CreateBookingRequest};
