//! Value objects representing immutable domain concepts.

pub mod booking_details;
pub mod booking_period;
pub mod earnings;

// Re-export commonly used types
pub use booking_details::{BookingDetails, ItemSummary, UserSummary};
pub use booking_period::{BookingPeriod, MAX_RENTAL_DAYS};
pub use earnings::EarningsSummary;
