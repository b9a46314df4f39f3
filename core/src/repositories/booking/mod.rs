//! Booking repository module.

mod r#trait;
pub use r#trait::BookingRepository;

mod memory;
pub use memory::InMemoryBookingRepository;

#[cfg(test)]
mod tests;
