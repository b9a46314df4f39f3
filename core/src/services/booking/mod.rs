//! Booking lifecycle module
//!
//! Creation, confirmation, rejection and cancellation of bookings, plus
//! the read models built from them.

mod locks;
mod service;

#[cfg(test)]
mod tests;

pub use locks::{ItemLockGuard, ItemLocks};
pub use service::{BookingRequest, BookingService};
