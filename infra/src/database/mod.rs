//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Repository implementations for users, items and bookings
//! - Embedded schema migrations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlBookingRepository, MySqlItemRepository, MySqlUserRepository};
