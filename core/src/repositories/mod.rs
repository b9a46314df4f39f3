//! Repository contracts and their in-memory implementations.

pub mod booking;
pub mod item;
pub mod user;

pub use booking::{BookingRepository, InMemoryBookingRepository};
pub use item::{InMemoryItemRepository, ItemRepository};
pub use user::{InMemoryUserRepository, UserRepository};
