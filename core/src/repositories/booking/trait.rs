//! Booking repository trait.
//!
//! Implementations persist bookings and answer the date-range queries the
//! lifecycle engine relies on. Listing queries return bookings newest first.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingStatus};
use crate::domain::value_objects::BookingPeriod;
use crate::errors::DomainError;

/// Repository trait for Booking persistence operations
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking
    ///
    /// # Returns
    /// * `Ok(Booking)` - The stored booking
    /// * `Err(DomainError)` - Storage failure or duplicate identifier
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Find a booking by its storage id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// Overwrite an existing booking
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No booking with that id
    async fn update(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// All bookings of an item, any status
    async fn find_by_item(&self, item_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    /// Bookings where the user is owner or renter
    async fn find_by_participant(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    /// Bookings where the user is the owner
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    /// Bookings of `item_id` in `status` whose inclusive range overlaps `period`
    ///
    /// # Arguments
    /// * `exclude` - Booking id left out of the result, used when re-checking
    ///   a booking against its siblings
    async fn find_overlapping(
        &self,
        item_id: Uuid,
        period: &BookingPeriod,
        status: BookingStatus,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Booking>, DomainError>;
}
