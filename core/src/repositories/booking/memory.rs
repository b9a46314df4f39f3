//! In-memory implementation of BookingRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingStatus};
use crate::domain::value_objects::BookingPeriod;
use crate::errors::DomainError;

use super::r#trait::BookingRepository;

/// Booking repository backed by a shared map
#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored bookings
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let bookings = self.bookings.read().await;
        let mut selected: Vec<Booking> = bookings.values().filter(|b| predicate(b)).cloned().collect();
        newest_first(&mut selected);
        selected
    }
}

fn newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.booking_id.cmp(&a.booking_id))
    });
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        if bookings.contains_key(&booking.id)
            || bookings.values().any(|b| b.booking_id == booking.booking_id)
        {
            return Err(DomainError::internal(format!(
                "duplicate booking identifier {}",
                booking.booking_id
            )));
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking"));
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_item(&self, item_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        Ok(self.select(|b| b.item == item_id).await)
    }

    async fn find_by_participant(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        Ok(self.select(|b| b.involves(user_id)).await)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        Ok(self.select(|b| b.is_owned_by(owner_id)).await)
    }

    async fn find_overlapping(
        &self,
        item_id: Uuid,
        period: &BookingPeriod,
        status: BookingStatus,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Booking>, DomainError> {
        Ok(self
            .select(|b| {
                b.item == item_id
                    && b.status == status
                    && Some(b.id) != exclude
                    && b.overlaps(period)
            })
            .await)
    }
}
