//! HTTP route handlers
//!
//! - `bookings` - booking lifecycle, listings and the live event stream
//! - `earnings` - owner earnings summary

pub mod bookings;
pub mod earnings;

use std::sync::Arc;

use rh_core::{BookingRepository, BookingService, EventBus, ItemRepository, UserRepository};
use rh_infra::database::DatabasePool;
use rh_shared::config::EventsConfig;
use uuid::Uuid;

use crate::handlers::ApiError;

/// Application state shared by every handler
pub struct AppState<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub booking_service: Arc<BookingService<B, I, U>>,
    pub events: Arc<EventBus>,
    pub events_config: EventsConfig,
    /// Pool probed by the health check; `None` with in-memory storage
    pub database: Option<DatabasePool>,
}

impl<B, I, U> AppState<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(
        booking_service: Arc<BookingService<B, I, U>>,
        events: Arc<EventBus>,
        events_config: EventsConfig,
    ) -> Self {
        Self {
            booking_service,
            events,
            events_config,
            database: None,
        }
    }

    pub fn with_database(mut self, pool: DatabasePool) -> Self {
        self.database = Some(pool);
        self
    }
}

/// Parses an id path segment, naming the resource in the error
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {} id", resource)))
}
