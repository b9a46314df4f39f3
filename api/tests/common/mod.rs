//! Shared setup for HTTP tests: in-memory stores, seeded users and item, real JWTs

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    test, web, App, Error,
};
use rh_api::{create_app, AppState};
use rh_core::repositories::{InMemoryBookingRepository, InMemoryItemRepository, InMemoryUserRepository};
use rh_core::{
    Booking, BookingPeriod, BookingRepository, BookingService, BookingStatus, EventBus, Item,
    ItemRepository, Role, TokenService, TokenServiceConfig, User, UserRepository,
};
use rh_shared::config::EventsConfig;
use serde_json::{json, Value};

pub type MemoryState = AppState<InMemoryBookingRepository, InMemoryItemRepository, InMemoryUserRepository>;

pub struct TestContext {
    pub state: web::Data<MemoryState>,
    pub tokens: web::Data<TokenService>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<EventBus>,
    pub owner: User,
    pub renter: User,
    pub item: Item,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_events_config(EventsConfig::default()).await
    }

    pub async fn with_events_config(events_config: EventsConfig) -> Self {
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let items = Arc::new(InMemoryItemRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let events = Arc::new(EventBus::new());

        let mut owner = User::new("Olivia Owner", "olivia@example.com");
        owner.grant(Role::Owner);
        let owner = users.create(owner).await.unwrap();
        let renter = users.create(User::new("Ravi Renter", "ravi@example.com")).await.unwrap();
        let item = items.create(Item::new(owner.id, "Camping tent", 100)).await.unwrap();

        let service = Arc::new(BookingService::new(
            Arc::clone(&bookings),
            items,
            Arc::clone(&users),
            Arc::clone(&events),
        ));
        let state = web::Data::new(AppState::new(service, Arc::clone(&events), events_config));
        let tokens = web::Data::new(TokenService::new(TokenServiceConfig::default()));

        Self { state, tokens, bookings, users, events, owner, renter, item }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<ServiceRequest, Config = (), Response = ServiceResponse, Error = Error, InitError = ()>,
    > {
        create_app(self.state.clone(), self.tokens.clone(), 0)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.tokens.issue_access_token(user.id, &user.roles).unwrap()
    }

    pub fn bearer(&self, user: &User) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, format!("Bearer {}", self.token_for(user)))
    }

    pub async fn another_user(&self, name: &str) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        self.users.create(User::new(name, email)).await.unwrap()
    }

    /// Stores a booking directly, bypassing the engine
    pub async fn seed(&self, start: &str, end: &str, status: BookingStatus) -> Booking {
        let period = BookingPeriod::new(start.parse().unwrap(), end.parse().unwrap()).unwrap();
        let mut booking =
            Booking::new_confirmed(self.owner.id, self.renter.id, self.item.id, period, self.item.price).unwrap();
        booking.status = status;
        self.bookings.create(booking).await.unwrap()
    }

    pub fn booking_body(&self, start: &str, end: &str) -> Value {
        json!({
            "itemId": self.item.id.to_string(),
            "startDate": start,
            "endDate": end,
        })
    }
}

/// Builds an authenticated request
pub fn authed(method: actix_web::http::Method, uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
}

