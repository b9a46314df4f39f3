//! # RentHub Core
//!
//! Core business logic and domain layer for the RentHub backend.
//! This crate contains domain entities, the booking lifecycle engine,
//! the in-process booking event bus, repository interfaces, and the
//! error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Booking, BookingStatus, Claims, Item, Role, RoleSet, User};
pub use domain::events::{BookingEvent, BookingEventKind};
pub use domain::value_objects::{BookingDetails, BookingPeriod, EarningsSummary};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{BookingRepository, ItemRepository, UserRepository};
pub use services::{BookingRequest, BookingService, EventBus, TokenService, TokenServiceConfig};
