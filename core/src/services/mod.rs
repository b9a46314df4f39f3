//! Business services containing domain logic and use cases.

pub mod booking;
pub mod events;
pub mod token;

// Re-export commonly used types
pub use booking::{BookingRequest, BookingService, ItemLocks};
pub use events::{BookingListener, EventBus, ListenerError, PublishReport, Subscription, SubscriptionHandle};
pub use token::{TokenService, TokenServiceConfig};
