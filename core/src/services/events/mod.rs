//! In-process booking event bus

mod bus;

pub use bus::{
    BookingListener, EventBus, ListenerError, PublishReport, Subscription, SubscriptionHandle,
};
