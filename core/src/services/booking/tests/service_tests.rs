//! Lifecycle tests for the booking service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use super::fixtures::{date, FailingBookingRepository, Harness};
use crate::domain::entities::{BookingStatus, Item, User};
use crate::domain::events::{BookingEvent, BookingEventKind};
use crate::errors::DomainError;
use crate::repositories::{
    BookingRepository, InMemoryItemRepository, InMemoryUserRepository, ItemRepository, UserRepository,
};
use crate::services::booking::{BookingRequest, BookingService};
use crate::services::events::{EventBus, ListenerError};

fn request(h: &Harness, start: &str, end: &str) -> BookingRequest {
    BookingRequest::new(h.item.id, date(start), date(end))
}

#[tokio::test]
async fn test_create_booking_confirms_and_prices() {
    let h = Harness::new().await;
    let (events, _guard) = h.record();

    let booking = h
        .service
        .create_booking(h.renter.id, request(&h, "2024-03-01", "2024-03-05"))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.total_amount, 500);
    assert_eq!(booking.owner, h.owner.id);
    assert_eq!(booking.renter, h.renter.id);
    assert_eq!(h.bookings.find_by_id(booking.id).await.unwrap(), Some(booking.clone()));

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, BookingEventKind::Created);
    assert_eq!(events[0].owner_id, h.owner.id);
    assert_eq!(events[0].booking, booking);
}

#[tokio::test]
async fn test_single_day_booking_costs_one_day() {
    let h = Harness::new().await;
    let booking = h
        .service
        .create_booking(h.renter.id, request(&h, "2024-03-10", "2024-03-10"))
        .await
        .unwrap();
    assert_eq!(booking.total_amount, 100);
}

#[tokio::test]
async fn test_booking_ids_are_unique() {
    let h = Harness::new().await;
    let a = h.service.create_booking(h.renter.id, request(&h, "2024-01-01", "2024-01-02")).await.unwrap();
    let b = h.service.create_booking(h.renter.id, request(&h, "2024-02-01", "2024-02-02")).await.unwrap();

    assert_ne!(a.booking_id, b.booking_id);
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_missing_fields() {
    let h = Harness::new().await;
    let mut incomplete = request(&h, "2024-03-01", "2024-03-02");
    incomplete.end_date = None;

    let result = h.service.create_booking(h.renter.id, incomplete).await;
    match result {
        Err(DomainError::InvalidRequest { message }) => assert_eq!(message, "Missing fields"),
        other => panic!("expected InvalidRequest, got {:?}", other),
    }

    let result = h.service.create_booking(h.renter.id, BookingRequest::default()).await;
    assert!(matches!(result, Err(DomainError::InvalidRequest { .. })));
}

#[tokio::test]
async fn test_reversed_range_is_rejected() {
    let h = Harness::new().await;
    let result = h.service.create_booking(h.renter.id, request(&h, "2024-03-05", "2024-03-01")).await;
    assert!(matches!(result, Err(DomainError::InvalidRequest { .. })));
    assert_eq!(h.bookings.len().await, 0);
}

#[tokio::test]
async fn test_unknown_item() {
    let h = Harness::new().await;
    let req = BookingRequest::new(Uuid::new_v4(), date("2024-03-01"), date("2024-03-02"));

    let result = h.service.create_booking(h.renter.id, req).await;
    assert!(matches!(result, Err(DomainError::NotFound { ref resource }) if resource == "Item"));
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let h = Harness::new().await;
    let (events, _guard) = h.record();

    let result = h.service.create_booking(h.owner.id, request(&h, "2024-03-01", "2024-03-02")).await;

    match result {
        Err(DomainError::Forbidden { message }) => assert_eq!(message, "Owners cannot book their own items"),
        other => panic!("expected Forbidden, got {:?}", other),
    }
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_overlapping_request_conflicts_inclusively() {
    let h = Harness::new().await;
    let other = h.another_renter("Sam").await;
    h.service.create_booking(h.renter.id, request(&h, "2024-03-01", "2024-03-05")).await.unwrap();

    // shares only the last day
    let result = h.service.create_booking(other.id, request(&h, "2024-03-05", "2024-03-07")).await;
    match result {
        Err(DomainError::Conflict { message }) => assert_eq!(message, "Item already booked for selected dates"),
        other => panic!("expected Conflict, got {:?}", other),
    }

    // starts the day after
    let ok = h.service.create_booking(other.id, request(&h, "2024-03-06", "2024-03-07")).await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_cancelled_bookings_do_not_block() {
    let h = Harness::new().await;
    h.seed("2024-03-01", "2024-03-05", BookingStatus::Cancelled).await;

    let result = h.service.create_booking(h.renter.id, request(&h, "2024-03-02", "2024-03-03")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_same_dates_on_other_items_are_independent() {
    let h = Harness::new().await;
    let second = h.items.create(Item::new(h.owner.id, "Tandem", 50)).await.unwrap();
    h.service.create_booking(h.renter.id, request(&h, "2024-03-01", "2024-03-05")).await.unwrap();

    let result = h
        .service
        .create_booking(h.renter.id, BookingRequest::new(second.id, date("2024-03-01"), date("2024-03-05")))
        .await;
    assert_eq!(result.unwrap().total_amount, 250);
}

#[tokio::test]
async fn test_accept_by_owner() {
    let h = Harness::new().await;
    let pending = h.seed("2024-04-01", "2024-04-03", BookingStatus::Pending).await;
    let (events, _guard) = h.record();

    let accepted = h.service.accept_booking(h.owner.id, pending.id).await.unwrap();

    assert_eq!(accepted.status, BookingStatus::Confirmed);
    assert!(accepted.updated_at >= pending.updated_at);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, BookingEventKind::Updated);
}

#[tokio::test]
async fn test_accept_is_idempotent() {
    let h = Harness::new().await;
    let booking = h.service.create_booking(h.renter.id, request(&h, "2024-04-01", "2024-04-03")).await.unwrap();

    let first = h.service.accept_booking(h.owner.id, booking.id).await.unwrap();
    let second = h.service.accept_booking(h.owner.id, booking.id).await.unwrap();

    assert_eq!(first.status, BookingStatus::Confirmed);
    assert_eq!(second.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_accept_checks_ownership_before_conflicts() {
    let h = Harness::new().await;
    let booking = h.seed("2024-04-01", "2024-04-03", BookingStatus::Pending).await;

    let by_renter = h.service.accept_booking(h.renter.id, booking.id).await;
    assert!(matches!(by_renter, Err(DomainError::Forbidden { .. })));

    let missing = h.service.accept_booking(h.owner.id, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { ref resource }) if resource == "Booking"));
}

#[tokio::test]
async fn test_accept_conflicts_with_other_confirmed_booking() {
    let h = Harness::new().await;
    h.seed("2024-04-01", "2024-04-05", BookingStatus::Confirmed).await;
    let pending = h.seed("2024-04-05", "2024-04-08", BookingStatus::Pending).await;

    let result = h.service.accept_booking(h.owner.id, pending.id).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    let stored = h.bookings.find_by_id(pending.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_accept_cancelled_booking_is_refused() {
    let h = Harness::new().await;
    let cancelled = h.seed("2024-04-01", "2024-04-02", BookingStatus::Cancelled).await;
    let completed = h.seed("2024-05-01", "2024-05-02", BookingStatus::Completed).await;

    for id in [cancelled.id, completed.id] {
        let result = h.service.accept_booking(h.owner.id, id).await;
        match result {
            Err(DomainError::Conflict { message }) => assert_eq!(message, "Booking is no longer active"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_reject_by_owner() {
    let h = Harness::new().await;
    let booking = h.service.create_booking(h.renter.id, request(&h, "2024-04-01", "2024-04-03")).await.unwrap();
    let (events, _guard) = h.record();

    let rejected = h.service.reject_booking(h.owner.id, booking.id).await.unwrap();

    assert_eq!(rejected.status, BookingStatus::Cancelled);
    assert_eq!(events.lock().unwrap()[0].booking.status, BookingStatus::Cancelled);

    // the dates are free again
    let other = h.another_renter("Kim").await;
    assert!(h.service.create_booking(other.id, request(&h, "2024-04-02", "2024-04-02")).await.is_ok());
}

#[tokio::test]
async fn test_reject_by_renter_is_forbidden() {
    let h = Harness::new().await;
    let booking = h.seed("2024-04-01", "2024-04-03", BookingStatus::Confirmed).await;

    let result = h.service.reject_booking(h.renter.id, booking.id).await;
    match result {
        Err(DomainError::Forbidden { message }) => assert_eq!(message, "Not allowed"),
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_by_renter_and_repeat() {
    let h = Harness::new().await;
    let booking = h.seed("2024-04-01", "2024-04-03", BookingStatus::Confirmed).await;

    let first = h.service.cancel_booking(h.renter.id, booking.id).await.unwrap();
    let again = h.service.cancel_booking(h.renter.id, booking.id).await.unwrap();

    assert_eq!(first.status, BookingStatus::Cancelled);
    assert_eq!(again.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_by_owner_or_stranger_is_forbidden() {
    let h = Harness::new().await;
    let booking = h.seed("2024-04-01", "2024-04-03", BookingStatus::Confirmed).await;

    for actor in [h.owner.id, Uuid::new_v4()] {
        let result = h.service.cancel_booking(actor, booking.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }
}

#[tokio::test]
async fn test_completed_booking_cannot_be_cancelled() {
    let h = Harness::new().await;
    let booking = h.seed("2024-04-01", "2024-04-03", BookingStatus::Completed).await;

    let by_renter = h.service.cancel_booking(h.renter.id, booking.id).await;
    let by_owner = h.service.reject_booking(h.owner.id, booking.id).await;

    assert!(matches!(by_renter, Err(DomainError::Conflict { .. })));
    assert!(matches!(by_owner, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_failed_write_publishes_nothing() {
    let bookings = Arc::new(FailingBookingRepository::default());
    let items = Arc::new(InMemoryItemRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let bus = Arc::new(EventBus::new());

    let owner = users.create(User::new("O", "o@example.com")).await.unwrap();
    let item = items.create(Item::new(owner.id, "Canoe", 10)).await.unwrap();
    let service = BookingService::new(bookings, items, users, Arc::clone(&bus));

    let published = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&published);
    bus.subscribe(BookingEventKind::Created, move |_: &BookingEvent| -> Result<(), ListenerError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let result = service
        .create_booking(Uuid::new_v4(), BookingRequest::new(item.id, date("2024-01-01"), date("2024-01-02")))
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(published.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failing_listener_does_not_fail_create() {
    let h = Harness::new().await;
    h.bus.subscribe(
        BookingEventKind::Created,
        |_: &BookingEvent| -> Result<(), ListenerError> {
            panic!("subscriber bug")
        },
    );

    let result = h.service.create_booking(h.renter.id, request(&h, "2024-03-01", "2024-03-02")).await;
    assert!(result.is_ok());
}
