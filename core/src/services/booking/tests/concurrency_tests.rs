//! Concurrent access to the booking service

use std::sync::Arc;

use futures::future::join_all;

use std::time::Duration;

use super::fixtures::{date, Harness, SlowOverlapRepository};
use crate::domain::entities::{Booking, BookingStatus};
use crate::domain::value_objects::BookingPeriod;
use crate::errors::DomainError;
use crate::repositories::BookingRepository;
use crate::services::booking::{BookingRequest, BookingService};
use crate::services::events::EventBus;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_creates_confirm_exactly_one() {
    let h = Arc::new(Harness::new().await);
    let mut renters = Vec::new();
    for i in 0..20 {
        renters.push(h.another_renter(&format!("renter{}", i)).await);
    }

    let attempts = renters.into_iter().enumerate().map(|(i, renter)| {
        let h = Arc::clone(&h);
        // every range contains 2024-07-10
        let start = date("2024-07-01") + chrono::Duration::days((i % 10) as i64);
        tokio::spawn(async move {
            h.service
                .create_booking(renter.id, BookingRequest::new(h.item.id, start, date("2024-07-10")))
                .await
        })
    });

    let results: Vec<_> = join_all(attempts).await.into_iter().map(|r| r.unwrap()).collect();

    let confirmed = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Conflict { .. })))
        .count();
    assert_eq!(confirmed, 1);
    assert_eq!(conflicts, 19);

    let stored = h.bookings.find_by_item(h.item.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, BookingStatus::Confirmed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accepts_of_overlapping_pending_bookings() {
    let h = Arc::new(Harness::new().await);
    let mut pending = Vec::new();
    for day in ["2024-08-01", "2024-08-02", "2024-08-03", "2024-08-04"] {
        pending.push(h.seed(day, "2024-08-05", BookingStatus::Pending).await);
    }

    let accepts = pending.iter().map(|b| {
        let h = Arc::clone(&h);
        let id = b.id;
        tokio::spawn(async move { h.service.accept_booking(h.owner.id, id).await })
    });
    let results: Vec<_> = join_all(accepts).await.into_iter().map(|r| r.unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

    let confirmed = h
        .bookings
        .find_by_item(h.item.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .count();
    assert_eq!(confirmed, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancel_during_accept_is_not_overwritten() {
    let h = Harness::new().await;
    let bookings = Arc::new(SlowOverlapRepository {
        delay: Duration::from_millis(100),
        ..Default::default()
    });
    let service = Arc::new(BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&h.items),
        Arc::clone(&h.users),
        Arc::new(EventBus::new()),
    ));

    let period = BookingPeriod::new(date("2024-10-01"), date("2024-10-03")).unwrap();
    let mut pending = Booking::new_confirmed(h.owner.id, h.renter.id, h.item.id, period, h.item.price).unwrap();
    pending.status = BookingStatus::Pending;
    let pending = bookings.create(pending).await.unwrap();

    let accept = {
        let service = Arc::clone(&service);
        let (owner, id) = (h.owner.id, pending.id);
        tokio::spawn(async move { service.accept_booking(owner, id).await })
    };
    tokio::time::sleep(Duration::from_millis(30)).await;
    let cancelled = service.cancel_booking(h.renter.id, pending.id).await.unwrap();
    let accepted = accept.await.unwrap().unwrap();

    // accept held the lock first, so the cancel lands after it
    assert_eq!(accepted.status, BookingStatus::Confirmed);
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let stored = bookings.find_by_id(pending.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_accept_after_cancel_is_refused() {
    let h = Harness::new().await;
    let bookings = Arc::new(SlowOverlapRepository {
        delay: Duration::from_millis(50),
        ..Default::default()
    });
    let service = BookingService::new(
        Arc::clone(&bookings),
        Arc::clone(&h.items),
        Arc::clone(&h.users),
        Arc::new(EventBus::new()),
    );

    let period = BookingPeriod::new(date("2024-11-01"), date("2024-11-02")).unwrap();
    let mut pending = Booking::new_confirmed(h.owner.id, h.renter.id, h.item.id, period, h.item.price).unwrap();
    pending.status = BookingStatus::Pending;
    let pending = bookings.create(pending).await.unwrap();

    service.cancel_booking(h.renter.id, pending.id).await.unwrap();
    let err = service.accept_booking(h.owner.id, pending.id).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict { .. }));
    assert_eq!(
        bookings.find_by_id(pending.id).await.unwrap().unwrap().status,
        BookingStatus::Cancelled
    );
}
