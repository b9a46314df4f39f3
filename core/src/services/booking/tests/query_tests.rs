//! Read-model tests for the booking service

use chrono::Duration;
use uuid::Uuid;

use super::fixtures::{date, Harness};
use crate::domain::entities::BookingStatus;
use crate::repositories::BookingRepository;
use crate::services::booking::BookingRequest;

#[tokio::test]
async fn test_bookings_for_item_are_enriched_and_newest_first() {
    let h = Harness::new().await;
    let mut older = h.seed("2024-01-01", "2024-01-02", BookingStatus::Cancelled).await;
    older.created_at = older.created_at - Duration::minutes(10);
    h.bookings.update(older.clone()).await.unwrap();
    let newer = h.seed("2024-02-01", "2024-02-02", BookingStatus::Confirmed).await;

    let listed = h.service.bookings_for_item(h.item.id).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
    assert_eq!(listed[0].owner.name.as_deref(), Some("Olivia Owner"));
    assert_eq!(listed[0].renter.email.as_deref(), Some("ravi@example.com"));
    assert_eq!(listed[0].item.name.as_deref(), Some("Mountain bike"));
}

#[tokio::test]
async fn test_bookings_for_unknown_item_is_empty() {
    let h = Harness::new().await;
    assert!(h.service.bookings_for_item(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bookings_for_user_covers_both_roles() {
    let h = Harness::new().await;
    h.seed("2024-01-01", "2024-01-02", BookingStatus::Confirmed).await;

    let as_owner = h.service.bookings_for_user(h.owner.id).await.unwrap();
    let as_renter = h.service.bookings_for_user(h.renter.id).await.unwrap();
    let stranger = h.service.bookings_for_user(Uuid::new_v4()).await.unwrap();

    assert_eq!(as_owner.len(), 1);
    assert_eq!(as_renter.len(), 1);
    assert!(stranger.is_empty());
}

#[tokio::test]
async fn test_missing_references_fall_back_to_ids() {
    let h = Harness::new().await;
    let ghost = Uuid::new_v4();
    let booking = h
        .service
        .create_booking(ghost, BookingRequest::new(h.item.id, date("2024-06-01"), date("2024-06-01")))
        .await
        .unwrap();

    let listed = h.service.bookings_for_item(h.item.id).await.unwrap();

    assert_eq!(listed[0].id, booking.id);
    assert_eq!(listed[0].renter.id, ghost);
    assert!(listed[0].renter.name.is_none());
}

#[tokio::test]
async fn test_blocked_dates_cover_pending_and_confirmed() {
    let h = Harness::new().await;
    h.seed("2024-03-01", "2024-03-03", BookingStatus::Confirmed).await;
    h.seed("2024-03-03", "2024-03-04", BookingStatus::Pending).await;
    h.seed("2024-03-10", "2024-03-12", BookingStatus::Cancelled).await;
    h.seed("2024-03-20", "2024-03-20", BookingStatus::Completed).await;

    let dates = h.service.blocked_dates(h.item.id).await.unwrap();

    let expected: Vec<_> = ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04"]
        .into_iter()
        .map(date)
        .collect();
    assert_eq!(dates, expected);
}

#[tokio::test]
async fn test_earnings_for_owner() {
    let h = Harness::new().await;
    h.seed("2024-03-01", "2024-03-02", BookingStatus::Confirmed).await; // 200
    h.seed("2024-03-05", "2024-03-05", BookingStatus::Completed).await; // 100
    h.seed("2024-03-08", "2024-03-10", BookingStatus::Pending).await; // 300
    h.seed("2024-03-12", "2024-03-12", BookingStatus::Cancelled).await;

    let summary = h.service.earnings_for_user(h.owner.id).await.unwrap();

    assert_eq!(summary.total, 300);
    assert_eq!(summary.pending, 300);
    assert_eq!(summary.transactions.len(), 3);

    let renter_view = h.service.earnings_for_user(h.renter.id).await.unwrap();
    assert_eq!(renter_view.total, 0);
    assert!(renter_view.transactions.is_empty());
}
