//! Unit tests for the in-memory booking repository

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingStatus};
use crate::domain::value_objects::BookingPeriod;
use crate::errors::DomainError;
use crate::repositories::booking::{BookingRepository, InMemoryBookingRepository};

fn period(start: &str, end: &str) -> BookingPeriod {
    let start: NaiveDate = start.parse().unwrap();
    let end: NaiveDate = end.parse().unwrap();
    BookingPeriod::new(start, end).unwrap()
}

fn booking(owner: Uuid, renter: Uuid, item: Uuid, start: &str, end: &str) -> Booking {
    Booking::new_confirmed(owner, renter, item, period(start, end), 10).unwrap()
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryBookingRepository::new();
    let b = booking(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "2024-03-01", "2024-03-02");

    let created = repo.create(b.clone()).await.unwrap();
    assert_eq!(created, b);

    let found = repo.find_by_id(b.id).await.unwrap();
    assert_eq!(found, Some(b));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let repo = InMemoryBookingRepository::new();
    let b = booking(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "2024-03-01", "2024-03-02");

    repo.create(b.clone()).await.unwrap();
    let result = repo.create(b).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_update_missing_booking() {
    let repo = InMemoryBookingRepository::new();
    let b = booking(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "2024-03-01", "2024-03-02");

    let result = repo.update(b).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let repo = InMemoryBookingRepository::new();
    let owner = Uuid::new_v4();
    let item = Uuid::new_v4();

    let mut older = booking(owner, Uuid::new_v4(), item, "2024-03-01", "2024-03-02");
    older.created_at = older.created_at - Duration::hours(1);
    let newer = booking(owner, Uuid::new_v4(), item, "2024-04-01", "2024-04-02");

    repo.create(older.clone()).await.unwrap();
    repo.create(newer.clone()).await.unwrap();

    let listed = repo.find_by_item(item).await.unwrap();
    assert_eq!(listed.iter().map(|b| b.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
}

#[tokio::test]
async fn test_participant_and_owner_queries() {
    let repo = InMemoryBookingRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    // alice owns one, rents another
    repo.create(booking(alice, bob, Uuid::new_v4(), "2024-03-01", "2024-03-02")).await.unwrap();
    repo.create(booking(bob, alice, Uuid::new_v4(), "2024-03-01", "2024-03-02")).await.unwrap();
    repo.create(booking(bob, Uuid::new_v4(), Uuid::new_v4(), "2024-03-01", "2024-03-02")).await.unwrap();

    assert_eq!(repo.find_by_participant(alice).await.unwrap().len(), 2);
    assert_eq!(repo.find_by_owner(alice).await.unwrap().len(), 1);
    assert_eq!(repo.find_by_owner(bob).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_find_overlapping_filters_status_item_and_exclusion() {
    let repo = InMemoryBookingRepository::new();
    let owner = Uuid::new_v4();
    let item = Uuid::new_v4();

    let confirmed = booking(owner, Uuid::new_v4(), item, "2024-03-01", "2024-03-05");
    let mut cancelled = booking(owner, Uuid::new_v4(), item, "2024-03-03", "2024-03-04");
    cancelled.cancel();
    let other_item = booking(owner, Uuid::new_v4(), Uuid::new_v4(), "2024-03-01", "2024-03-05");

    for b in [&confirmed, &cancelled, &other_item] {
        repo.create(b.clone()).await.unwrap();
    }

    let query = period("2024-03-05", "2024-03-06");
    let hits = repo
        .find_overlapping(item, &query, BookingStatus::Confirmed, None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, confirmed.id);

    let excluded = repo
        .find_overlapping(item, &query, BookingStatus::Confirmed, Some(confirmed.id))
        .await
        .unwrap();
    assert!(excluded.is_empty());

    let adjacent = repo
        .find_overlapping(item, &period("2024-03-06", "2024-03-07"), BookingStatus::Confirmed, None)
        .await
        .unwrap();
    assert!(adjacent.is_empty());
}
