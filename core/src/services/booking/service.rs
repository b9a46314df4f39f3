//! Booking lifecycle engine

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::{Booking, BookingStatus, Item};
use crate::domain::events::BookingEvent;
use crate::domain::value_objects::{BookingDetails, BookingPeriod, EarningsSummary};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ItemRepository, UserRepository};
use crate::services::events::EventBus;

use super::locks::ItemLocks;

const MISSING_FIELDS: &str = "Missing fields";
const SELF_BOOKING: &str = "Owners cannot book their own items";
const DATES_TAKEN: &str = "Item already booked for selected dates";
const ACCEPT_CONFLICT: &str = "Cannot confirm booking, item already confirmed for overlapping dates";
const NOT_ACTIVE: &str = "Booking is no longer active";
const COMPLETED: &str = "Completed bookings cannot be changed";
const NOT_ALLOWED: &str = "Not allowed";

/// A renter's booking request; absent fields are reported as missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRequest {
    pub item_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BookingRequest {
    pub fn new(item_id: Uuid, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            item_id: Some(item_id),
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

/// Creates bookings and drives them through their lifecycle
///
/// Every mutation is persisted before its event is published, and the
/// publish step cannot fail the call.
pub struct BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    /// Booking storage
    bookings: Arc<B>,
    /// Item lookups
    items: Arc<I>,
    /// User lookups for display enrichment
    users: Arc<U>,
    /// Lifecycle event fan-out
    events: Arc<EventBus>,
    /// Serializes check-then-write per item
    locks: ItemLocks,
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(bookings: Arc<B>, items: Arc<I>, users: Arc<U>, events: Arc<EventBus>) -> Self {
        Self {
            bookings,
            items,
            users,
            events,
            locks: ItemLocks::new(),
        }
    }

    /// Books an item for `renter_id`
    ///
    /// The booking is confirmed immediately when no confirmed booking of the
    /// item overlaps the requested range.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - a field is missing or the range is reversed
    /// * `NotFound` - the item does not exist
    /// * `Forbidden` - the renter owns the item
    /// * `Conflict` - the dates are already taken
    pub async fn create_booking(&self, renter_id: Uuid, request: BookingRequest) -> DomainResult<Booking> {
        let (Some(item_id), Some(start), Some(end)) =
            (request.item_id, request.start_date, request.end_date)
        else {
            return Err(DomainError::invalid_request(MISSING_FIELDS));
        };
        let period = BookingPeriod::new(start, end)?;

        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item"))?;

        if item.is_owned_by(renter_id) {
            return Err(DomainError::forbidden(SELF_BOOKING));
        }

        let booking = {
            let _lock = self.locks.acquire(item.id).await;

            let taken = self
                .bookings
                .find_overlapping(item.id, &period, BookingStatus::Confirmed, None)
                .await?;
            if !taken.is_empty() {
                debug!(item_id = %item.id, conflicts = taken.len(), "Requested dates already booked");
                return Err(DomainError::conflict(DATES_TAKEN));
            }

            let booking = Booking::new_confirmed(item.owner, renter_id, item.id, period, item.price)?;
            self.bookings.create(booking).await?
        };

        info!(
            booking_id = %booking.booking_id,
            item_id = %booking.item,
            renter_id = %booking.renter,
            total_amount = booking.total_amount,
            "Booking created"
        );
        self.events.publish(&BookingEvent::created(booking.clone()));

        Ok(booking)
    }

    /// Owner confirms a booking after re-checking the item's calendar
    ///
    /// Accepting an already confirmed booking succeeds without side effects
    /// beyond a fresh `updatedAt` and event.
    pub async fn accept_booking(&self, actor_id: Uuid, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self.load(booking_id).await?;
        if !booking.is_owned_by(actor_id) {
            return Err(DomainError::forbidden(NOT_ALLOWED));
        }

        let booking = {
            let _lock = self.locks.acquire(booking.item).await;

            // state may have moved while waiting for the lock
            let mut booking = self.load(booking_id).await?;
            if booking.status.is_terminal() {
                return Err(DomainError::conflict(NOT_ACTIVE));
            }

            let taken = self
                .bookings
                .find_overlapping(booking.item, &booking.period(), BookingStatus::Confirmed, Some(booking.id))
                .await?;
            if !taken.is_empty() {
                return Err(DomainError::conflict(ACCEPT_CONFLICT));
            }

            booking.confirm();
            self.bookings.update(booking).await?
        };

        info!(booking_id = %booking.booking_id, item_id = %booking.item, "Booking confirmed");
        self.events.publish(&BookingEvent::updated(booking.clone()));

        Ok(booking)
    }

    /// Owner declines a booking
    pub async fn reject_booking(&self, actor_id: Uuid, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self.load(booking_id).await?;
        if !booking.is_owned_by(actor_id) {
            return Err(DomainError::forbidden(NOT_ALLOWED));
        }
        self.cancel(booking, "Booking rejected").await
    }

    /// Renter withdraws a booking
    pub async fn cancel_booking(&self, actor_id: Uuid, booking_id: Uuid) -> DomainResult<Booking> {
        let booking = self.load(booking_id).await?;
        if !booking.is_rented_by(actor_id) {
            return Err(DomainError::forbidden(NOT_ALLOWED));
        }
        self.cancel(booking, "Booking cancelled").await
    }

    /// All bookings of an item, newest first
    pub async fn bookings_for_item(&self, item_id: Uuid) -> DomainResult<Vec<BookingDetails>> {
        let bookings = self.bookings.find_by_item(item_id).await?;
        self.resolve(bookings).await
    }

    /// Bookings where the user is owner or renter, newest first
    pub async fn bookings_for_user(&self, user_id: Uuid) -> DomainResult<Vec<BookingDetails>> {
        let bookings = self.bookings.find_by_participant(user_id).await?;
        self.resolve(bookings).await
    }

    /// Days of an item held by pending or confirmed bookings, ascending
    pub async fn blocked_dates(&self, item_id: Uuid) -> DomainResult<Vec<NaiveDate>> {
        let bookings = self.bookings.find_by_item(item_id).await?;

        let dates: BTreeSet<NaiveDate> = bookings
            .iter()
            .filter(|b| b.status.holds_dates())
            .flat_map(|b| b.period().dates())
            .collect();

        Ok(dates.into_iter().collect())
    }

    /// Earnings of `user_id` as an owner
    pub async fn earnings_for_user(&self, user_id: Uuid) -> DomainResult<EarningsSummary> {
        let bookings = self.bookings.find_by_owner(user_id).await?;
        let details = self.resolve(bookings).await?;
        Ok(EarningsSummary::tally(details))
    }

    async fn load(&self, booking_id: Uuid) -> DomainResult<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking"))
    }

    async fn cancel(&self, booking: Booking, outcome: &'static str) -> DomainResult<Booking> {
        let booking = {
            let _lock = self.locks.acquire(booking.item).await;

            // an accept holding the lock may have rewritten the record
            let mut booking = self.load(booking.id).await?;
            if booking.status == BookingStatus::Completed {
                return Err(DomainError::conflict(COMPLETED));
            }

            booking.cancel();
            self.bookings.update(booking).await?
        };

        info!(booking_id = %booking.booking_id, item_id = %booking.item, "{}", outcome);
        self.events.publish(&BookingEvent::updated(booking.clone()));

        Ok(booking)
    }

    async fn resolve(&self, bookings: Vec<Booking>) -> DomainResult<Vec<BookingDetails>> {
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = bookings
            .iter()
            .flat_map(|b| [b.owner, b.renter])
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let item_ids: Vec<Uuid> = bookings
            .iter()
            .map(|b| b.item)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users: HashMap<Uuid, _> = self
            .users
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        let items: HashMap<Uuid, Item> = self
            .items
            .find_by_ids(&item_ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|b| BookingDetails::resolve(b, &users, &items))
            .collect())
    }
}
