use actix_web::{web, HttpResponse};
use rh_core::{BookingRepository, ItemRepository, UserRepository};

use crate::dto::BlockedDatesResponse;
use crate::handlers::ApiError;
use crate::routes::{parse_id, AppState};

/// Handler for GET /api/bookings/item/{id}
pub async fn bookings_for_item<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let item_id = parse_id(&path, "item")?;
    let bookings = state.booking_service.bookings_for_item(item_id).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// Handler for GET /api/bookings/user/{id}
///
/// Lists bookings where the user is the owner or the renter, newest first.
pub async fn bookings_for_user<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let user_id = parse_id(&path, "user")?;
    let bookings = state.booking_service.bookings_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// Handler for GET /api/bookings/item/{id}/blocked-dates
pub async fn blocked_dates<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let item_id = parse_id(&path, "item")?;
    let dates = state.booking_service.blocked_dates(item_id).await?;
    Ok(HttpResponse::Ok().json(BlockedDatesResponse { item_id, dates }))
}
