//! Owner and renter decisions on an existing booking

use actix_web::{web, HttpResponse};
use rh_core::{BookingRepository, ItemRepository, UserRepository};
use rh_shared::types::BookingEnvelope;

use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::{parse_id, AppState};

/// Handler for PATCH /api/bookings/{id}/accept (owner only)
pub async fn accept_booking<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let booking_id = parse_id(&path, "booking")?;
    let booking = state.booking_service.accept_booking(auth.user_id, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new("Booking confirmed", booking)))
}

/// Handler for PATCH /api/bookings/{id}/reject (owner only)
pub async fn reject_booking<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let booking_id = parse_id(&path, "booking")?;
    let booking = state.booking_service.reject_booking(auth.user_id, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new("Booking rejected", booking)))
}

/// Handler for PATCH /api/bookings/{id}/cancel (renter only)
pub async fn cancel_booking<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let booking_id = parse_id(&path, "booking")?;
    let booking = state.booking_service.cancel_booking(auth.user_id, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new("Booking cancelled", booking)))
}
