use actix_web::{web, HttpResponse};
use rh_core::errors::DomainError;
use rh_core::{BookingRepository, ItemRepository, UserRepository};
use rh_shared::types::BookingEnvelope;

use crate::dto::CreateBookingRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/bookings
///
/// Books an item for the authenticated caller. The booking is confirmed
/// at once when its dates are free.
///
/// # Request Body
///
/// ```json
/// {
///     "itemId": "0b6f6c1e-5d7a-4f2b-9a51-3c1d2e4f5a6b",
///     "startDate": "2024-07-01",
///     "endDate": "2024-07-04"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "status": true, "message": "Booking requested", "booking": { ... } }
/// ```
///
/// ## Errors
/// - 400: missing fields, bad range, the caller owns the item, or dates already booked
/// - 401: missing or invalid bearer token
/// - 404: the item does not exist
pub async fn create_booking<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    auth: AuthContext,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let request = body.into_inner().into_request()?;
    let booking = state
        .booking_service
        .create_booking(auth.user_id, request)
        .await
        .map_err(|e| match e {
            // self-booking is a request error on this route
            DomainError::Forbidden { message } => ApiError::BadRequest(message),
            other => ApiError::Domain(other),
        })?;

    log::info!("User {} booked item {} as {}", auth.user_id, booking.item, booking.booking_id);
    Ok(HttpResponse::Created().json(BookingEnvelope::new("Booking requested", booking)))
}
