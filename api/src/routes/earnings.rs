use actix_web::{web, HttpResponse};
use rh_core::{BookingRepository, ItemRepository, UserRepository};

use crate::handlers::ApiError;
use crate::routes::{parse_id, AppState};

/// Handler for GET /api/earnings/user/{id}
///
/// Returns `{total, pending, transactions}` over the bookings the user owns.
pub async fn earnings_for_user<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let user_id = parse_id(&path, "user")?;
    let summary = state.booking_service.earnings_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
