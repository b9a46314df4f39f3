//! Application factory
//!
//! Builds the actix-web `App` with shared state, body/path error handlers
//! and every route. Process-wide middleware (access log, CORS) is wrapped
//! by the caller so tests can exercise the bare routing.

use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, App, HttpResponse};
use rh_core::{BookingEventKind, BookingRepository, ItemRepository, TokenService, UserRepository};
use rh_shared::errors::ErrorResponse;
use rh_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::handlers::error::{json_error_handler, path_error_handler};
use crate::middleware::JwtAuth;
use crate::routes::{bookings, earnings, AppState};

/// Default JSON body limit when the caller passes 0
const DEFAULT_PAYLOAD_LIMIT: usize = 256 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app<B, I, U>(
    app_state: web::Data<AppState<B, I, U>>,
    token_service: web::Data<TokenService>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let limit = if max_payload_size == 0 { DEFAULT_PAYLOAD_LIMIT } else { max_payload_size };

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .app_data(web::JsonConfig::default().limit(limit).error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health_check::<B, I, U>))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/bookings")
                        .route(
                            "",
                            web::post()
                                .to(bookings::create_booking::<B, I, U>)
                                .wrap(JwtAuth::new()),
                        )
                        .route("/item/{id}", web::get().to(bookings::bookings_for_item::<B, I, U>))
                        .route(
                            "/item/{id}/blocked-dates",
                            web::get().to(bookings::blocked_dates::<B, I, U>),
                        )
                        .route("/user/{id}", web::get().to(bookings::bookings_for_user::<B, I, U>))
                        .route(
                            "/stream/{user_id}",
                            web::get().to(bookings::stream_bookings::<B, I, U>),
                        )
                        .route(
                            "/{id}/accept",
                            web::patch()
                                .to(bookings::accept_booking::<B, I, U>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/{id}/reject",
                            web::patch()
                                .to(bookings::reject_booking::<B, I, U>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/{id}/cancel",
                            web::patch()
                                .to(bookings::cancel_booking::<B, I, U>)
                                .wrap(JwtAuth::new()),
                        ),
                )
                .route("/earnings/user/{id}", web::get().to(earnings::earnings_for_user::<B, I, U>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Probes the database pool when one is configured and reports the number
/// of live feed subscribers.
async fn health_check<B, I, U>(state: web::Data<AppState<B, I, U>>) -> HttpResponse
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let mut services = HashMap::new();

    if let Some(pool) = &state.database {
        let started = Instant::now();
        let health = match pool.health_check().await {
            Ok(true) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: Some(pool.get_statistics().to_string()),
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            },
            Ok(false) | Err(_) => ServiceHealth {
                status: HealthStatus::Unhealthy,
                message: Some("database unreachable".to_string()),
                response_time_ms: Some(started.elapsed().as_millis() as u64),
            },
        };
        services.insert("database".to_string(), health);
    }

    let listeners: usize = BookingEventKind::ALL
        .iter()
        .map(|kind| state.events.listener_count(*kind))
        .sum();
    services.insert(
        "event_bus".to_string(),
        ServiceHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{} listeners", listeners)),
            response_time_ms: None,
        },
    );

    let response = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Route not found"))
}
