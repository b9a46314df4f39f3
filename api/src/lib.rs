//! RentHub HTTP API
//!
//! actix-web surface over the booking engine: JWT middleware, request DTOs,
//! booking and earnings routes, and the live booking event stream.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
