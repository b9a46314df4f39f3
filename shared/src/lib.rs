//! Shared utilities and common types for the RentHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error codes and response envelopes
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, EventsConfig, JwtConfig, LoggingConfig,
    ServerConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{BookingEnvelope, HealthResponse, HealthStatus};
