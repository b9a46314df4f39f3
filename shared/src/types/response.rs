//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Success envelope for booking mutations: `{status: true, message, booking}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEnvelope<T> {
    /// Always `true` for successful calls
    pub status: bool,

    /// Human-readable outcome
    pub message: String,

    /// The affected booking
    pub booking: T,
}

impl<T> BookingEnvelope<T> {
    /// Create a successful envelope
    pub fn new(message: impl Into<String>, booking: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            booking,
        }
    }

    /// Map the booking to a different type
    pub fn map<U, F>(self, f: F) -> BookingEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        BookingEnvelope {
            status: self.status,
            message: self.message,
            booking: f(self.booking),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Individual service health checks
    pub services: HashMap<String, ServiceHealth>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Build a response whose overall status is the worst of its services
    pub fn from_services(services: HashMap<String, ServiceHealth>, version: impl Into<String>) -> Self {
        let status = services
            .values()
            .map(|s| s.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            services,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}

/// Health status enumeration, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Service status
    pub status: HealthStatus,

    /// Health check message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}
