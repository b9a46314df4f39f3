//! Type definitions shared by the API layer
//!
//! - `response` - success envelopes and health checks

pub mod response;

// Re-export commonly used types at module level
pub use response::{BookingEnvelope, HealthResponse, HealthStatus, ServiceHealth};
