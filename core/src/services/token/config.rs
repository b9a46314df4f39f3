//! Configuration for the token service

use jsonwebtoken::Algorithm;
use rh_shared::config::JwtConfig;

use crate::domain::entities::{JWT_AUDIENCE, JWT_ISSUER};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_expiry_seconds: 86400,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_expiry_seconds: jwt.access_token_expiry,
        }
    }
}
