//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::{Claims, RoleSet};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 bearer tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues an access token for `user_id` carrying `roles`
    pub fn issue_access_token(&self, user_id: Uuid, roles: &RoleSet) -> Result<String, DomainError> {
        let mut claims = Claims::new_access_token(
            user_id,
            roles,
            Duration::seconds(self.config.access_token_expiry_seconds),
        );
        claims.iss = self.config.issuer.clone();
        claims.aud = self.config.audience.clone();
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError::Token)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::InvalidClaims,
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
                    claim: claim.clone(),
                },
                _ => TokenError::InvalidTokenFormat,
            })?;

        if token_data.claims.user_id().is_err() {
            return Err(TokenError::InvalidClaims.into());
        }

        Ok(token_data.claims)
    }
}
