//! JWT claims carried by bearer tokens.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, RoleSet};

/// JWT issuer
pub const JWT_ISSUER: &str = "renthub";

/// JWT audience
pub const JWT_AUDIENCE: &str = "renthub-api";

/// The `role` claim, which issuers send either as one name or as a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    fn names(&self) -> Vec<&str> {
        match self {
            RoleClaim::One(name) => vec![name.as_str()],
            RoleClaim::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&RoleSet> for RoleClaim {
    fn from(roles: &RoleSet) -> Self {
        RoleClaim::Many(roles.iter().map(|r| r.as_str().to_string()).collect())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    #[serde(default)]
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID
    #[serde(default)]
    pub jti: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,

    /// Legacy admin flag, honoured alongside `role`
    #[serde(default, rename = "isAdmin", skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl Claims {
    /// Creates claims for an access token valid for `ttl`
    pub fn new_access_token(user_id: Uuid, roles: &RoleSet, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            role: (!roles.is_empty()).then(|| RoleClaim::from(roles)),
            is_admin: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Roles granted by the token; unknown role names are ignored
    pub fn roles(&self) -> RoleSet {
        let mut roles: RoleSet = self
            .role
            .as_ref()
            .map(|claim| claim.names().into_iter().filter_map(|n| n.parse().ok()).collect())
            .unwrap_or_default();

        if self.is_admin == Some(true) {
            roles.insert(Role::Admin);
        }
        roles
    }
}
