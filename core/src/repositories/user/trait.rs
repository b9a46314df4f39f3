//! User repository trait.
//!
//! The booking engine reads users for display enrichment only.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Fetch every user whose id is in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Err(DomainError::InvalidRequest)` - Email already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
