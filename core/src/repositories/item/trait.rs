//! Item repository trait.
//!
//! Items are owned by the listing service; the booking engine only looks
//! them up, so the contract is read-mostly.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Item;
use crate::errors::DomainError;

/// Repository trait for Item lookups
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find an item by id
    ///
    /// # Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - No such item
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError>;

    /// Fetch every item whose id is in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>, DomainError>;

    /// Store an item
    async fn create(&self, item: Item) -> Result<Item, DomainError>;
}
