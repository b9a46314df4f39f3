//! In-memory implementation of ItemRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Item;
use crate::errors::DomainError;

use super::r#trait::ItemRepository;

#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>, DomainError> {
        let items = self.items.read().await;
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }
}
