//! Item repository module.

mod r#trait;
pub use r#trait::ItemRepository;

mod memory;
pub use memory::InMemoryItemRepository;
