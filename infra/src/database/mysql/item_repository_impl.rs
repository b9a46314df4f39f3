//! MySQL implementation of the ItemRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rh_core::domain::entities::Item;
use rh_core::errors::DomainError;
use rh_core::repositories::ItemRepository;

use super::rows::{column, db_error, enum_name, parse_enum, parse_uuid, uuid_column};

const COLUMNS: &str = "id, owner_id, category_id, name, description, location, images, \
                       item_condition, price, price_unit, availability, created_at, updated_at";

/// MySQL implementation of ItemRepository
pub struct MySqlItemRepository {
    pool: MySqlPool,
}

impl MySqlItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &MySqlRow) -> Result<Item, DomainError> {
        let category: Option<String> = column(row, "category_id")?;
        let images: String = column(row, "images")?;
        let condition: String = column(row, "item_condition")?;
        let price_unit: String = column(row, "price_unit")?;

        Ok(Item {
            id: uuid_column(row, "id")?,
            owner: uuid_column(row, "owner_id")?,
            category: category.as_deref().map(|c| parse_uuid(c, "category_id")).transpose()?,
            name: column(row, "name")?,
            description: column(row, "description")?,
            location: column(row, "location")?,
            images: serde_json::from_str(&images).unwrap_or_default(),
            condition: parse_enum(&condition, "item_condition")?,
            price: column(row, "price")?,
            price_unit: parse_enum(&price_unit, "price_unit")?,
            availability: column(row, "availability")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Item>, DomainError> {
        let query = format!("SELECT {} FROM items WHERE id = ? LIMIT 1", COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find item"))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM items WHERE id IN (", COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load items"))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn create(&self, item: Item) -> Result<Item, DomainError> {
        let query = format!(
            "INSERT INTO items ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );
        let images = serde_json::to_string(&item.images)
            .map_err(|e| DomainError::internal(format!("Failed to encode images: {}", e)))?;

        sqlx::query(&query)
            .bind(item.id.to_string())
            .bind(item.owner.to_string())
            .bind(item.category.map(|c| c.to_string()))
            .bind(&item.name)
            .bind(&item.description)
            .bind(&item.location)
            .bind(images)
            .bind(enum_name(&item.condition))
            .bind(item.price)
            .bind(enum_name(&item.price_unit))
            .bind(item.availability)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save item"))?;

        Ok(item)
    }
}
