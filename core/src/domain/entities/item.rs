//! Item entity: a listing owned by exactly one user.
//!
//! Items are managed by the listing service; the booking engine only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Period the listed price applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    #[default]
    Day,
    Month,
}

/// Physical condition of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCondition {
    New,
    LikeNew,
    #[default]
    Good,
    Fair,
    Poor,
}

/// Listed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,

    /// Listing user
    pub owner: Uuid,

    #[serde(default)]
    pub category: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub condition: ItemCondition,

    /// Unit price in whole currency units
    pub price: i64,

    #[serde(default)]
    pub price_unit: PriceUnit,

    /// Listing visibility flag; bookings never toggle it
    pub availability: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new available item with default condition and day pricing
    pub fn new(owner: Uuid, name: impl Into<String>, price: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner,
            category: None,
            name: name.into(),
            description: None,
            location: None,
            images: Vec::new(),
            condition: ItemCondition::default(),
            price,
            price_unit: PriceUnit::default(),
            availability: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }
}
