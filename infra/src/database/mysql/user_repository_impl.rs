//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use rh_core::domain::entities::User;
use rh_core::errors::DomainError;
use rh_core::repositories::UserRepository;

use super::rows::{column, db_error, format_roles, parse_roles, uuid_column};

const COLUMNS: &str = "id, name, email, roles, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let roles: String = column(row, "roles")?;

        Ok(User {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            roles: parse_roles(&roles),
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM users WHERE id IN (", COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load users"))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!("INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?)", COLUMNS);

        sqlx::query(&query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(format_roles(&user.roles))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::invalid_request("Email already registered")
                }
                other => DomainError::internal(format!("Failed to create user: {}", other)),
            })?;

        Ok(user)
    }
}
