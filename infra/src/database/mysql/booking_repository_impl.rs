//! MySQL implementation of the BookingRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use rh_core::domain::entities::{Booking, BookingStatus};
use rh_core::domain::value_objects::BookingPeriod;
use rh_core::errors::DomainError;
use rh_core::repositories::BookingRepository;

use super::rows::{column, db_error, uuid_column};

const COLUMNS: &str = "id, booking_ref, owner_id, renter_id, item_id, total_amount, \
                       start_date, end_date, status, created_at, updated_at";

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: &MySqlRow) -> Result<Booking, DomainError> {
        let status: String = column(row, "status")?;

        Ok(Booking {
            id: uuid_column(row, "id")?,
            booking_id: uuid_column(row, "booking_ref")?,
            owner: uuid_column(row, "owner_id")?,
            renter: uuid_column(row, "renter_id")?,
            item: uuid_column(row, "item_id")?,
            total_amount: column(row, "total_amount")?,
            start_date: column::<NaiveDate>(row, "start_date")?,
            end_date: column::<NaiveDate>(row, "end_date")?,
            status: status
                .parse::<BookingStatus>()
                .map_err(DomainError::internal)?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    async fn fetch_where(&self, clause: &str, binds: &[String]) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE {} ORDER BY created_at DESC, booking_ref DESC",
            COLUMNS, clause
        );

        let mut q = sqlx::query(&query);
        for value in binds {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list bookings"))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking, DomainError> {
        let query = format!(
            "INSERT INTO bookings ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );

        sqlx::query(&query)
            .bind(booking.id.to_string())
            .bind(booking.booking_id.to_string())
            .bind(booking.owner.to_string())
            .bind(booking.renter.to_string())
            .bind(booking.item.to_string())
            .bind(booking.total_amount)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.status.as_str())
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save booking"))?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {} FROM bookings WHERE id = ? LIMIT 1", COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find booking"))?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }

    async fn update(&self, booking: Booking) -> Result<Booking, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET total_amount = ?, start_date = ?, end_date = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(booking.total_amount)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.status.as_str())
        .bind(booking.updated_at)
        .bind(booking.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update booking"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Booking"));
        }
        Ok(booking)
    }

    async fn find_by_item(&self, item_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.fetch_where("item_id = ?", &[item_id.to_string()]).await
    }

    async fn find_by_participant(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let id = user_id.to_string();
        self.fetch_where("owner_id = ? OR renter_id = ?", &[id.clone(), id]).await
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.fetch_where("owner_id = ?", &[owner_id.to_string()]).await
    }

    async fn find_overlapping(
        &self,
        item_id: Uuid,
        period: &BookingPeriod,
        status: BookingStatus,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings \
             WHERE item_id = ? AND status = ? AND start_date <= ? AND end_date >= ? AND id <> ? \
             ORDER BY created_at DESC",
            COLUMNS
        );

        // nil never matches a stored id
        let excluded = exclude.unwrap_or_else(Uuid::nil);

        let rows = sqlx::query(&query)
            .bind(item_id.to_string())
            .bind(status.as_str())
            .bind(period.end())
            .bind(period.start())
            .bind(excluded.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to check overlapping bookings"))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}
