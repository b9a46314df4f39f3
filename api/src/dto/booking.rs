use chrono::{DateTime, NaiveDate};
use rh_core::BookingRequest;
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::handlers::ApiError;

const MISSING_FIELDS: &str = "Missing fields";

/// Body of `POST /api/bookings`
///
/// Dates accept `YYYY-MM-DD` or an RFC 3339 timestamp, of which only the
/// calendar date is kept. Blank values count as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(required(message = "Missing fields"))]
    #[serde(default)]
    pub item_id: Option<String>,

    #[validate(required(message = "Missing fields"))]
    #[serde(default, deserialize_with = "flexible_date")]
    pub start_date: Option<NaiveDate>,

    #[validate(required(message = "Missing fields"))]
    #[serde(default, deserialize_with = "flexible_date")]
    pub end_date: Option<NaiveDate>,
}

impl CreateBookingRequest {
    /// Converts into the engine's request; a malformed item id is rejected here
    pub fn into_request(self) -> Result<BookingRequest, ApiError> {
        if self.validate().is_err() {
            return Err(ApiError::bad_request(MISSING_FIELDS));
        }

        let item_id = match self.item_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid item id"))?),
            None => None,
        };

        Ok(BookingRequest {
            item_id,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Response of `GET /api/bookings/item/{id}/blocked-dates`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDatesResponse {
    pub item_id: Uuid,
    pub dates: Vec<NaiveDate>,
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| format!("Invalid date: {}", raw))
}

fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date(&raw).map_err(de::Error::custom))
        .transpose()
}
