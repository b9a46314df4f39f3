//! Column decoding helpers shared by the MySQL repositories.

use serde::de::DeserializeOwned;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use uuid::Uuid;

use rh_core::domain::entities::{Role, RoleSet};
use rh_core::errors::DomainError;

/// Maps a driver error onto the domain's internal error
pub(crate) fn db_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::internal(format!("{}: {}", context, e))
}

/// Reads a column, reporting the column name on failure
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    parse_uuid(&raw, name)
}

pub(crate) fn parse_uuid(raw: &str, name: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| DomainError::internal(format!("Invalid {} UUID: {}", name, e)))
}

/// Decodes a lowercase enum stored as its serde name
pub(crate) fn parse_enum<T: DeserializeOwned>(raw: &str, name: &str) -> Result<T, DomainError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| DomainError::internal(format!("Invalid {} value: {}", name, raw)))
}

/// Encodes a lowercase enum to its serde name
pub(crate) fn enum_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Comma separated role list, unknown names skipped
pub(crate) fn parse_roles(raw: &str) -> RoleSet {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| s.parse::<Role>().ok())
        .collect()
}

pub(crate) fn format_roles(roles: &RoleSet) -> String {
    roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",")
}
