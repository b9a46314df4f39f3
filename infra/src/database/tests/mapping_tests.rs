//! Unit tests for column decoding helpers

use rh_core::domain::entities::{ItemCondition, PriceUnit, Role, RoleSet};

use crate::database::mysql::rows::{enum_name, format_roles, parse_enum, parse_roles, parse_uuid};

#[test]
fn test_roles_round_trip_through_column_text() {
    let roles: RoleSet = [Role::Owner, Role::Admin].into_iter().collect();
    let text = format_roles(&roles);

    assert_eq!(text, "admin,owner");
    assert_eq!(parse_roles(&text), roles);
}

#[test]
fn test_parse_roles_skips_unknown_and_blank() {
    let roles = parse_roles("renter,,wizard");
    assert!(roles.contains(Role::Renter));
    assert_eq!(roles.iter().count(), 1);
    assert!(parse_roles("").is_empty());
}

#[test]
fn test_enum_columns() {
    assert_eq!(enum_name(&ItemCondition::LikeNew), "like-new");
    assert_eq!(parse_enum::<ItemCondition>("like-new", "item_condition").unwrap(), ItemCondition::LikeNew);
    assert_eq!(parse_enum::<PriceUnit>("month", "price_unit").unwrap(), PriceUnit::Month);
    assert!(parse_enum::<PriceUnit>("week", "price_unit").is_err());
}

#[test]
fn test_parse_uuid_error_names_column() {
    let err = parse_uuid("not-a-uuid", "item_id").unwrap_err();
    assert!(err.to_string().contains("item_id"));
}
