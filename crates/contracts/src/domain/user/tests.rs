//! Tests for the user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn user() -> User {
    User::new(
        UserId::new(VALID_ID).expect("fixture id is valid"),
        EmailAddress::new("ada@example.com").expect("fixture email is valid"),
        DisplayName::new("Ada Lovelace").expect("fixture display name is valid"),
        UserRole::User,
        created_at(),
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn random_user_ids_are_distinct() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  Ada@Example.COM ", "ada@example.com")]
#[case("first.last+tag@sub.example.co.uk", "first.last+tag@sub.example.co.uk")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("ada", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("ada@localhost", UserValidationError::InvalidEmail)]
#[case("ada@example..com", UserValidationError::InvalidEmail)]
#[case("ada@@example.com", UserValidationError::InvalidEmail)]
#[case("a da@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::InvalidEmail)
    );
}

#[rstest]
#[case("   ", UserValidationError::EmptyDisplayName)]
#[case("ab", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
#[case("bad$char", UserValidationError::DisplayNameInvalidCharacters)]
fn display_name_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw), Err(expected));
}

#[rstest]
fn display_name_rejects_overlong_input() {
    assert_eq!(
        DisplayName::new("a".repeat(DISPLAY_NAME_MAX + 1)),
        Err(UserValidationError::DisplayNameTooLong {
            max: DISPLAY_NAME_MAX
        })
    );
}

#[rstest]
fn serialises_to_camel_case(user: User) {
    let value = serde_json::to_value(&user).expect("user serialises");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "email": "ada@example.com",
            "displayName": "Ada Lovelace",
            "role": "user",
            "createdAt": "2026-03-01T09:00:00Z"
        })
    );
}

#[rstest]
fn deserialisation_round_trips(user: User) {
    let value = serde_json::to_value(&user).expect("user serialises");
    let decoded: User = serde_json::from_value(value).expect("user deserialises");
    assert_eq!(decoded, user);
}

#[rstest]
fn deserialisation_defaults_role() {
    let decoded: User = serde_json::from_value(json!({
        "id": VALID_ID,
        "email": "ada@example.com",
        "displayName": "Ada Lovelace",
        "createdAt": "2026-03-01T09:00:00Z"
    }))
    .expect("payload without role deserialises");
    assert_eq!(decoded.role(), UserRole::User);
    assert!(!decoded.is_admin());
}

#[rstest]
fn snake_case_members_are_rejected() {
    let result = serde_json::from_value::<User>(json!({
        "id": VALID_ID,
        "email": "ada@example.com",
        "display_name": "Ada Lovelace",
        "created_at": "2026-03-01T09:00:00Z"
    }));
    assert!(result.is_err());
}

#[rstest]
fn deserialisation_revalidates_fields() {
    let result = serde_json::from_value::<User>(json!({
        "id": VALID_ID,
        "email": "not-an-email",
        "displayName": "Ada Lovelace",
        "createdAt": "2026-03-01T09:00:00Z"
    }));
    let err = result.expect_err("invalid email must be rejected");
    assert!(err.to_string().contains("email must be a valid address"));
}
