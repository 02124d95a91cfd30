//! Structural validation of untrusted error envelopes.
//!
//! Clients receive error bodies from a transport they do not control. The
//! predicate here checks the *shape* of such a value before any field is
//! trusted. It deliberately treats `code` as any string: membership in
//! [`ErrorCode`] is enforced by [`decode_api_error`], not by the predicate.
//!
//! Optional members set to JSON `null` count as absent.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::{ApiError, ErrorCode};

/// Reason an untrusted value does not have the error envelope shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeShapeError {
    /// The value is not a JSON object (includes `null`).
    #[error("error envelope must be a JSON object")]
    NotAnObject,
    /// A required member is missing or is not a string.
    #[error("`{field}` must be a string")]
    NotAString {
        /// Offending member name.
        field: &'static str,
    },
    /// `details` is present but not an object.
    #[error("`details` must be a JSON object when present")]
    DetailsNotAnObject,
    /// `fieldErrors` is present but not an array.
    #[error("`fieldErrors` must be an array when present")]
    FieldErrorsNotAnArray,
    /// An entry of `fieldErrors` is malformed.
    #[error("`fieldErrors[{index}]` must be an object with string `field` and `message`")]
    InvalidFieldError {
        /// Position of the malformed entry.
        index: usize,
    },
}

/// Failure to turn an untrusted value into a typed [`ApiError`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value does not have the envelope shape.
    #[error(transparent)]
    Shape(#[from] EnvelopeShapeError),
    /// `code` is a string but not a known [`ErrorCode`].
    #[error("unknown error code `{0}`")]
    UnknownCode(String),
    /// The shape is right but strict decoding still failed (e.g. an
    /// unexpected member).
    #[error("error envelope failed strict decoding: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Check `value` against the error envelope shape, reporting the first
/// violation.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::{validate_api_error, EnvelopeShapeError};
/// use serde_json::json;
///
/// assert!(validate_api_error(&json!({ "code": "X", "message": "m" })).is_ok());
/// assert_eq!(
///     validate_api_error(&json!({ "code": 1, "message": "m" })),
///     Err(EnvelopeShapeError::NotAString { field: "code" }),
/// );
/// ```
pub fn validate_api_error(value: &Value) -> Result<(), EnvelopeShapeError> {
    let object = value.as_object().ok_or(EnvelopeShapeError::NotAnObject)?;

    require_string(object, "code")?;
    require_string(object, "message")?;

    match present(object, "details") {
        None | Some(Value::Object(_)) => {}
        Some(_) => return Err(EnvelopeShapeError::DetailsNotAnObject),
    }

    match present(object, "fieldErrors") {
        None => {}
        Some(Value::Array(entries)) => {
            if let Some(index) = entries.iter().position(|entry| !is_field_error(entry)) {
                return Err(EnvelopeShapeError::InvalidFieldError { index });
            }
        }
        Some(_) => return Err(EnvelopeShapeError::FieldErrorsNotAnArray),
    }

    match present(object, "correlationId") {
        None | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(EnvelopeShapeError::NotAString {
            field: "correlationId",
        }),
    }
}

/// Whether `value` structurally satisfies the error envelope shape.
///
/// Total: never panics, returns `false` for `null`, scalars, arrays and
/// malformed objects.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::is_api_error;
/// use serde_json::json;
///
/// assert!(is_api_error(&json!({ "code": "NOT_FOUND", "message": "x" })));
/// assert!(!is_api_error(&json!(null)));
/// ```
pub fn is_api_error(value: &Value) -> bool {
    match validate_api_error(value) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "value rejected as error envelope");
            false
        }
    }
}

/// Validate the shape, then strictly decode into an [`ApiError`].
///
/// Unlike [`is_api_error`], this rejects codes outside [`ErrorCode`] and
/// members the envelope does not define.
pub fn decode_api_error(value: Value) -> Result<ApiError, DecodeError> {
    validate_api_error(&value)?;

    let unknown = value
        .get("code")
        .and_then(Value::as_str)
        .filter(|code| code.parse::<ErrorCode>().is_err());
    if let Some(code) = unknown {
        return Err(DecodeError::UnknownCode(code.to_owned()));
    }

    serde_json::from_value(value).map_err(DecodeError::Schema)
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn require_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<(), EnvelopeShapeError> {
    match object.get(field) {
        Some(Value::String(_)) => Ok(()),
        _ => Err(EnvelopeShapeError::NotAString { field }),
    }
}

fn is_field_error(entry: &Value) -> bool {
    entry.as_object().is_some_and(|object| {
        matches!(object.get("field"), Some(Value::String(_)))
            && matches!(object.get("message"), Some(Value::String(_)))
    })
}
