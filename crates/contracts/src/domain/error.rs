//! API error envelope shared by the web client and server.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; clients decode them from response bodies after checking the
//! shape with [`crate::domain::is_api_error`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::CorrelationId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request is malformed.
    BadRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with the current state of the resource.
    Conflict,
    /// The caller exceeded its request allowance.
    RateLimited,
    /// One or more request fields failed validation.
    ValidationError,
    /// An unexpected error occurred on the server.
    InternalError,
    /// A dependency is temporarily unavailable.
    ServiceUnavailable,
    /// The operation did not finish in time.
    Timeout,
}

impl ErrorCode {
    /// Every error code, in wire declaration order.
    pub const ALL: [Self; 10] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::Conflict,
        Self::RateLimited,
        Self::ValidationError,
        Self::InternalError,
        Self::ServiceUnavailable,
        Self::Timeout,
    ];

    /// Wire representation of the code.
    ///
    /// # Examples
    /// ```
    /// use sitegen_contracts::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::RateLimited.as_str(), "RATE_LIMITED");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::RateLimited => "RATE_LIMITED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
        }
    }

    /// Whether a client may retry the same request later.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::Timeout
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the [`ErrorCode`] wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error code `{0}`")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

/// Validation failure attached to a single request field.
///
/// Only ever appears nested inside [`ApiError::field_errors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct FieldError {
    field: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl FieldError {
    /// Create a field error without a machine-readable code.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Attach a machine-readable code such as `"too_short"`.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Optional machine-readable code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Error envelope exchanged at every API boundary.
///
/// ## Invariants
/// - `code` is always one of the [`ErrorCode`] values.
/// - `message` is always present.
/// - Optional members are omitted from the wire when absent.
///
/// Values are never mutated after construction: the `with_*` methods consume
/// the error and return a new one.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::{ApiError, ErrorCode};
/// use serde_json::json;
///
/// let err = ApiError::not_found("site missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(
///     serde_json::to_value(&err).unwrap(),
///     json!({ "code": "NOT_FOUND", "message": "site missing" }),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_errors: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl ApiError {
    /// Create an error with every optional member absent.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            field_errors: None,
            correlation_id: None,
        }
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use sitegen_contracts::domain::ApiError;
    /// use serde_json::{json, Map};
    ///
    /// let mut details = Map::new();
    /// details.insert("limit".to_owned(), json!(10));
    /// let err = ApiError::rate_limited("slow down").with_details(details);
    /// assert_eq!(err.details().and_then(|d| d.get("limit")), Some(&json!(10)));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Append a single field error.
    #[must_use]
    pub fn with_field_error(mut self, field_error: FieldError) -> Self {
        self.field_errors
            .get_or_insert_with(Vec::new)
            .push(field_error);
        self
    }

    /// Replace the field errors with the supplied list.
    #[must_use]
    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }

    /// Attach a correlation identifier.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Attach the task-scoped [`CorrelationId`] unless one is already set.
    ///
    /// Leaves the error untouched when no identifier is in scope.
    #[must_use]
    pub fn with_current_correlation_id(self) -> Self {
        if self.correlation_id.is_some() {
            return self;
        }
        match CorrelationId::current() {
            Some(id) => self.with_correlation_id(id.to_string()),
            None => self,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Map<String, Value>> {
        self.details.as_ref()
    }

    /// Per-field validation failures.
    #[must_use]
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.field_errors.as_deref()
    }

    /// Correlation identifier tying this error to server logs.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Whether a client may retry the failed request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Convenience constructor for [`ErrorCode::BadRequest`].
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RateLimited, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    ///
    /// # Examples
    /// ```
    /// use sitegen_contracts::domain::{ApiError, FieldError};
    ///
    /// let err = ApiError::validation(
    ///     "bad",
    ///     vec![FieldError::new("email", "invalid")],
    /// );
    /// assert_eq!(err.field_errors().map(<[_]>::len), Some(1));
    /// ```
    #[must_use]
    pub fn validation(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        Self::new(ErrorCode::ValidationError, message).with_field_errors(field_errors)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    #[must_use]
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::Timeout`].
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Inputs accepted by [`create_api_error`].
///
/// `code` and `message` are required; the remaining members default to
/// absent, so callers only spell out what they have:
///
/// ```
/// use sitegen_contracts::domain::{create_api_error, ApiErrorParams, ErrorCode};
///
/// let err = create_api_error(ApiErrorParams {
///     correlation_id: Some("req-42".to_owned()),
///     ..ApiErrorParams::new(ErrorCode::Timeout, "upstream too slow")
/// });
/// assert_eq!(err.correlation_id(), Some("req-42"));
/// assert!(err.details().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorParams {
    /// Error category.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    pub details: Option<Map<String, Value>>,
    /// Optional per-field failures.
    pub field_errors: Option<Vec<FieldError>>,
    /// Optional correlation identifier.
    pub correlation_id: Option<String>,
}

impl ApiErrorParams {
    /// Required members only; everything else absent.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            field_errors: None,
            correlation_id: None,
        }
    }
}

/// Build a complete [`ApiError`].
///
/// Optional members start absent and are then overlaid with whatever the
/// caller supplied. Pure and deterministic.
#[must_use]
pub fn create_api_error(params: ApiErrorParams) -> ApiError {
    let ApiErrorParams {
        code,
        message,
        details,
        field_errors,
        correlation_id,
    } = params;

    let mut error = ApiError::new(code, message);
    if details.is_some() {
        error.details = details;
    }
    if field_errors.is_some() {
        error.field_errors = field_errors;
    }
    if correlation_id.is_some() {
        error.correlation_id = correlation_id;
    }
    error
}
