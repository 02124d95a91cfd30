//! Contract types shared by the web client and server.
//!
//! Purpose: define the strongly typed shapes exchanged over the API. Types are
//! immutable once built and document their invariants and serialisation
//! contracts (serde) in their Rustdoc. Nothing here depends on a transport or
//! framework; adapters live under `inbound`.
//!
//! Public surface:
//! - ApiError / ErrorCode / FieldError: the error envelope.
//! - is_api_error / validate_api_error / decode_api_error: checks for
//!   untrusted error payloads.
//! - ApiResponse / PageMeta / Paginated: response envelopes.
//! - User, AuthToken, GenerationJob, GenerationResult: entity models.

pub mod auth;
pub mod correlation_id;
pub mod envelope;
pub mod error;
pub mod generation;
pub mod user;
pub mod validation;

pub use self::auth::{
    AccessToken, AuthSession, AuthToken, LoginCredentials, LoginValidationError, TokenType,
};
pub use self::correlation_id::{CORRELATION_ID_HEADER, CorrelationId};
pub use self::envelope::{
    ApiResponse, ApiResponseShapeError, PageMeta, PageMetaError, Paginated,
};
pub use self::error::{
    ApiError, ApiErrorParams, ErrorCode, FieldError, UnknownErrorCode, create_api_error,
};
pub use self::generation::{
    GeneratedFile, GenerationJob, GenerationResult, GenerationStatus, JobId, JobTransitionError,
    JobValidationError, Prompt, PromptValidationError,
};
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserRole, UserValidationError};
pub use self::validation::{
    DecodeError, EnvelopeShapeError, decode_api_error, is_api_error, validate_api_error,
};

/// Convenient result alias for fallible API operations.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::{ApiError, ApiResult};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(ApiError::forbidden("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, ApiError>;
