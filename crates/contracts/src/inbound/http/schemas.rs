//! OpenAPI schema definitions for contract types.
//!
//! Domain types stay free of utoipa derives. The wrappers here mirror their
//! wire shape (camelCase members, SCREAMING_SNAKE_CASE error codes) and are
//! registered under the domain type names via `#[schema(as = ...)]`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in error envelopes.
#[derive(ToSchema)]
#[schema(as = domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "BAD_REQUEST")]
    BadRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "UNAUTHORIZED")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "FORBIDDEN")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "NOT_FOUND")]
    NotFound,
    /// The request conflicts with the current resource state.
    #[schema(rename = "CONFLICT")]
    Conflict,
    /// The caller exceeded its request allowance.
    #[schema(rename = "RATE_LIMITED")]
    RateLimited,
    /// One or more request fields failed validation.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "INTERNAL_ERROR")]
    InternalError,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// The operation did not finish in time.
    #[schema(rename = "TIMEOUT")]
    Timeout,
}

/// OpenAPI schema for [`crate::domain::FieldError`].
#[derive(ToSchema)]
#[schema(as = domain::FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Name of the offending input field.
    #[schema(example = "email")]
    field: String,
    /// Human-readable description of the problem.
    #[schema(example = "Invalid email address")]
    message: String,
    /// Optional machine-readable sub-code.
    #[schema(example = "invalid_format")]
    code: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ApiError`].
///
/// Error envelope with a machine-readable code and a human-readable message.
#[derive(ToSchema)]
#[schema(as = domain::ApiError, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Site not found")]
    message: String,
    /// Supplementary structured details.
    details: Option<serde_json::Value>,
    /// Per-field validation failures.
    field_errors: Option<Vec<FieldErrorSchema>>,
    /// Identifier tying the error to server logs.
    #[schema(example = "00000000-0000-0000-0000-000000000000")]
    correlation_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::UserRole`].
#[derive(ToSchema)]
#[schema(as = domain::UserRole)]
pub enum UserRoleSchema {
    /// Regular account.
    #[schema(rename = "user")]
    User,
    /// Operator account.
    #[schema(rename = "admin")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Normalised (lower-case) email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Display name shown in the UI.
    #[schema(example = "Ada Lovelace")]
    display_name: String,
    /// Account role.
    role: UserRoleSchema,
    /// Account creation time.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::AuthToken`].
#[derive(ToSchema)]
#[schema(as = domain::AuthToken, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthTokenSchema {
    /// Opaque bearer credential.
    access_token: String,
    /// Token scheme; always `Bearer`.
    #[schema(example = "Bearer")]
    token_type: String,
    /// Expiry time of the access token.
    #[schema(value_type = String, format = DateTime)]
    expires_at: String,
    /// Credential used to obtain a fresh access token.
    refresh_token: Option<String>,
}

/// OpenAPI schema for [`crate::domain::GenerationStatus`].
#[derive(ToSchema)]
#[schema(as = domain::GenerationStatus)]
pub enum GenerationStatusSchema {
    /// Waiting for a worker.
    #[schema(rename = "queued")]
    Queued,
    /// A worker is producing files.
    #[schema(rename = "processing")]
    Processing,
    /// Files are ready.
    #[schema(rename = "completed")]
    Completed,
    /// Generation stopped with an error.
    #[schema(rename = "failed")]
    Failed,
    /// The user cancelled the job.
    #[schema(rename = "cancelled")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::GenerationJob`].
#[derive(ToSchema)]
#[schema(as = domain::GenerationJob, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GenerationJobSchema {
    /// Job identifier.
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Owner of the job.
    #[schema(value_type = String, format = Uuid)]
    user_id: String,
    /// Trimmed site description.
    #[schema(example = "A portfolio site for a ceramicist")]
    prompt: String,
    /// Lifecycle state.
    status: GenerationStatusSchema,
    /// Completion percentage.
    #[schema(minimum = 0, maximum = 100)]
    progress: u8,
    /// Creation time.
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    /// Time of the last state change.
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    /// Failure cause, present only for failed jobs.
    error: Option<ApiErrorSchema>,
}

/// OpenAPI schema for [`crate::domain::GeneratedFile`].
#[derive(ToSchema)]
#[schema(as = domain::GeneratedFile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GeneratedFileSchema {
    /// Site-relative path.
    #[schema(example = "index.html")]
    path: String,
    /// MIME type.
    #[schema(example = "text/html")]
    content_type: String,
    /// File body.
    content: String,
}

/// OpenAPI schema for [`crate::domain::GenerationResult`].
#[derive(ToSchema)]
#[schema(as = domain::GenerationResult, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GenerationResultSchema {
    /// Job that produced the files.
    #[schema(value_type = String, format = Uuid)]
    job_id: String,
    /// Generated site files.
    files: Vec<GeneratedFileSchema>,
    /// Hosted preview location.
    preview_url: Option<String>,
    /// Completion time.
    #[schema(value_type = String, format = DateTime)]
    completed_at: String,
}

/// OpenAPI schema for [`crate::domain::PageMeta`].
#[derive(ToSchema)]
#[schema(as = domain::PageMeta, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetaSchema {
    /// One-based page number.
    #[schema(minimum = 1)]
    page: u32,
    /// Maximum items per page.
    #[schema(minimum = 1)]
    page_size: u32,
    /// Items across all pages.
    total_items: u64,
    /// Number of pages.
    total_pages: u32,
}
