//! HTTP adapter mapping for API errors and response envelopes.
//!
//! Purpose: keep [`ApiError`] transport agnostic while letting Actix handlers
//! return it (or an [`ApiResponse`]) and get a consistent status code, JSON
//! body and correlation header.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, Responder, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::{ApiError, ApiResponse, CORRELATION_ID_HEADER, ErrorCode};

/// Message sent to clients in place of internal error details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// HTTP status conveying the error category.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use sitegen_contracts::domain::ErrorCode;
/// use sitegen_contracts::inbound::http::status_for;
///
/// assert_eq!(status_for(ErrorCode::ValidationError), StatusCode::UNPROCESSABLE_ENTITY);
/// ```
#[must_use]
pub const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

/// Client-facing copy of `error`, with the ambient correlation id filled in.
///
/// Internal errors lose their message, details and field errors.
fn redact_if_internal(error: &ApiError) -> ApiError {
    let scoped = error.clone().with_current_correlation_id();
    if scoped.code() != ErrorCode::InternalError {
        return scoped;
    }
    error!(
        detail = scoped.message(),
        correlation_id = scoped.correlation_id(),
        "internal error redacted from client payload"
    );
    let mut redacted = ApiError::internal(REDACTED_MESSAGE);
    if let Some(id) = scoped.correlation_id() {
        redacted = redacted.with_correlation_id(id);
    }
    redacted
}

fn response_builder(error: &ApiError) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status_for(error.code()));
    if let Some(id) = error.correlation_id() {
        builder.insert_header((CORRELATION_ID_HEADER, id.to_owned()));
    }
    builder
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let payload = redact_if_internal(self);
        response_builder(&payload).json(payload)
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to api error");
        ApiError::internal(REDACTED_MESSAGE).with_current_correlation_id()
    }
}

impl<T> Responder for ApiResponse<T>
where
    T: Serialize + Clone,
{
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            Self::Success { .. } => HttpResponse::Ok().json(self),
            Self::Failure(error) => {
                let payload = redact_if_internal(&error);
                response_builder(&payload).json(ApiResponse::<()>::failure(payload))
            }
        }
    }
}
