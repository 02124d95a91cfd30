//! HTTP adapter for Actix handlers built on the contracts.
//!
//! Maps [`crate::domain::ApiError`] onto status codes and JSON bodies, and
//! lets handlers return [`crate::domain::ApiResponse`] directly.

pub mod error;
pub mod schemas;

pub use error::status_for;
