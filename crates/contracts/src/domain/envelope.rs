//! Success/failure and pagination envelopes wrapping every API response.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::ApiError;

/// Malformed response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiResponseShapeError {
    /// `success: true` without `data`.
    #[error("successful response is missing `data`")]
    MissingData,
    /// `success: false` without `error`.
    #[error("failed response is missing `error`")]
    MissingError,
    /// The envelope carries members of both variants.
    #[error("response must not carry both `data` and `error`")]
    Ambiguous,
}

/// Response body returned by every endpoint.
///
/// Serialised as `{ "success": true, "data": .. }` or
/// `{ "success": false, "error": .. }`.
///
/// # Examples
/// ```
/// use sitegen_contracts::domain::{ApiError, ApiResponse};
/// use serde_json::json;
///
/// let ok = ApiResponse::success(7);
/// assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "success": true, "data": 7 }));
///
/// let failed: ApiResponse<u32> = ApiResponse::failure(ApiError::not_found("gone"));
/// assert!(failed.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "ApiResponseDto<T>",
    into = "ApiResponseDto<T>",
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: Deserialize<'de>"
    )
)]
pub enum ApiResponse<T> {
    /// The request succeeded.
    Success {
        /// Response payload.
        data: T,
        /// Pagination metadata for list endpoints.
        meta: Option<PageMeta>,
    },
    /// The request failed.
    Failure(ApiError),
}

impl<T> ApiResponse<T> {
    /// Successful response without metadata.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self::Success { data, meta: None }
    }

    /// Successful list response with pagination metadata.
    #[must_use]
    pub fn page(data: T, meta: PageMeta) -> Self {
        Self::Success {
            data,
            meta: Some(meta),
        }
    }

    /// Failed response.
    #[must_use]
    pub fn failure(error: ApiError) -> Self {
        Self::Failure(error)
    }

    /// Whether the response reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The error of a failed response.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a `Result`, dropping any metadata.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(value: Result<T, ApiError>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiResponseDto<T> {
    success: bool,
    // `None` means the key is absent; `"data": null` decodes as `Some`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<PageMeta>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<T> From<ApiResponse<T>> for ApiResponseDto<T> {
    fn from(value: ApiResponse<T>) -> Self {
        match value {
            ApiResponse::Success { data, meta } => Self {
                success: true,
                data: Some(data),
                error: None,
                meta,
            },
            ApiResponse::Failure(error) => Self {
                success: false,
                data: None,
                error: Some(error),
                meta: None,
            },
        }
    }
}

impl<T> TryFrom<ApiResponseDto<T>> for ApiResponse<T> {
    type Error = ApiResponseShapeError;

    fn try_from(value: ApiResponseDto<T>) -> Result<Self, Self::Error> {
        let ApiResponseDto {
            success,
            data,
            error,
            meta,
        } = value;

        match (success, data, error) {
            (_, Some(_), Some(_)) => Err(ApiResponseShapeError::Ambiguous),
            (true, Some(data), None) => Ok(Self::Success { data, meta }),
            (true, None, _) => Err(ApiResponseShapeError::MissingData),
            (false, None, Some(error)) if meta.is_none() => Ok(Self::Failure(error)),
            (false, _, Some(_)) => Err(ApiResponseShapeError::Ambiguous),
            (false, _, None) => Err(ApiResponseShapeError::MissingError),
        }
    }
}

/// Pagination metadata validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageMetaError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page holds at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Position of a page within a listing.
///
/// ## Invariants
/// - `page >= 1` and `page_size >= 1`.
/// - `total_pages == ceil(total_items / page_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PageMetaDto", into = "PageMetaDto")]
pub struct PageMeta {
    page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u32,
}

impl PageMeta {
    /// Derive pagination metadata from the request and the item count.
    ///
    /// # Examples
    /// ```
    /// use sitegen_contracts::domain::PageMeta;
    ///
    /// let meta = PageMeta::new(2, 10, 25).unwrap();
    /// assert_eq!(meta.total_pages(), 3);
    /// assert!(meta.has_next_page());
    /// ```
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Result<Self, PageMetaError> {
        if page == 0 {
            return Err(PageMetaError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageMetaError::ZeroPageSize);
        }
        let total_pages =
            u32::try_from(total_items.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
        Ok(Self {
            page,
            page_size,
            total_items,
            total_pages,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct PageMetaDto {
    page: u32,
    page_size: u32,
    total_items: u64,
    // Derived; accepted on input but recomputed.
    #[serde(default)]
    total_pages: u32,
}

impl From<PageMeta> for PageMetaDto {
    fn from(value: PageMeta) -> Self {
        Self {
            page: value.page,
            page_size: value.page_size,
            total_items: value.total_items,
            total_pages: value.total_pages,
        }
    }
}

impl TryFrom<PageMetaDto> for PageMeta {
    type Error = PageMetaError;

    fn try_from(value: PageMetaDto) -> Result<Self, Self::Error> {
        Self::new(value.page, value.page_size, value.total_items)
    }
}

/// A page of items plus its position in the full listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Paginated<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page metadata.
    pub page: PageMeta,
}
