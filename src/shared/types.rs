use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::FieldErrors;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Response envelope used by every JSON endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<PaginationMeta>,
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            pagination: None,
            errors: None,
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: Some(pagination),
            errors: None,
        }
    }

    /// Failure that still carries a usable (default) payload
    pub fn degraded(data: T, message: String) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message),
            pagination: None,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<FieldErrors>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            pagination: None,
            errors,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata returned alongside list data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    /// `pages` is `ceil(total / limit)` over the filtered, pre-pagination total
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let total = total.max(0);
        Self {
            page: page.max(1),
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

/// `page` / `limit` query parameters shared by every list endpoint
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page", deserialize_with = "lenient_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_limit", deserialize_with = "lenient_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// SQL OFFSET for the current page
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta::new(self.page, self.limit(), total)
    }
}

// =============================================================================
// REFERENCE DATA LISTING
// =============================================================================

/// Query parameters for reference data lists (departments, courses, years)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReferenceListQuery {
    /// `true` shows the archive instead of live records
    #[serde(default, deserialize_with = "empty_as_none")]
    pub archived: Option<bool>,

    /// Case-insensitive match on name or code
    #[serde(default)]
    pub search: Option<String>,
}

impl ReferenceListQuery {
    pub fn archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }
}

// =============================================================================
// QUERY STRING HELPERS
// =============================================================================

/// Treat `?field=` as absent. Frontends send empty selects as empty strings.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Number that falls back to `default` when the parameter is present but empty
fn lenient_i64_or<'de, D>(deserializer: D, default: fn() -> i64) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_as_none::<D, i64>(deserializer)?.unwrap_or_else(default))
}

fn lenient_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_i64_or(deserializer, default_page)
}

fn lenient_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_i64_or(deserializer, default_limit)
}
