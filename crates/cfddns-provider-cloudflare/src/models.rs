//! Cloudflare API v4 response envelope

use serde::Deserialize;

/// One entry of the envelope's `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

/// Standard response envelope shared by every v4 endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    pub result: Option<T>,
    pub result_info: Option<ResultInfo>,
}

/// Pagination details for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u32,
}

impl ResultInfo {
    /// Whether pages after `page` remain to be fetched
    pub fn has_more(&self, page: u32) -> bool {
        if self.total_pages > 0 {
            page < self.total_pages
        } else {
            u64::from(page) * u64::from(self.per_page) < u64::from(self.total_count)
        }
    }
}

/// A zone, as returned by `GET /zones`
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// Render the envelope's errors as `code: message; code: message`
pub fn describe_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
