//! Pagination types shared across all list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination parameters.
///
/// - `page`: ≥ 1, default 1
/// - `limit`: 1–40, default 30
///
/// Out-of-range values are rejected, not clamped; callers see a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    30
}

/// Highest accepted `limit`.
pub const MAX_LIMIT: u32 = 40;

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Rejected pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Max limit exceeded")]
    LimitTooLarge,
    #[error("Invalid pagination")]
    Invalid,
}

impl PageRequest {
    /// Enforce bounds after deserializing from query params.
    pub fn validated(self) -> Result<Self, PageError> {
        if self.limit > MAX_LIMIT {
            return Err(PageError::LimitTooLarge);
        }
        if self.limit == 0 || self.page == 0 {
            return Err(PageError::Invalid);
        }
        Ok(self)
    }

    /// Row offset of the first item on this page.
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Page metadata returned next to every list payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl PageInfo {
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}
