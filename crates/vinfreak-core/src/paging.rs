//! Paging descriptors for listing requests.

use serde::{Deserialize, Serialize};

/// Page number sent when the caller does not choose one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size sent when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// How much of the result set one request asks for.
///
/// Either page mode (`page` + `page_size`, 1-indexed) or window mode
/// (`limit` + `offset`). When `limit` or `offset` is set the request is in
/// window mode and `page`/`page_size` are ignored by the query builder; the
/// normalizer still uses them as fallbacks for the echoed page fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PagingRequest {
    /// Page-mode request for `page` (1-indexed) of `page_size` items.
    #[must_use]
    pub fn pages(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    /// Window-mode request. Either bound may be omitted.
    #[must_use]
    pub fn window(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Returns `true` when `limit` or `offset` is present.
    #[must_use]
    pub fn is_window(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}
