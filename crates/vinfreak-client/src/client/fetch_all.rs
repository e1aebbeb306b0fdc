//! Multi-page fetch loop for any [`PageSource`].

use vinfreak_core::{FilterState, PagingRequest, Vehicle};

use crate::error::ClientError;
use crate::source::PageSource;

/// Maximum number of pages requested by one bulk fetch.
/// Stops runaway loops against a backend whose `total` never settles.
pub const MAX_PAGES: u32 = 1000;

/// Fetches pages 1, 2, 3, ... of `page_size` vehicles and concatenates them.
///
/// The loop ends at the first empty page, at the first page where the
/// accumulated count reaches a non-zero `total`, or after [`MAX_PAGES`]
/// requests. Results are in page order and are not deduplicated; a backend
/// that shifts rows between calls can produce duplicates or gaps.
///
/// # Errors
///
/// Propagates the first error from the source. Vehicles from earlier pages
/// are discarded.
pub async fn fetch_all_pages<S: PageSource>(
    source: &S,
    filters: &FilterState,
    page_size: u32,
) -> Result<Vec<Vehicle>, ClientError> {
    let mut all_vehicles: Vec<Vehicle> = Vec::new();

    for page in 1..=MAX_PAGES {
        let paging = PagingRequest::pages(page, page_size);
        let result = source.fetch_page(filters, &paging).await?;

        if result.items.is_empty() {
            tracing::debug!(page, collected = all_vehicles.len(), "empty page, stopping");
            return Ok(all_vehicles);
        }

        all_vehicles.extend(result.items);

        if result.total > 0 && all_vehicles.len() as u64 >= result.total {
            tracing::debug!(
                page,
                collected = all_vehicles.len(),
                total = result.total,
                "reached reported total, stopping"
            );
            return Ok(all_vehicles);
        }
    }

    tracing::warn!(
        max_pages = MAX_PAGES,
        collected = all_vehicles.len(),
        "page limit reached before listing total; results may be incomplete"
    );
    Ok(all_vehicles)
}
