use std::future::Future;

use vinfreak_core::{FilterState, NormalizedPage, PagingRequest};

use crate::error::ClientError;

/// Anything that can answer one listing-page request.
///
/// [`crate::CarsClient`] is the production implementation; the bulk fetch
/// loop and the listing session only depend on this trait.
pub trait PageSource {
    fn fetch_page(
        &self,
        filters: &FilterState,
        paging: &PagingRequest,
    ) -> impl Future<Output = Result<NormalizedPage, ClientError>> + Send;
}
