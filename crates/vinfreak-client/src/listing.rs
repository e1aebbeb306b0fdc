//! Listing session: filter state, accumulated results, paging cursor and
//! load/error status for one "search, then load more" interaction.
//!
//! The controller is sans-IO at its core. A load is started with
//! [`ListingController::begin_reset`] or [`ListingController::begin_load_more`],
//! which hand back a [`LoadTicket`] describing the request to make, and is
//! finished with [`ListingController::complete`]. Every ticket carries a
//! sequence number; only the most recently issued ticket may change the
//! session, so a slow response that lands after a newer load was started is
//! dropped instead of corrupting the list.
//!
//! [`ListingController::mount`], [`ListingController::set_filters`] and
//! [`ListingController::load_more`] run begin, fetch and complete in one call
//! against a [`PageSource`].
//!
//! Error policy: a failed append keeps the vehicles and total already shown;
//! a failed reset leaves the list empty because the previous results belong
//! to different filters. Neither advances the cursor, so the next
//! `load_more` asks for the same page again.

use vinfreak_core::{FilterState, NormalizedPage, PagingRequest, Vehicle, DEFAULT_PAGE_SIZE};

use crate::error::ClientError;
use crate::source::PageSource;

/// Whether a load replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Reset,
    Append,
}

/// Session status as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Outcome of handing a finished load back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was the latest load and has been applied.
    Applied,
    /// A newer load was started after this one; the result was discarded.
    Stale,
}

/// One in-flight load, issued by the controller.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    seq: u64,
    kind: LoadKind,
    filters: FilterState,
    paging: PagingRequest,
}

impl LoadTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// Page number requested, 1-indexed.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.paging.page.unwrap_or(1)
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn paging(&self) -> &PagingRequest {
        &self.paging
    }
}

#[derive(Debug)]
pub struct ListingController {
    filters: FilterState,
    items: Vec<Vehicle>,
    total: u64,
    next_page: u32,
    page_size: u32,
    state: LoadState,
    latest_seq: u64,
}

impl Default for ListingController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingController {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self::with_filters(FilterState::default(), page_size)
    }

    #[must_use]
    pub fn with_filters(filters: FilterState, page_size: u32) -> Self {
        Self {
            filters,
            items: Vec::new(),
            total: 0,
            next_page: 1,
            page_size,
            state: LoadState::Idle,
            latest_seq: 0,
        }
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn items(&self) -> &[Vehicle] {
        &self.items
    }

    /// Last total reported by the server, `0` if unknown.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Page the next `load_more` will request.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `true` while the total is unknown or more vehicles remain on the server.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.total == 0 || (self.items.len() as u64) < self.total
    }

    /// Replaces the filters and starts a reset load of page 1.
    ///
    /// The list is cleared immediately; the new page replaces it on completion.
    pub fn begin_reset(&mut self, filters: FilterState) -> LoadTicket {
        self.filters = filters;
        self.items.clear();
        self.total = 0;
        self.next_page = 1;
        self.issue(LoadKind::Reset, 1)
    }

    /// Starts an append load of the next page under the current filters.
    pub fn begin_load_more(&mut self) -> LoadTicket {
        self.issue(LoadKind::Append, self.next_page)
    }

    /// Applies the result of `ticket`, unless a newer load has been issued.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<NormalizedPage, ClientError>,
    ) -> Completion {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale listing load"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => {
                self.total = page.total;
                match ticket.kind {
                    LoadKind::Reset => self.items = page.items,
                    LoadKind::Append => self.items.extend(page.items),
                }
                self.next_page = ticket.page() + 1;
                self.state = LoadState::Loaded;
                tracing::debug!(
                    shown = self.items.len(),
                    total = self.total,
                    next_page = self.next_page,
                    "listing load applied"
                );
            }
            Err(e) => {
                tracing::warn!(page = ticket.page(), error = %e, "listing load failed");
                self.state = LoadState::Error(e.to_string());
            }
        }
        Completion::Applied
    }

    /// Initial load for the current filters.
    pub async fn mount<S: PageSource>(&mut self, source: &S) -> Completion {
        let ticket = self.begin_reset(self.filters.clone());
        self.run(source, ticket).await
    }

    /// Replaces the filters and reloads from page 1.
    pub async fn set_filters<S: PageSource>(
        &mut self,
        source: &S,
        filters: FilterState,
    ) -> Completion {
        let ticket = self.begin_reset(filters);
        self.run(source, ticket).await
    }

    /// Appends the next page to the list.
    pub async fn load_more<S: PageSource>(&mut self, source: &S) -> Completion {
        let ticket = self.begin_load_more();
        self.run(source, ticket).await
    }

    fn issue(&mut self, kind: LoadKind, page: u32) -> LoadTicket {
        self.latest_seq += 1;
        self.state = LoadState::Loading;
        LoadTicket {
            seq: self.latest_seq,
            kind,
            filters: self.filters.clone(),
            paging: PagingRequest::pages(page, self.page_size),
        }
    }

    async fn run<S: PageSource>(&mut self, source: &S, ticket: LoadTicket) -> Completion {
        let result = source.fetch_page(&ticket.filters, &ticket.paging).await;
        self.complete(ticket, result)
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
