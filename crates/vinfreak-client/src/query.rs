//! Translation of [`FilterState`] + [`PagingRequest`] into `/cars` query parameters.
//!
//! Paging parameters come first, then filters in a fixed order. A filter is
//! emitted only when it is non-empty: `None`, `""` and numeric zero are all
//! skipped, so a literal zero bound (e.g. `price_min = 0`) can never reach the
//! server. Ranges are not validated; `year_min > year_max` is sent as-is.

use vinfreak_core::{FilterState, PagingRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Ordered `(name, value)` pairs for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    /// Value of the first parameter named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: &'static str, value: String) {
        self.0.push((name, value));
    }

    fn push_text(&mut self, name: &'static str, value: Option<&String>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(name, v.clone());
        }
    }

    fn push_number<T>(&mut self, name: &'static str, value: Option<T>, is_zero: impl Fn(&T) -> bool)
    where
        T: ToString,
    {
        if let Some(v) = value.filter(|v| !is_zero(v)) {
            self.push(name, v.to_string());
        }
    }
}

/// Builds the query parameters for one `/cars` request.
#[must_use]
pub fn build_query(filters: &FilterState, paging: &PagingRequest) -> QueryParams {
    let mut params = QueryParams::default();

    if paging.is_window() {
        if let Some(limit) = paging.limit {
            params.push("limit", limit.to_string());
        }
        if let Some(offset) = paging.offset {
            params.push("offset", offset.to_string());
        }
    } else {
        params.push("page", paging.page.unwrap_or(DEFAULT_PAGE).to_string());
        params.push(
            "page_size",
            paging.page_size.unwrap_or(DEFAULT_PAGE_SIZE).to_string(),
        );
    }

    params.push_text("q", filters.q.as_ref());
    params.push_text("vin", filters.vin.as_ref());
    params.push_text("make", filters.make.as_ref());
    params.push_text("model", filters.model.as_ref());
    params.push_number("year_min", filters.year_min, |v| *v == 0);
    params.push_number("year_max", filters.year_max, |v| *v == 0);
    params.push_number("price_min", filters.price_min, rust_decimal::Decimal::is_zero);
    params.push_number("price_max", filters.price_max, rust_decimal::Decimal::is_zero);
    params.push_number("mileage_min", filters.mileage_min, |v| *v == 0);
    params.push_number("mileage_max", filters.mileage_max, |v| *v == 0);
    params.push_text("source", filters.source.as_ref());
    if let Some(sort) = filters.sort {
        params.push("sort", sort.as_str().to_string());
    }

    params
}
