//! HTTP client for the VINFREAK `/cars` listing API.

mod fetch_all;
mod origin;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use vinfreak_core::{AppConfig, FilterState, NormalizedPage, PagingRequest, Vehicle};

use crate::error::ClientError;
use crate::normalize::normalize_page;
use crate::query::build_query;
use crate::source::PageSource;

pub use fetch_all::{fetch_all_pages, MAX_PAGES};

/// Client for the listing API.
///
/// Every call issues exactly one GET; nothing is cached and nothing is
/// retried. Non-2xx answers become [`ClientError::Status`], a request that
/// outlives the configured timeout becomes [`ClientError::Timeout`], and a
/// body that is not JSON becomes [`ClientError::Parse`].
pub struct CarsClient {
    client: Client,
    base_url: Url,
}

impl CarsClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// `http(s)` URL with a host, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let base_url = origin::parse_api_base(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`CarsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one page of vehicles matching `filters`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Status`] — any non-2xx status.
    /// - [`ClientError::Timeout`] / [`ClientError::Http`] — transport failure.
    /// - [`ClientError::Parse`] — body is not valid JSON.
    pub async fn fetch_page(
        &self,
        filters: &FilterState,
        paging: &PagingRequest,
    ) -> Result<NormalizedPage, ClientError> {
        let url = self.cars_url(filters, paging);
        tracing::debug!(url = %url, "fetching listing page");

        let body = self.get_json(&url).await?;
        let page = normalize_page(body, paging);

        tracing::debug!(
            items = page.items.len(),
            total = page.total,
            page = page.page,
            page_size = page.page_size,
            "listing page fetched"
        );
        Ok(page)
    }

    /// Fetches every page of vehicles matching `filters`, `page_size` at a time.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::fetch_page`]; vehicles from
    /// earlier pages are discarded.
    pub async fn fetch_all(
        &self,
        filters: &FilterState,
        page_size: u32,
    ) -> Result<Vec<Vehicle>, ClientError> {
        fetch_all_pages(self, filters, page_size).await
    }

    /// Fetches one vehicle by its record id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] on 404, otherwise the same errors as
    /// [`Self::fetch_page`].
    pub async fn get_car(&self, id: &str) -> Result<Vehicle, ClientError> {
        let url = origin::endpoint_url(&self.base_url, &["cars", id]);
        self.get_vehicle(url).await
    }

    /// Fetches one vehicle by VIN.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] on 404, otherwise the same errors as
    /// [`Self::fetch_page`].
    pub async fn get_car_by_vin(&self, vin: &str) -> Result<Vehicle, ClientError> {
        let url = origin::endpoint_url(&self.base_url, &["cars", "by_vin", vin]);
        self.get_vehicle(url).await
    }

    /// Calls `GET /health` and returns the reported status string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if the body is not `{"status": "..."}`,
    /// otherwise the same errors as [`Self::fetch_page`].
    pub async fn health(&self) -> Result<String, ClientError> {
        #[derive(Deserialize)]
        struct Health {
            status: String,
        }

        let url = origin::endpoint_url(&self.base_url, &["health"]);
        let body = self.get_json(&url).await?;
        let health: Health =
            serde_json::from_value(body).map_err(|e| ClientError::Parse {
                context: format!("GET {url}"),
                source: e,
            })?;
        Ok(health.status)
    }

    /// Builds the `/cars` URL with the query for `filters` and `paging`.
    fn cars_url(&self, filters: &FilterState, paging: &PagingRequest) -> Url {
        let mut url = origin::endpoint_url(&self.base_url, &["cars"]);
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in build_query(filters, paging).iter() {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    async fn get_vehicle(&self, url: Url) -> Result<Vehicle, ClientError> {
        match self.get_json(&url).await {
            Ok(body) => Ok(Vehicle::from_value(body)),
            Err(ClientError::Status { status: 404, url }) => Err(ClientError::NotFound { url }),
            Err(e) => Err(e),
        }
    }

    /// Sends a GET, asserts a 2xx status, and parses the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "listing API returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| transport_error(e, url))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse {
            context: format!("GET {url}"),
            source: e,
        })
    }
}

impl PageSource for CarsClient {
    async fn fetch_page(
        &self,
        filters: &FilterState,
        paging: &PagingRequest,
    ) -> Result<NormalizedPage, ClientError> {
        CarsClient::fetch_page(self, filters, paging).await
    }
}

fn transport_error(err: reqwest::Error, url: &Url) -> ClientError {
    if err.is_timeout() {
        tracing::warn!(url = %url, "listing API request timed out");
        return ClientError::Timeout {
            url: url.to_string(),
        };
    }
    ClientError::Http(err)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
