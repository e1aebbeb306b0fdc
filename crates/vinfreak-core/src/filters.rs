//! Search filters for the `/cars` listing endpoint.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Result ordering accepted by the `/cars` endpoint's `sort` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    YearAsc,
    YearDesc,
    MileageAsc,
    MileageDesc,
}

impl SortOrder {
    /// Wire value sent as the `sort` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::YearAsc => "year_asc",
            SortOrder::YearDesc => "year_desc",
            SortOrder::MileageAsc => "mileage_asc",
            SortOrder::MileageDesc => "mileage_desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(SortOrder::PriceAsc),
            "price_desc" => Ok(SortOrder::PriceDesc),
            "year_asc" => Ok(SortOrder::YearAsc),
            "year_desc" => Ok(SortOrder::YearDesc),
            "mileage_asc" => Ok(SortOrder::MileageAsc),
            "mileage_desc" => Ok(SortOrder::MileageDesc),
            other => Err(CoreError::InvalidSort(other.to_string())),
        }
    }
}

/// The user's current search constraints.
///
/// Every field is optional; `None` means "no constraint". A session replaces
/// the whole value on edit rather than mutating it in place.
///
/// Empty strings and numeric zero are treated the same as `None` when the
/// query string is built, so `year_min = Some(0)` cannot be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text query.
    pub q: Option<String>,
    pub vin: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub mileage_min: Option<u64>,
    pub mileage_max: Option<u64>,
    /// Marketplace tag, e.g. `"carsandbids"`.
    pub source: Option<String>,
    pub sort: Option<SortOrder>,
}

impl FilterState {
    /// Returns `true` when no field would contribute a query parameter.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().is_none_or(str::is_empty);
        blank(&self.q)
            && blank(&self.vin)
            && blank(&self.make)
            && blank(&self.model)
            && blank(&self.source)
            && self.year_min.is_none_or(|v| v == 0)
            && self.year_max.is_none_or(|v| v == 0)
            && self.price_min.is_none_or(|v| v.is_zero())
            && self.price_max.is_none_or(|v| v.is_zero())
            && self.mileage_min.is_none_or(|v| v == 0)
            && self.mileage_max.is_none_or(|v| v == 0)
            && self.sort.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_round_trips_through_wire_value() {
        for order in [
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
            SortOrder::YearAsc,
            SortOrder::YearDesc,
            SortOrder::MileageAsc,
            SortOrder::MileageDesc,
        ] {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
    }

    #[test]
    fn sort_order_rejects_unknown_value() {
        let err = "cheapest".parse::<SortOrder>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSort(ref s) if s == "cheapest"));
    }

    #[test]
    fn default_filters_are_unconstrained() {
        assert!(FilterState::default().is_unconstrained());
    }

    #[test]
    fn empty_and_zero_values_count_as_unconstrained() {
        let filters = FilterState {
            make: Some(String::new()),
            year_min: Some(0),
            price_max: Some(Decimal::ZERO),
            ..FilterState::default()
        };
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn make_filter_is_a_constraint() {
        let filters = FilterState {
            make: Some("Honda".to_string()),
            ..FilterState::default()
        };
        assert!(!filters.is_unconstrained());
    }
}
