//! Normalization of `/cars` responses into [`NormalizedPage`].
//!
//! The endpoint has answered with two shapes over its lifetime:
//!
//! ```text
//! [ {vehicle}, {vehicle}, ... ]
//! { "items": [...], "total": 50, "page": 1, "page_size": 24 }
//! ```
//!
//! Anything else (a string, a number, `null`) is treated as an envelope with
//! no `items` and no `total`, which yields an empty page instead of an error.

use serde_json::Value;
use vinfreak_core::{NormalizedPage, PagingRequest, Vehicle};

/// Normalizes a parsed response body for the request described by `paging`.
#[must_use]
pub fn normalize_page(raw: Value, paging: &PagingRequest) -> NormalizedPage {
    match raw {
        Value::Array(records) => {
            let items: Vec<Vehicle> = records.into_iter().map(Vehicle::from_value).collect();
            let len = items.len();
            NormalizedPage {
                total: len as u64,
                page: paging.page.unwrap_or(1),
                page_size: paging.page_size.unwrap_or_else(|| saturating_u32(len)),
                items,
            }
        }
        Value::Object(mut envelope) => {
            let items: Vec<Vehicle> = match envelope.remove("items") {
                Some(Value::Array(records)) => {
                    records.into_iter().map(Vehicle::from_value).collect()
                }
                _ => Vec::new(),
            };
            let len = items.len();
            let total = envelope
                .get("total")
                .and_then(count_value)
                .unwrap_or(len as u64);
            let page = envelope
                .get("page")
                .and_then(u32_value)
                .or(paging.page)
                .unwrap_or(1);
            let page_size = envelope
                .get("page_size")
                .and_then(u32_value)
                .or(paging.page_size)
                .unwrap_or_else(|| saturating_u32(len));
            NormalizedPage {
                items,
                total,
                page,
                page_size,
            }
        }
        other => {
            tracing::debug!(body = %other, "unrecognized /cars response shape, treating as empty page");
            NormalizedPage {
                items: Vec::new(),
                total: 0,
                page: paging.page.unwrap_or(1),
                page_size: paging.page_size.unwrap_or(0),
            }
        }
    }
}

/// Reads a non-negative count. Whole floats (`50.0`) are accepted.
fn count_value(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = f as u64;
                n
            })
    })
}

fn u32_value(value: &Value) -> Option<u32> {
    count_value(value).and_then(|n| u32::try_from(n).ok())
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vehicles(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| json!({"id": i, "make": "Honda", "model": "Civic"}))
                .collect(),
        )
    }

    #[test]
    fn bare_array_uses_caller_paging() {
        let page = normalize_page(vehicles(5), &PagingRequest::pages(1, 24));
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 24);
    }

    #[test]
    fn bare_array_without_paging_falls_back_to_length() {
        let page = normalize_page(vehicles(7), &PagingRequest::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 7);
    }

    #[test]
    fn envelope_total_and_caller_page_size() {
        let raw = json!({"items": vehicles(3), "total": 50});
        let page = normalize_page(raw, &PagingRequest::pages(1, 24));
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 50);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 24);
    }

    #[test]
    fn envelope_echoed_paging_wins_over_caller() {
        let raw = json!({"items": vehicles(2), "total": 12, "page": 4, "page_size": 20});
        let page = normalize_page(raw, &PagingRequest::pages(1, 24));
        assert_eq!(page.page, 4);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn envelope_without_total_counts_items() {
        let raw = json!({"items": vehicles(4)});
        let page = normalize_page(raw, &PagingRequest::default());
        assert_eq!(page.total, 4);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 4);
    }

    #[test]
    fn non_numeric_total_counts_items() {
        let raw = json!({"items": vehicles(2), "total": "lots"});
        assert_eq!(normalize_page(raw, &PagingRequest::default()).total, 2);
    }

    #[test]
    fn whole_float_total_is_accepted() {
        let raw = json!({"items": vehicles(1), "total": 30.0});
        assert_eq!(normalize_page(raw, &PagingRequest::default()).total, 30);
    }

    #[test]
    fn negative_total_counts_items() {
        let raw = json!({"items": vehicles(3), "total": -1});
        assert_eq!(normalize_page(raw, &PagingRequest::default()).total, 3);
    }

    #[test]
    fn non_array_items_yield_empty_page() {
        let raw = json!({"items": {"0": {"make": "Ford"}}, "total": 9});
        let page = normalize_page(raw, &PagingRequest::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 9);
    }

    #[test]
    fn scalar_and_null_bodies_yield_empty_page() {
        for raw in [json!("maintenance"), json!(42), json!(true), Value::Null] {
            let page = normalize_page(raw, &PagingRequest::pages(2, 24));
            assert!(page.items.is_empty());
            assert_eq!(page.total, 0);
            assert_eq!(page.page, 2);
        }
    }

    #[test]
    fn non_object_array_entries_keep_the_count() {
        let raw = json!([{"make": "Audi"}, "garbage", null]);
        let page = normalize_page(raw, &PagingRequest::default());
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.items[0].make.as_deref(), Some("Audi"));
        assert_eq!(page.items[1], Vehicle::default());
    }

    #[test]
    fn renormalizing_an_envelope_keeps_items_and_total() {
        let raw = json!({
            "items": [
                {"id": 1, "make": "Honda", "price": 13500, "drivetrain": "FWD"},
                {"id": "x-2", "make": "Mazda", "year": 2019, "posted_at": "2024-05-01T12:30:00"}
            ],
            "total": 80
        });
        let first = normalize_page(raw, &PagingRequest::pages(1, 24));
        let rewrapped = first.to_envelope().unwrap();
        let second = normalize_page(rewrapped, &PagingRequest::default());

        assert_eq!(second.items, first.items);
        assert_eq!(second.total, first.total);
        assert_eq!(second.page, first.page);
        assert_eq!(second.page_size, first.page_size);
    }
}
