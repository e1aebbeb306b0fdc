//! Display model for one vehicle, shared by every front end.

use rust_decimal::Decimal;
use serde::Serialize;
use vinfreak_core::Vehicle;

/// Placeholder shown when a value is missing.
pub const MISSING: &str = "\u{2014}";

/// Marketplace substring that earns the Cars & Bids marker.
const CARS_AND_BIDS_TAG: &str = "carsandbids";

/// Everything needed to render one result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleCard {
    pub title: String,
    /// `"City, ST"`, or whichever half is present.
    pub location: Option<String>,
    /// `"48,213 mi"`.
    pub mileage: Option<String>,
    /// Formatted price, or [`MISSING`].
    pub price: String,
    pub href: Option<String>,
    pub image: Option<String>,
    pub is_cars_and_bids: bool,
}

impl VehicleCard {
    #[must_use]
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            title: card_title(vehicle),
            location: join_present(&[vehicle.city.as_deref(), vehicle.state.as_deref()], ", "),
            mileage: vehicle.mileage.map(|m| format!("{} mi", group_thousands(&m.to_string()))),
            price: format_money(vehicle.price, vehicle.currency_code()),
            href: non_blank(vehicle.url.as_deref())
                .or_else(|| non_blank(vehicle.link.as_deref()))
                .map(str::to_owned),
            image: primary_image(vehicle),
            is_cars_and_bids: is_cars_and_bids(vehicle.source.as_deref()),
        }
    }
}

/// `title`, else `"{year} {make} {model}"` from whatever is present, else a placeholder.
fn card_title(vehicle: &Vehicle) -> String {
    if let Some(title) = non_blank(vehicle.title.as_deref()) {
        return title.to_owned();
    }
    let year = vehicle.year.filter(|y| *y != 0).map(|y| y.to_string());
    join_present(
        &[
            year.as_deref(),
            vehicle.make.as_deref(),
            vehicle.model.as_deref(),
        ],
        " ",
    )
    .unwrap_or_else(|| "Untitled vehicle".to_string())
}

/// First non-blank entry of `images`, else `image_url`.
fn primary_image(vehicle: &Vehicle) -> Option<String> {
    vehicle
        .images
        .iter()
        .flatten()
        .map(String::as_str)
        .find(|u| !u.trim().is_empty())
        .or_else(|| non_blank(vehicle.image_url.as_deref()))
        .map(str::to_owned)
}

#[must_use]
pub fn is_cars_and_bids(source: Option<&str>) -> bool {
    source.is_some_and(|s| s.to_lowercase().contains(CARS_AND_BIDS_TAG))
}

/// Formats `amount` in `currency`, e.g. `"$13,500.00"` or `"CHF 900.00"`.
///
/// Returns [`MISSING`] when there is no amount.
#[must_use]
pub fn format_money(amount: Option<Decimal>, currency: &str) -> String {
    let Some(amount) = amount else {
        return MISSING.to_string();
    };
    let code = currency.trim().to_uppercase();
    let (prefix, decimals) = match code.as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("\u{20ac}".to_string(), 2),
        "GBP" => ("\u{a3}".to_string(), 2),
        "CAD" => ("CA$".to_string(), 2),
        "AUD" => ("A$".to_string(), 2),
        "JPY" => ("\u{a5}".to_string(), 0),
        _ => (format!("{code} "), 2),
    };

    let mut rounded = amount.abs().round_dp(decimals);
    rounded.rescale(decimals);
    let fixed = rounded.to_string();
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let grouped = group_thousands(whole);
    match fraction {
        Some(f) => format!("{sign}{prefix}{grouped}.{f}"),
        None => format!("{sign}{prefix}{grouped}"),
    }
}

/// Inserts `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn join_present(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let present: Vec<&str> = parts.iter().filter_map(|p| non_blank(*p)).collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(sep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vehicle {
        Vehicle {
            year: Some(2015),
            make: Some("Honda".to_string()),
            model: Some("Civic".to_string()),
            ..Vehicle::default()
        }
    }

    #[test]
    fn title_prefers_explicit_title() {
        let vehicle = Vehicle {
            title: Some("2015 Honda Civic Si".to_string()),
            ..base()
        };
        assert_eq!(VehicleCard::from_vehicle(&vehicle).title, "2015 Honda Civic Si");
    }

    #[test]
    fn title_falls_back_to_year_make_model() {
        assert_eq!(VehicleCard::from_vehicle(&base()).title, "2015 Honda Civic");
    }

    #[test]
    fn title_skips_missing_parts() {
        let vehicle = Vehicle {
            year: None,
            ..base()
        };
        assert_eq!(VehicleCard::from_vehicle(&vehicle).title, "Honda Civic");
    }

    #[test]
    fn title_placeholder_when_nothing_known() {
        assert_eq!(
            VehicleCard::from_vehicle(&Vehicle::default()).title,
            "Untitled vehicle"
        );
    }

    #[test]
    fn location_joins_city_and_state() {
        let vehicle = Vehicle {
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&vehicle).location.as_deref(),
            Some("Austin, TX")
        );

        let state_only = Vehicle {
            state: Some("TX".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&state_only).location.as_deref(),
            Some("TX")
        );
        assert!(VehicleCard::from_vehicle(&base()).location.is_none());
    }

    #[test]
    fn mileage_is_grouped() {
        let vehicle = Vehicle {
            mileage: Some(148_213),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&vehicle).mileage.as_deref(),
            Some("148,213 mi")
        );
        assert!(VehicleCard::from_vehicle(&base()).mileage.is_none());
    }

    #[test]
    fn money_formats_known_currencies() {
        assert_eq!(format_money(Some(Decimal::new(13_500, 0)), "USD"), "$13,500.00");
        assert_eq!(format_money(Some(Decimal::new(99_995, 1)), "eur"), "\u{20ac}9,999.50");
        assert_eq!(format_money(Some(Decimal::new(1_234_567, 0)), "JPY"), "\u{a5}1,234,567");
        assert_eq!(format_money(Some(Decimal::new(900, 0)), "CHF"), "CHF 900.00");
        assert_eq!(format_money(Some(Decimal::new(-1_500, 0)), "USD"), "-$1,500.00");
    }

    #[test]
    fn money_missing_amount_is_placeholder() {
        assert_eq!(format_money(None, "USD"), MISSING);
    }

    #[test]
    fn price_defaults_to_usd() {
        let vehicle = Vehicle {
            price: Some(Decimal::new(42_000, 0)),
            ..base()
        };
        assert_eq!(VehicleCard::from_vehicle(&vehicle).price, "$42,000.00");
    }

    #[test]
    fn href_prefers_url_over_link() {
        let vehicle = Vehicle {
            url: Some("https://a.example/1".to_string()),
            link: Some("https://b.example/1".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&vehicle).href.as_deref(),
            Some("https://a.example/1")
        );

        let link_only = Vehicle {
            link: Some("https://b.example/1".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&link_only).href.as_deref(),
            Some("https://b.example/1")
        );
    }

    #[test]
    fn image_prefers_gallery_then_image_url() {
        let vehicle = Vehicle {
            images: Some(vec![" ".to_string(), "https://img/2.jpg".to_string()]),
            image_url: Some("https://img/cover.jpg".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&vehicle).image.as_deref(),
            Some("https://img/2.jpg")
        );

        let cover_only = Vehicle {
            image_url: Some("https://img/cover.jpg".to_string()),
            ..base()
        };
        assert_eq!(
            VehicleCard::from_vehicle(&cover_only).image.as_deref(),
            Some("https://img/cover.jpg")
        );
    }

    #[test]
    fn cars_and_bids_marker_is_case_insensitive() {
        assert!(is_cars_and_bids(Some("CarsAndBids")));
        assert!(is_cars_and_bids(Some("scraper:carsandbids.com")));
        assert!(!is_cars_and_bids(Some("bringatrailer")));
        assert!(!is_cars_and_bids(None));
    }
}
