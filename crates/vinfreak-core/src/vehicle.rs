//! Loosely-typed vehicle records returned by the listing API.
//!
//! ## Observed shape
//!
//! The backend serializes every column it has, most of them nullable, and
//! older deployments omit whole groups of fields. Scraped sources also leak
//! odd types: `year` as a string, `mileage` as `null`, `images` missing while
//! `image_url` is set. Nothing here is required. Numeric strings are read as
//! numbers, timestamps may carry an offset, and any other value whose JSON
//! type does not match is read as absent instead of rejecting the record.
//!
//! `price` is written back as a JSON number, never as a string.
//!
//! Fields the client does not model are kept in [`Vehicle::extra`] so a
//! record can be re-serialized without losing data.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Record identifier. The API uses integers; imported data sometimes uses strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleId::Int(id) => write!(f, "{id}"),
            VehicleId::Text(id) => f.write_str(id),
        }
    }
}

/// One vehicle listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<VehicleId>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient",
        serialize_with = "price_as_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    /// ISO 4217 code. Display code falls back to `"USD"` when absent.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Marketplace tag, e.g. `"carsandbids"`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Alternate listing link used by some sources instead of `url`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub auction_status: Option<String>,
    /// Naive UTC timestamp as the backend writes it (`"2024-05-01T12:30:00.123456"`).
    /// RFC 3339 input with an offset is converted to UTC.
    #[serde(default, deserialize_with = "lenient_timestamp", skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Vehicle {
    /// Builds a vehicle from an arbitrary JSON value.
    ///
    /// Objects are read field by field; anything else (a stray string or
    /// number inside an item array) becomes an empty record so the caller's
    /// item count still matches the array length.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::debug!(kind = json_kind(&value), "non-object vehicle record, using empty record");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "unreadable vehicle record, using empty record");
            Self::default()
        })
    }

    /// Display currency, defaulting to `"USD"`.
    #[must_use]
    pub fn currency_code(&self) -> &str {
        self.currency
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("USD")
    }
}

/// Reads an optional field, mapping a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like [`lenient`], but also parses numeric strings such as `"2015"`.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromStr,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => s.trim().parse().ok(),
        other => serde_json::from_value(other).ok(),
    }))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(raw)) = value else {
        return Ok(None);
    };
    Ok(parse_timestamp(raw.trim()))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// Integral prices are written as integers, anything else as a float.
#[allow(clippy::ref_option)]
fn price_as_number<S>(price: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let Some(price) = price else {
        return serializer.serialize_none();
    };
    if price.fract().is_zero() {
        if let Some(whole) = price.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match price.to_f64() {
        Some(float) => serializer.serialize_f64(float),
        None => serializer.serialize_none(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_typical_backend_record() {
        let vehicle = Vehicle::from_value(json!({
            "id": 42,
            "vin": "1HGCM82633A004352",
            "year": 2015,
            "make": "Honda",
            "model": "Civic",
            "mileage": 48213,
            "price": 13500,
            "currency": "USD",
            "city": "Austin",
            "state": "TX",
            "source": "carsandbids",
            "url": "https://carsandbids.com/auctions/abc",
            "images": ["https://img/1.jpg"],
            "posted_at": "2024-05-01T12:30:00.123456"
        }));

        assert_eq!(vehicle.id, Some(VehicleId::Int(42)));
        assert_eq!(vehicle.year, Some(2015));
        assert_eq!(vehicle.make.as_deref(), Some("Honda"));
        assert_eq!(vehicle.mileage, Some(48_213));
        assert_eq!(vehicle.price, Some(Decimal::from(13_500)));
        assert_eq!(vehicle.images.as_deref().map(<[String]>::len), Some(1));
        assert!(vehicle.posted_at.is_some());
        assert!(vehicle.extra.is_empty());
    }

    #[test]
    fn mismatched_types_become_absent() {
        let vehicle = Vehicle::from_value(json!({
            "year": "twenty fifteen",
            "mileage": null,
            "price": {"amount": 1},
            "make": "Mazda"
        }));

        assert!(vehicle.year.is_none());
        assert!(vehicle.mileage.is_none());
        assert!(vehicle.price.is_none());
        assert_eq!(vehicle.make.as_deref(), Some("Mazda"));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let vehicle = Vehicle::from_value(json!({"year": "2015", "mileage": " 48213 "}));
        assert_eq!(vehicle.year, Some(2015));
        assert_eq!(vehicle.mileage, Some(48_213));
    }

    #[test]
    fn offset_timestamps_are_read_as_utc() {
        let vehicle = Vehicle::from_value(json!({"posted_at": "2024-05-01T14:30:00+02:00"}));
        let expected = NaiveDateTime::parse_from_str("2024-05-01 12:30:00", "%Y-%m-%d %H:%M:%S")
            .expect("valid timestamp");
        assert_eq!(vehicle.posted_at, Some(expected));

        let spaced = Vehicle::from_value(json!({"posted_at": "2024-05-01 12:30:00"}));
        assert_eq!(spaced.posted_at, Some(expected));
    }

    #[test]
    fn price_serializes_as_json_number() {
        let whole = Vehicle::from_value(json!({"price": 13500}));
        let out = serde_json::to_value(&whole).unwrap();
        assert!(out["price"].is_number());
        assert_eq!(out["price"], json!(13500));

        let cents = Vehicle::from_value(json!({"price": 9999.5}));
        assert_eq!(serde_json::to_value(&cents).unwrap()["price"], json!(9999.5));
    }

    #[test]
    fn backend_record_survives_reserialization() {
        let raw = json!({
            "id": 7,
            "price": 13500,
            "year": 2015,
            "posted_at": "2024-05-01T12:30:00.123456",
            "drivetrain": "AWD"
        });
        let back = serde_json::to_value(Vehicle::from_value(raw.clone())).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn string_ids_are_accepted() {
        let vehicle = Vehicle::from_value(json!({"id": "cab-981"}));
        assert_eq!(vehicle.id, Some(VehicleId::Text("cab-981".to_string())));
        assert_eq!(vehicle.id.unwrap().to_string(), "cab-981");
    }

    #[test]
    fn unknown_fields_are_kept() {
        let vehicle = Vehicle::from_value(json!({"make": "BMW", "drivetrain": "RWD"}));
        assert_eq!(vehicle.extra.get("drivetrain"), Some(&json!("RWD")));

        let back = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(back["drivetrain"], json!("RWD"));
        assert_eq!(back["make"], json!("BMW"));
        assert!(back.get("year").is_none());
    }

    #[test]
    fn non_object_becomes_empty_record() {
        assert_eq!(Vehicle::from_value(json!("oops")), Vehicle::default());
        assert_eq!(Vehicle::from_value(Value::Null), Vehicle::default());
    }

    #[test]
    fn currency_code_defaults_to_usd() {
        assert_eq!(Vehicle::default().currency_code(), "USD");
        let vehicle = Vehicle {
            currency: Some("EUR".to_string()),
            ..Vehicle::default()
        };
        assert_eq!(vehicle.currency_code(), "EUR");
    }
}
