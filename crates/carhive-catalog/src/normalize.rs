//! Normalization from raw catalog records to [`carhive_core::Vehicle`].
//!
//! Records stay [`serde_json::Value`] on the wire (see [`crate::types`] for
//! why no single serde struct fits every vintage of the API). This module
//! folds one raw record into the canonical form: field-name drift is
//! reconciled, image URLs are repaired to absolute form, and missing fields
//! surface as empty values. Normalization never fails.

use carhive_core::Vehicle;
use serde_json::Value;

/// Asset host for relative image paths and the placeholder.
const ASSET_BASE_URL: &str = "https://car-rental-api.goit.global";

/// Image used when a record carries no usable image field.
const PLACEHOLDER_IMAGE: &str = "placeholder-car.jpg";

/// Folds a raw catalog record into a canonical [`Vehicle`].
///
/// Lenient by contract: a missing or mistyped field becomes an empty string,
/// empty list, or zero rather than an error. The manufacturer comes from
/// `make`, falling back to the alternate `brand` field older responses use.
#[must_use]
pub fn normalize_record(raw: &Value) -> Vehicle {
    let make = {
        let make = string_field(raw, "make");
        if make.is_empty() {
            string_field(raw, "brand")
        } else {
            make
        }
    };

    Vehicle {
        id: string_field(raw, "id"),
        make,
        model: string_field(raw, "model"),
        year: int_field(raw, "year"),
        body_type: string_field(raw, "type"),
        img: resolve_image(non_empty_str(raw, "img")),
        description: string_field(raw, "description"),
        fuel_consumption: string_field(raw, "fuelConsumption"),
        engine_size: string_field(raw, "engineSize"),
        accessories: string_list_field(raw, "accessories"),
        functionalities: string_list_field(raw, "functionalities"),
        rental_price: string_field(raw, "rentalPrice"),
        rental_company: string_field(raw, "rentalCompany"),
        address: string_field(raw, "address"),
        rental_conditions: conditions_field(raw, "rentalConditions"),
        mileage: mileage_field(raw, "mileage"),
    }
}

/// Repairs an image reference to an absolute URL.
///
/// Precedence: an already absolute `http(s)` URL is kept as-is; a
/// scheme-relative `//host/...` reference gains `https:`; anything else is
/// treated as a path under the asset host. `None` (no usable image field)
/// yields the placeholder.
fn resolve_image(raw: Option<&str>) -> String {
    match raw {
        None => format!("{ASSET_BASE_URL}/{PLACEHOLDER_IMAGE}"),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_owned(),
        Some(url) if url.starts_with("//") => format!("https:{url}"),
        Some(path) => format!("{ASSET_BASE_URL}/{}", path.trim_start_matches('/')),
    }
}

/// A non-empty string field, or `None`.
fn non_empty_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)?.as_str().filter(|s| !s.is_empty())
}

/// A field coerced to a string: strings pass through, numbers are rendered
/// (`40` → `"40"`, `40.5` → `"40.5"`), everything else is empty.
fn string_field(raw: &Value, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// An integer field, accepting a number or a numeric string; anything else
/// is zero.
fn int_field(raw: &Value, key: &str) -> i32 {
    match raw.get(key) {
        Some(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// A non-negative mileage figure; negative, fractional, or non-numeric
/// values collapse to zero.
fn mileage_field(raw: &Value, key: &str) -> u64 {
    match raw.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// An array of strings; non-string entries are skipped, anything that is not
/// an array is empty.
fn string_list_field(raw: &Value, key: &str) -> Vec<String> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Rental conditions arrive as a list of strings or as one newline-delimited
/// string; both collapse to one condition per entry.
fn conditions_field(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(_)) => string_list_field(raw, key),
        Some(Value::String(s)) => s
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}
