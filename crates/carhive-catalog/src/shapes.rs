//! Envelope handling for the catalog service's heterogeneous responses.
//!
//! The service has shipped several response layouts over time. Rather than
//! nested conditionals, each known shape is a matcher function and the
//! matchers are tried in a fixed priority order; adding a new vintage means
//! appending one entry to the table.

use serde_json::Value;

type ListMatcher = fn(&Value) -> Option<&Vec<Value>>;
type RecordMatcher = fn(&Value) -> Option<&Value>;

/// Known list envelopes, tried in order. First match wins.
const LIST_MATCHERS: &[ListMatcher] = &[bare_array, list_under_data, list_under_cars, list_under_items];

/// Known detail envelopes, tried in order. First match wins.
const RECORD_MATCHERS: &[RecordMatcher] = &[record_under_data, record_under_car, bare_object];

/// Extracts the raw record array from a list payload.
///
/// Tries each known envelope in priority order: bare array, `{"data": [...]}`,
/// `{"cars": [...]}`, `{"items": [...]}`. Returns an empty vec when no shape
/// matches; never errors on a mismatch.
#[must_use]
pub fn extract_list(payload: &Value) -> Vec<Value> {
    LIST_MATCHERS
        .iter()
        .find_map(|matcher| matcher(payload))
        .cloned()
        .unwrap_or_default()
}

/// Extracts the raw record from a detail payload.
///
/// Tries `{"data": {...}}`, then `{"car": {...}}`, then a bare object.
/// Returns `None` when the payload matches no known shape.
#[must_use]
pub fn extract_record(payload: &Value) -> Option<Value> {
    RECORD_MATCHERS
        .iter()
        .find_map(|matcher| matcher(payload))
        .cloned()
}

fn bare_array(payload: &Value) -> Option<&Vec<Value>> {
    payload.as_array()
}

fn array_under<'a>(payload: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    payload.get(key)?.as_array()
}

fn list_under_data(payload: &Value) -> Option<&Vec<Value>> {
    array_under(payload, "data")
}

fn list_under_cars(payload: &Value) -> Option<&Vec<Value>> {
    array_under(payload, "cars")
}

fn list_under_items(payload: &Value) -> Option<&Vec<Value>> {
    array_under(payload, "items")
}

fn object_under<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    let inner = payload.get(key)?;
    inner.is_object().then_some(inner)
}

fn record_under_data(payload: &Value) -> Option<&Value> {
    object_under(payload, "data")
}

fn record_under_car(payload: &Value) -> Option<&Value> {
    object_under(payload, "car")
}

fn bare_object(payload: &Value) -> Option<&Value> {
    payload.is_object().then_some(payload)
}
