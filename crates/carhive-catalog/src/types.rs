//! Wire types for the remote rental-catalog service.
//!
//! ## Observed behavior of the live service
//!
//! The API is loosely specified and has shipped several envelope layouts:
//!
//! - List responses arrive as a bare JSON array, or as an object wrapping the
//!   array under `data`, `cars`, or `items`. See [`crate::shapes`] for the
//!   matcher order.
//! - Detail responses arrive under `data`, under `car`, or as a bare object.
//! - Records name the manufacturer `make` or `brand` depending on vintage.
//! - `rentalPrice` is sometimes a number (`40`), sometimes a currency string
//!   (`"$40"`).
//! - `rentalConditions` is either an array of strings or one newline-delimited
//!   string.
//! - `img` may be absolute, scheme-relative (`//host/x.jpg`), a bare path
//!   under the asset host, or absent entirely.
//!
//! Because no single serde struct covers all vintages, raw records stay
//! `serde_json::Value` until [`crate::normalize::normalize_record`] folds
//! them into the canonical [`carhive_core::Vehicle`].

use serde::Serialize;

/// A booking inquiry, POSTed to the rentals endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub car_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of submitting an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryOutcome {
    /// The service accepted the submission.
    Accepted,
    /// Both known rental paths returned 404 and the configured policy treats
    /// that as a successful no-op. Callers report this as success.
    EndpointMissing,
}
