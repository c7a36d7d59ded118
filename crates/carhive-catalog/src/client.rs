//! HTTP client for the remote rental-catalog service.
//!
//! Wraps `reqwest` with the service's quirks: every operation knows a primary
//! and an alternate path (the API has shipped under both `/api/...` and
//! bare-root layouts), and a 404 on the primary triggers exactly one retry
//! against the alternate with identical parameters. All other non-2xx
//! statuses surface as typed [`CatalogError`]s.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use carhive_core::FilterCriteria;

use crate::error::CatalogError;
use crate::types::{InquiryOutcome, InquiryRequest};

const DEFAULT_BASE_URL: &str = "https://car-rental-api.goit.global";

/// Records per page the service serves. "Has more" is inferred from whether a
/// page came back full, so callers should pass this unless a test says
/// otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

const LIST_PATHS: (&str, &str) = ("api/cars", "cars");
const RENTALS_PATHS: (&str, &str) = ("api/rentals", "rentals");

/// What to do when an inquiry POST hits 404 on both known paths.
///
/// The live service has shipped without the rentals endpoint; treating the
/// double miss as an accepted no-op keeps the booking flow usable against
/// such a deployment. The policy is explicit configuration rather than
/// implicit control flow so deployments with a real endpoint can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingEndpointPolicy {
    /// Report [`InquiryOutcome::EndpointMissing`], which callers treat as
    /// success.
    #[default]
    TreatAsAccepted,
    /// Propagate the not-found error.
    Reject,
}

/// Client for the rental-catalog REST API.
///
/// Use [`CatalogClient::new`] for production or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    missing_endpoint_policy: MissingEndpointPolicy,
}

impl CatalogClient {
    /// Creates a client pointed at the production catalog service.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        missing_endpoint_policy: MissingEndpointPolicy,
    ) -> Result<Self, CatalogError> {
        Self::with_base_url(timeout_secs, user_agent, missing_endpoint_policy, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        missing_endpoint_policy: MissingEndpointPolicy,
        base_url: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join treats the last
        // segment as a directory rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            missing_endpoint_policy,
        })
    }

    /// Fetches one page of the vehicle list as a raw JSON payload.
    ///
    /// Sends `page` and `limit` always, and `make`, `rentalPrice`,
    /// `mileageFrom`, `mileageTo` only for criteria that are non-empty and
    /// parse (the numeric parameters are sent as numbers, matching what the
    /// service expects). A 404 on the primary path retries the alternate
    /// once with identical parameters.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] — both paths returned 404.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::Deserialize`] — the body is not valid JSON.
    pub async fn list_vehicles(
        &self,
        criteria: &FilterCriteria,
        page: u32,
        page_size: u32,
    ) -> Result<Value, CatalogError> {
        let params = Self::list_params(criteria, page, page_size);
        self.get_with_fallback(LIST_PATHS.0, LIST_PATHS.1, &params)
            .await
    }

    /// Fetches a single vehicle by id as a raw JSON payload, with the same
    /// primary/alternate fallback as [`CatalogClient::list_vehicles`].
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CatalogClient::list_vehicles`].
    pub async fn get_vehicle(&self, id: &str) -> Result<Value, CatalogError> {
        let primary = format!("{}/{id}", LIST_PATHS.0);
        let alternate = format!("{}/{id}", LIST_PATHS.1);
        self.get_with_fallback(&primary, &alternate, &[]).await
    }

    /// Submits a booking inquiry.
    ///
    /// POSTs the primary rentals path, retrying the alternate on 404. When
    /// *both* paths 404, the configured [`MissingEndpointPolicy`] decides
    /// between a soft [`InquiryOutcome::EndpointMissing`] and the error.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] — both paths 404 and the policy is
    ///   [`MissingEndpointPolicy::Reject`].
    /// - [`CatalogError::UnexpectedStatus`] — any non-404, non-2xx status.
    /// - [`CatalogError::Http`] — network or TLS failure.
    pub async fn submit_inquiry(
        &self,
        request: &InquiryRequest,
    ) -> Result<InquiryOutcome, CatalogError> {
        match self.post_json(RENTALS_PATHS.0, request).await {
            Ok(()) => Ok(InquiryOutcome::Accepted),
            Err(CatalogError::NotFound { url }) => {
                tracing::warn!(%url, alternate = RENTALS_PATHS.1, "rentals path not found, retrying alternate");
                match self.post_json(RENTALS_PATHS.1, request).await {
                    Ok(()) => Ok(InquiryOutcome::Accepted),
                    Err(CatalogError::NotFound { url }) => match self.missing_endpoint_policy {
                        MissingEndpointPolicy::TreatAsAccepted => {
                            tracing::warn!(
                                %url,
                                "inquiry endpoint missing on both paths, treating submission as accepted"
                            );
                            Ok(InquiryOutcome::EndpointMissing)
                        }
                        MissingEndpointPolicy::Reject => Err(CatalogError::NotFound { url }),
                    },
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Builds the list query: `page` and `limit` always, filter parameters
    /// only when the criterion is non-empty (numeric ones only when they
    /// parse; the reconciler governs correctness either way).
    fn list_params(criteria: &FilterCriteria, page: u32, page_size: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), page.to_string()),
            ("limit".to_owned(), page_size.to_string()),
        ];
        if let Some(brand) = criteria.brand_constraint() {
            params.push(("make".to_owned(), brand.to_owned()));
        }
        if let Some(price) = criteria.max_price() {
            params.push(("rentalPrice".to_owned(), price.to_string()));
        }
        if let Some(from) = criteria.mileage_from() {
            params.push(("mileageFrom".to_owned(), from.to_string()));
        }
        if let Some(to) = criteria.mileage_to() {
            params.push(("mileageTo".to_owned(), to.to_string()));
        }
        params
    }

    /// GETs the primary path and retries the alternate once on 404.
    async fn get_with_fallback(
        &self,
        primary: &str,
        alternate: &str,
        params: &[(String, String)],
    ) -> Result<Value, CatalogError> {
        match self.get_json(primary, params).await {
            Err(CatalogError::NotFound { url }) => {
                tracing::warn!(%url, alternate, "primary path not found, retrying alternate");
                self.get_json(alternate, params).await
            }
            other => other,
        }
    }

    /// Sends a GET, maps the status into the error taxonomy, and parses the
    /// body as JSON.
    async fn get_json(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, CatalogError> {
        let url = self.build_url(path, params)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// POSTs a JSON body and maps the status; the response body is ignored.
    async fn post_json<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), CatalogError> {
        let url = self.build_url(path, &[])?;
        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// Joins `path` onto the base URL and appends percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, params: &[(String, String)]) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CatalogError::InvalidBaseUrl {
                base_url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
