use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl CatalogError {
    /// The HTTP status associated with this error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Http(e) => e.status().map(|s| s.as_u16()),
            CatalogError::NotFound { .. } => Some(404),
            CatalogError::UnexpectedStatus { status, .. } => Some(*status),
            CatalogError::Deserialize { .. } | CatalogError::InvalidBaseUrl { .. } => None,
        }
    }
}
