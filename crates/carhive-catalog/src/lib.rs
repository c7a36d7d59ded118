pub mod client;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod shapes;
pub mod types;

pub use client::{CatalogClient, MissingEndpointPolicy, DEFAULT_PAGE_SIZE};
pub use error::CatalogError;
pub use filter::reconcile;
pub use normalize::normalize_record;
pub use shapes::{extract_list, extract_record};
pub use types::{InquiryOutcome, InquiryRequest};
