use std::path::PathBuf;

/// Runtime configuration for the catalog data layer, loaded from the
/// environment by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote catalog service.
    pub api_base_url: String,
    /// Per-request timeout applied to the HTTP client.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Records per catalog page. The service fixes this at 12; it is
    /// configurable only so tests can exercise smaller pages.
    pub page_size: u32,
    /// Highest page number scanned when compensating for unreliable
    /// server-side brand filtering.
    pub brand_scan_page_cap: u32,
    /// Directory holding cross-session state (the favorites file).
    pub state_dir: PathBuf,
    pub log_level: String,
    /// When `true`, an inquiry endpoint missing on both known paths is
    /// reported to the caller as an accepted submission.
    pub inquiry_404_is_success: bool,
}
