use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files. Useful for tests or callers that
/// manage env setup themselves.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let api_base_url = or_default("CARHIVE_API_BASE_URL", "https://car-rental-api.goit.global");
    let request_timeout_secs = parse_u64("CARHIVE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CARHIVE_USER_AGENT", "carhive/0.1 (catalog-browser)");
    let page_size = parse_u32("CARHIVE_PAGE_SIZE", "12")?;
    let brand_scan_page_cap = parse_u32("CARHIVE_BRAND_SCAN_PAGE_CAP", "10")?;
    let state_dir = PathBuf::from(or_default("CARHIVE_STATE_DIR", "./state"));
    let log_level = or_default("CARHIVE_LOG_LEVEL", "info");
    let inquiry_404_is_success = parse_bool("CARHIVE_INQUIRY_404_IS_SUCCESS", "true")?;

    Ok(AppConfig {
        api_base_url,
        request_timeout_secs,
        user_agent,
        page_size,
        brand_scan_page_cap,
        state_dir,
        log_level,
        inquiry_404_is_success,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
