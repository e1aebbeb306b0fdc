use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Origin used when `VINFREAK_API_BASE` is unset, matching the dev proxy target.
const DEFAULT_API_BASE: &str = "https://vinfreak.onrender.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<u32>() {
            Ok(0) => Err(invalid(var, "must be greater than zero".to_string())),
            Ok(n) => Ok(n),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let env = parse_environment(&or_default("VINFREAK_ENV", "development"))?;

    let api_base = or_default("VINFREAK_API_BASE", DEFAULT_API_BASE)
        .trim()
        .trim_end_matches('/')
        .to_string();
    if api_base.is_empty() {
        return Err(invalid("VINFREAK_API_BASE", "must not be empty".to_string()));
    }

    let log_level = or_default("VINFREAK_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("VINFREAK_REQUEST_TIMEOUT_SECS", "20")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "VINFREAK_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("VINFREAK_USER_AGENT", "vinfreak/0.1 (listing-search)");
    let page_size = parse_positive_u32("VINFREAK_PAGE_SIZE", "24")?;
    let bulk_page_size = parse_positive_u32("VINFREAK_BULK_PAGE_SIZE", "100")?;

    Ok(AppConfig {
        env,
        api_base,
        log_level,
        request_timeout_secs,
        user_agent,
        page_size,
        bulk_page_size,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VINFREAK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
