use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the real environment so
/// tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    use chrono::FixedOffset;

    use crate::geo::LatLng;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let jinka_token = require("JINKA_TOKEN")?;
    let openai_api_key = require("OPENAI_API_KEY")?;
    let geocoding_key = require("GEOCODING_KEY")?;
    let nearby_search_key = require("NEARBY_SEARCH_KEY")?;
    let routes_key = lookup("ROUTES_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| nearby_search_key.clone());

    let work_location = require("RENTSCOUT_WORK_LOCATION")?
        .parse::<LatLng>()
        .map_err(|reason| invalid("RENTSCOUT_WORK_LOCATION", reason))?;

    let env = parse_environment(&or_default("RENTSCOUT_ENV", "development"));

    let bind_addr = or_default("RENTSCOUT_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("RENTSCOUT_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("RENTSCOUT_LOG_LEVEL", "info");
    let openai_model = or_default("RENTSCOUT_OPENAI_MODEL", "gpt-4.1-nano");

    let arrival_utc_offset = or_default("RENTSCOUT_ARRIVAL_UTC_OFFSET", "+01:00")
        .parse::<FixedOffset>()
        .map_err(|e| invalid("RENTSCOUT_ARRIVAL_UTC_OFFSET", e.to_string()))?;

    let request_timeout_secs = parse_u64("RENTSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RENTSCOUT_USER_AGENT", "rentscout/0.1 (listing-survey)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        jinka_token,
        openai_api_key,
        openai_model,
        geocoding_key,
        nearby_search_key,
        routes_key,
        work_location,
        arrival_utc_offset,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
