use crate::app_config::{AppConfig, Environment};
use crate::location::Coordinates;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so the parsing rules can
/// be tested with a plain `HashMap`.
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
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let env = parse_environment(&or_default("REVGEO_ENV", "development"))?;
    let log_level = or_default("REVGEO_LOG_LEVEL", "info");

    let geocoder_base_url = or_default(
        "REVGEO_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org/",
    );
    let summary_base_url = or_default(
        "REVGEO_SUMMARY_BASE_URL",
        "https://en.wikipedia.org/w/api.php",
    );

    let request_timeout_secs = parse_u64("REVGEO_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "REVGEO_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("REVGEO_USER_AGENT", "revgeo/0.1 (location-resolution)");
    let summary_sentences = parse_u32("REVGEO_SUMMARY_SENTENCES", "10")?;

    let fallback_lat = parse_f64("REVGEO_FALLBACK_LAT", "1.2756005")?;
    let fallback_lng = parse_f64("REVGEO_FALLBACK_LNG", "103.8619528")?;
    let fallback_coordinates = Coordinates::new(fallback_lat, fallback_lng)
        .map_err(|e| invalid("REVGEO_FALLBACK_LAT/REVGEO_FALLBACK_LNG", e.to_string()))?;

    let discard_stale = parse_bool("REVGEO_DISCARD_STALE", "false")?;

    Ok(AppConfig {
        env,
        log_level,
        geocoder_base_url,
        summary_base_url,
        request_timeout_secs,
        user_agent,
        summary_sentences,
        fallback_coordinates,
        discard_stale,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVGEO_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
