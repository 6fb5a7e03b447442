use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REVGEO_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.geocoder_base_url, "https://nominatim.openstreetmap.org/");
    assert_eq!(cfg.summary_base_url, "https://en.wikipedia.org/w/api.php");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "revgeo/0.1 (location-resolution)");
    assert_eq!(cfg.summary_sentences, 10);
    assert_eq!(cfg.fallback_coordinates, Coordinates::FALLBACK);
    assert!(!cfg.discard_stale);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REVGEO_ENV", "production");
    map.insert("REVGEO_GEOCODER_BASE_URL", "http://localhost:8080");
    map.insert("REVGEO_REQUEST_TIMEOUT_SECS", "5");
    map.insert("REVGEO_FALLBACK_LAT", "47.65");
    map.insert("REVGEO_FALLBACK_LNG", "9.45");
    map.insert("REVGEO_DISCARD_STALE", "true");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.geocoder_base_url, "http://localhost:8080");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.fallback_coordinates, Coordinates::new(47.65, 9.45).unwrap());
    assert!(cfg.discard_stale);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("REVGEO_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVGEO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(REVGEO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("REVGEO_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_rejects_out_of_range_fallback() {
    let mut map = HashMap::new();
    map.insert("REVGEO_FALLBACK_LAT", "123.0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var.starts_with("REVGEO_FALLBACK")),
        "expected InvalidEnvVar(REVGEO_FALLBACK_*), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_boolean_discard_stale() {
    let mut map = HashMap::new();
    map.insert("REVGEO_DISCARD_STALE", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVGEO_DISCARD_STALE"),
        "expected InvalidEnvVar(REVGEO_DISCARD_STALE), got: {result:?}"
    );
}
