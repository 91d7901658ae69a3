use crate::app_config::{AppConfig, CorsPolicy, Environment};
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
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};

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

    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let shopify_api_version = or_default("API_VERSION", "2024-07");

    let env = parse_environment(&or_default("CUSTMETA_ENV", "development"));

    let host = or_default("CUSTMETA_HOST", "0.0.0.0")
        .parse::<IpAddr>()
        .map_err(|e| invalid("CUSTMETA_HOST", e.to_string()))?;
    let port = or_default("PORT", "3000")
        .parse::<u16>()
        .map_err(|e| invalid("PORT", e.to_string()))?;
    let bind_addr = SocketAddr::new(host, port);

    let log_level = or_default("CUSTMETA_LOG_LEVEL", "info");

    let upstream_timeout_secs = or_default("CUSTMETA_UPSTREAM_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("CUSTMETA_UPSTREAM_TIMEOUT_SECS", e.to_string()))?;

    let cors_policy = match lookup("CUSTMETA_CORS_ALLOWED_ORIGINS") {
        Ok(raw) => parse_cors_policy(&raw)?,
        // Unset only means allow-all in development.
        Err(_) if env == Environment::Development => CorsPolicy::AllowAll,
        Err(_) => {
            return Err(ConfigError::MissingEnvVar(
                "CUSTMETA_CORS_ALLOWED_ORIGINS".to_string(),
            ))
        }
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shopify_access_token,
        shopify_api_version,
        upstream_timeout_secs,
        cors_policy,
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

/// Parse `CUSTMETA_CORS_ALLOWED_ORIGINS`: `*` or a comma-separated origin list.
fn parse_cors_policy(raw: &str) -> Result<CorsPolicy, ConfigError> {
    if raw.trim() == "*" {
        return Ok(CorsPolicy::AllowAll);
    }

    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_owned())
        .collect();

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CUSTMETA_CORS_ALLOWED_ORIGINS".to_string(),
            reason: "expected `*` or at least one origin".to_string(),
        });
    }

    if let Some(bad) = origins
        .iter()
        .find(|o| !(o.starts_with("https://") || o.starts_with("http://")))
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "CUSTMETA_CORS_ALLOWED_ORIGINS".to_string(),
            reason: format!("origin \"{bad}\" must start with http:// or https://"),
        });
    }

    Ok(CorsPolicy::AllowList(origins))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
