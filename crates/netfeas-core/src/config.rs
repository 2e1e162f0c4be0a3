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
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let inventory_url = require("NETFEAS_INVENTORY_URL")?;
    let inventory_api_key = require("NETFEAS_INVENTORY_API_KEY")?;

    let env = parse_environment(&or_default("NETFEAS_ENV", "development"));
    let bind_addr = parse_addr("NETFEAS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NETFEAS_LOG_LEVEL", "info");

    let primary_table = or_default("NETFEAS_PRIMARY_TABLE", "pco");
    let access_table = or_default("NETFEAS_ACCESS_TABLE", "msan");
    let inventory_timeout_secs = parse_u64("NETFEAS_INVENTORY_TIMEOUT_SECS", "10")?;

    let classifier_url = optional("NETFEAS_CLASSIFIER_URL");
    let classifier_timeout_ms = parse_u64("NETFEAS_CLASSIFIER_TIMEOUT_MS", "3000")?;

    let training_data_path = optional("NETFEAS_TRAINING_DATA_PATH").map(PathBuf::from);
    let localities_path = optional("NETFEAS_LOCALITIES_PATH").map(PathBuf::from);
    let user_agent = or_default("NETFEAS_USER_AGENT", "netfeas/0.1 (feasibility)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        inventory_url,
        inventory_api_key,
        primary_table,
        access_table,
        inventory_timeout_secs,
        classifier_url,
        classifier_timeout_ms,
        training_data_path,
        localities_path,
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
