/// `load_config` module: builds the [`PublishConfig`] for a run from the process environment.
///
/// This module is the only place that reads environment variables. The resulting
/// config is constructed once at startup and passed by reference into the pipeline.
///
/// # Responsibilities
/// - Load a `.env` file from the working directory when present
/// - Require `LEANIX_API_TOKEN` and `LEANIX_SUBDOMAIN`, failing before any network call
/// - Honour the optional `LEANIX_BASE_URL` override (proxies, local mock servers)
///
/// # Errors
/// A missing or empty required variable is [`PublishError::MissingEnv`], which the CLI
/// reports as a configuration error.
use leanix_publish_core::config::{PublishConfig, TenantConfig};
use leanix_publish_core::PublishError;
use tracing::{error, info};

pub const API_TOKEN_VAR: &str = "LEANIX_API_TOKEN";
pub const SUBDOMAIN_VAR: &str = "LEANIX_SUBDOMAIN";
pub const BASE_URL_VAR: &str = "LEANIX_BASE_URL";

/// Loads `.env` (if any) and reads the config from the process environment.
pub fn load_config(log_response_bodies: bool) -> Result<PublishConfig, PublishError> {
    match dotenvy::dotenv() {
        Ok(path) => info!(env_file = %path.display(), "Loaded environment from file"),
        Err(_) => info!("No .env file loaded, using process environment"),
    }
    config_from_lookup(|name| std::env::var(name).ok(), log_response_bodies)
}

/// Builds the config from an arbitrary variable lookup. Empty values count as missing.
pub fn config_from_lookup<F>(lookup: F, log_response_bodies: bool) -> Result<PublishConfig, PublishError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |name: &'static str| {
        lookup(name).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            error!(variable = name, "Required environment variable missing");
            PublishError::MissingEnv { name }
        })
    };

    let api_token = require(API_TOKEN_VAR)?;
    let subdomain = require(SUBDOMAIN_VAR)?;

    let tenant = match lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
        Some(base_url) => {
            info!(base_url = %base_url, "Using base URL override");
            TenantConfig::with_base_url(base_url, api_token)
        }
        None => TenantConfig::for_subdomain(subdomain.trim(), api_token),
    };

    let mut config = PublishConfig::new(tenant);
    config.log_response_bodies = log_response_bodies;
    config.trace_loaded();
    Ok(config)
}
