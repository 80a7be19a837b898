//! Tenant and run configuration.
//!
//! [`TenantConfig`] derives the three endpoint URLs from the tenant base URL;
//! [`PublishConfig`] adds the local file paths and the body-logging switch.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_MANIFEST_FILE: &str = "leanix.yaml";
pub const DEFAULT_DOCUMENT_FILE: &str = "architecture-overview.pdf";

/// Tenant connection settings: where the API lives and how to authenticate.
#[derive(Clone)]
pub struct TenantConfig {
    /// Base URL without trailing slash, e.g. `https://acme.leanix.net/services`.
    pub base_url: String,
    /// Static API token, sent as the Basic auth password during token exchange.
    pub api_token: String,
}

impl TenantConfig {
    pub fn for_subdomain(subdomain: &str, api_token: impl Into<String>) -> Self {
        Self::with_base_url(
            format!("https://{subdomain}.leanix.net/services"),
            api_token,
        )
    }

    pub fn with_base_url(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        TenantConfig {
            base_url,
            api_token: api_token.into(),
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/mtm/v1/oauth2/token", self.base_url)
    }

    pub fn manifest_url(&self) -> String {
        format!("{}/technology-discovery/v1/manifests", self.base_url)
    }

    pub fn graphql_upload_url(&self) -> String {
        format!("{}/pathfinder/v1/graphql/upload", self.base_url)
    }
}

impl fmt::Debug for TenantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Everything one publish run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub tenant: TenantConfig,
    pub manifest_path: PathBuf,
    pub document_path: PathBuf,
    /// Log raw response bodies and parsed JSON. Off with `--quiet`.
    pub log_response_bodies: bool,
}

impl PublishConfig {
    /// Config with the fixed local file names, relative to the working directory.
    pub fn new(tenant: TenantConfig) -> Self {
        PublishConfig {
            tenant,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_FILE),
            document_path: PathBuf::from(DEFAULT_DOCUMENT_FILE),
            log_response_bodies: true,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.tenant.base_url,
            manifest = %self.manifest_path.display(),
            document = %self.document_path.display(),
            log_response_bodies = self.log_response_bodies,
            "Loaded PublishConfig"
        );
        debug!(?self, "PublishConfig loaded (full debug)");
    }
}
