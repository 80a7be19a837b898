use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use leanix_publish::load_config::{config_from_lookup, load_config};
use leanix_publish_core::{ErrorKind, PublishError};
use serial_test::serial;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

/// Tenant base URL and endpoints derive from the subdomain; file paths are fixed.
#[test]
fn test_config_from_subdomain_and_token() {
    let config = config_from_lookup(
        lookup_from(&[("LEANIX_API_TOKEN", "tok"), ("LEANIX_SUBDOMAIN", "acme")]),
        true,
    )
    .expect("Config should load");

    assert_eq!(config.tenant.api_token, "tok");
    assert_eq!(config.tenant.base_url, "https://acme.leanix.net/services");
    assert_eq!(
        config.tenant.manifest_url(),
        "https://acme.leanix.net/services/technology-discovery/v1/manifests"
    );
    assert_eq!(config.manifest_path, PathBuf::from("leanix.yaml"));
    assert_eq!(
        config.document_path,
        PathBuf::from("architecture-overview.pdf")
    );
    assert!(config.log_response_bodies);
}

#[test]
fn test_config_missing_token_is_config_error() {
    let err = config_from_lookup(lookup_from(&[("LEANIX_SUBDOMAIN", "acme")]), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(matches!(
        err,
        PublishError::MissingEnv {
            name: "LEANIX_API_TOKEN"
        }
    ));
}

#[test]
fn test_config_missing_subdomain_is_config_error() {
    let err = config_from_lookup(lookup_from(&[("LEANIX_API_TOKEN", "tok")]), true).unwrap_err();
    assert!(err.to_string().contains("LEANIX_SUBDOMAIN"), "got: {err}");
}

#[test]
fn test_config_empty_value_counts_as_missing() {
    let err = config_from_lookup(
        lookup_from(&[("LEANIX_API_TOKEN", "  "), ("LEANIX_SUBDOMAIN", "acme")]),
        true,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

/// The base URL override still requires the subdomain, so fail-fast behaviour is unchanged.
#[test]
fn test_config_base_url_override() {
    let config = config_from_lookup(
        lookup_from(&[
            ("LEANIX_API_TOKEN", "tok"),
            ("LEANIX_SUBDOMAIN", "acme"),
            ("LEANIX_BASE_URL", "http://127.0.0.1:8080/services/"),
        ]),
        false,
    )
    .expect("Config should load with override");

    assert_eq!(
        config.tenant.token_url(),
        "http://127.0.0.1:8080/services/mtm/v1/oauth2/token"
    );
    assert!(!config.log_response_bodies);

    let err = config_from_lookup(
        lookup_from(&[
            ("LEANIX_API_TOKEN", "tok"),
            ("LEANIX_BASE_URL", "http://127.0.0.1:8080/services"),
        ]),
        true,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
#[serial]
fn test_load_config_reads_process_environment() {
    env::set_var("LEANIX_API_TOKEN", "env-token");
    env::set_var("LEANIX_SUBDOMAIN", "contoso");
    env::remove_var("LEANIX_BASE_URL");

    let config = load_config(true).expect("Config should load from env");

    assert_eq!(config.tenant.api_token, "env-token");
    assert_eq!(config.tenant.base_url, "https://contoso.leanix.net/services");
}
