//! # LeanIX HTTP client
//!
//! [`LeanixClient`] implements [`FactSheetApi`] against a LeanIX tenant using `reqwest`:
//!
//! - token exchange: `POST {base}/mtm/v1/oauth2/token` (Basic auth, client-credentials grant)
//! - manifest upload: `PUT {base}/technology-discovery/v1/manifests` (multipart `file`)
//! - document upload: `POST {base}/pathfinder/v1/graphql/upload` (multipart `graphQLRequest` + `file`)
//!
//! No retries and no client-side timeout: every failure is returned to the caller as a
//! [`PublishError`].

use std::path::Path;

use async_trait::async_trait;
use leanix_publish_core::config::{PublishConfig, TenantConfig};
use leanix_publish_core::contract::{AccessToken, DocumentRecord, FactSheetApi, FactSheetId};
use leanix_publish_core::graphql::{create_document_request, CreateDocumentData, GraphQlResponse};
use leanix_publish_core::PublishError;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response};
use serde::Deserialize;

/// Username of the Basic auth credential used for token exchange.
const TOKEN_USERNAME: &str = "apitoken";

const YAML_MIME: &str = "application/yaml";
const PDF_MIME: &str = "application/pdf";

pub struct LeanixClient {
    http: Client,
    tenant: TenantConfig,
    log_response_bodies: bool,
}

/// Only `access_token` decides success; the other fields are informational and
/// accepted in any JSON shape.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<serde_json::Value>,
    expires_in: Option<serde_json::Value>,
    token_type: Option<serde_json::Value>,
}

impl TokenResponse {
    fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_ref()
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Lifetime in seconds, from a number or a numeric string.
    fn expires_in(&self) -> Option<u64> {
        let value = self.expires_in.as_ref()?;
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

#[derive(Debug, Deserialize)]
struct ManifestResponse {
    data: Option<ManifestData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestData {
    fact_sheet_id: Option<serde_json::Value>,
}

impl LeanixClient {
    pub fn new(config: &PublishConfig) -> Self {
        tracing::info!(base_url = %config.tenant.base_url, "Initialized LeanixClient");
        LeanixClient {
            http: Client::new(),
            tenant: config.tenant.clone(),
            log_response_bodies: config.log_response_bodies,
        }
    }

    fn transport_error(url: &str, e: reqwest::Error) -> PublishError {
        tracing::error!(error = ?e, url, "Request failed before a response was received");
        PublishError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        }
    }

    /// Reads the status and full body text of a response.
    async fn read_response(url: &str, response: Response) -> Result<(u16, String), PublishError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(url, e))?;
        Ok((status, body))
    }

    fn check_status(url: &str, status: u16, body: &str) -> Result<(), PublishError> {
        if (200..300).contains(&status) {
            return Ok(());
        }
        tracing::error!(url, status, body, "Request returned error status");
        Err(PublishError::Http {
            url: url.to_string(),
            status,
            body: body.to_string(),
        })
    }

    fn parse_json<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T, PublishError> {
        serde_json::from_str(body).map_err(|source| {
            tracing::error!(error = %source, url, body, "Response body is not the expected JSON");
            PublishError::InvalidJson {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Pretty-prints a JSON body at info level, unless body logging is off.
    fn log_json(&self, what: &str, body: &str) {
        if !self.log_response_bodies {
            return;
        }
        match serde_json::from_str::<serde_json::Value>(body)
            .and_then(|v| serde_json::to_string_pretty(&v))
        {
            Ok(pretty) => tracing::info!("{what} response:\n{pretty}"),
            Err(_) => tracing::info!(body, "{what} response (not JSON)"),
        }
    }

    async fn file_part(path: &Path, mime: &str) -> Result<Part, PublishError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            tracing::error!(error = %source, path = %path.display(), "Failed to read file");
            PublishError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Read file for upload");
        Part::bytes(bytes)
            .file_name(file_name(path))
            .mime_str(mime)
            .map_err(|e| PublishError::InvalidRequest(format!("invalid MIME type {mime}: {e}")))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl FactSheetApi for LeanixClient {
    async fn obtain_access_token(&self) -> Result<AccessToken, PublishError> {
        let url = self.tenant.token_url();
        tracing::info!(url = %url, "Requesting access token");

        let response = self
            .http
            .post(&url)
            .basic_auth(TOKEN_USERNAME, Some(&self.tenant.api_token))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        let (status, body) = Self::read_response(&url, response).await?;
        Self::check_status(&url, status, &body)?;

        let parsed: TokenResponse = Self::parse_json(&url, &body)?;
        tracing::debug!(
            expires_in = ?parsed.expires_in(),
            token_type = ?parsed.token_type,
            "Token response received"
        );
        match parsed.access_token() {
            Some(token) => Ok(AccessToken::new(token).with_expiry(parsed.expires_in())),
            None => {
                tracing::error!(url = %url, body = %body, "Token response lacks access_token");
                Err(PublishError::MissingField {
                    field: "access_token",
                    body,
                })
            }
        }
    }

    async fn upload_manifest(
        &self,
        token: &AccessToken,
        manifest_path: &Path,
    ) -> Result<FactSheetId, PublishError> {
        let url = self.tenant.manifest_url();
        let form = Form::new().part("file", Self::file_part(manifest_path, YAML_MIME).await?);
        tracing::info!(url = %url, manifest = %manifest_path.display(), "Uploading manifest");

        let response = self
            .http
            .put(&url)
            .header(header::AUTHORIZATION, token.bearer_header())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        let (status, body) = Self::read_response(&url, response).await?;

        if self.log_response_bodies {
            tracing::info!(status, body = %body, "Manifest HTTP response");
        } else {
            tracing::info!(status, "Manifest HTTP response");
        }
        Self::check_status(&url, status, &body)?;
        self.log_json("Manifest", &body);

        let parsed: ManifestResponse = Self::parse_json(&url, &body)?;
        let fact_sheet_id = parsed
            .data
            .and_then(|d| d.fact_sheet_id)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                tracing::error!(body = %body, "No factSheetId in manifest response");
                PublishError::MissingField {
                    field: "data.factSheetId",
                    body: body.clone(),
                }
            })?;

        tracing::info!(fact_sheet_id = %fact_sheet_id, "Fact sheet ID");
        Ok(FactSheetId::new(fact_sheet_id))
    }

    async fn upload_document(
        &self,
        token: &AccessToken,
        fact_sheet_id: &FactSheetId,
        document_path: &Path,
    ) -> Result<DocumentRecord, PublishError> {
        let url = self.tenant.graphql_upload_url();
        let name = file_name(document_path);
        let request = create_document_request(fact_sheet_id, &name);
        let graphql_json = serde_json::to_string(&request)
            .map_err(|e| PublishError::InvalidRequest(format!("cannot encode GraphQL request: {e}")))?;

        let form = Form::new()
            .text("graphQLRequest", graphql_json)
            .part("file", Self::file_part(document_path, PDF_MIME).await?);
        tracing::info!(
            url = %url,
            document = %document_path.display(),
            fact_sheet_id = %fact_sheet_id,
            "Uploading document"
        );

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, token.bearer_header())
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;
        let (status, body) = Self::read_response(&url, response).await?;
        Self::check_status(&url, status, &body)?;
        self.log_json("Document upload", &body);

        let parsed: GraphQlResponse<CreateDocumentData> = Self::parse_json(&url, &body)?;
        let messages = parsed.error_messages();
        if !messages.is_empty() {
            tracing::warn!(errors = ?messages, "GraphQL errors in document upload response");
        }
        parsed.document().ok_or_else(|| {
            tracing::error!(body = %body, "No document ID in response");
            PublishError::MissingField {
                field: "data.createDocument.id",
                body: body.clone(),
            }
        })
    }
}
