//! # contract: interface to the fact sheet API
//!
//! This module defines the [`FactSheetApi`] trait and the plain data types that
//! flow between the three pipeline steps (token, manifest, document).
//!
//! ## Interface & Extensibility
//! - Implement [`FactSheetApi`] for a concrete backend (the CLI crate provides the HTTP client).
//! - All methods are async and return [`PublishError`] so callers can classify failures.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; `MockFactSheetApi` is exported with the
//!   `test-export-mocks` feature so pipeline tests never touch the network.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::PublishError;

/// Short-lived OAuth2 bearer token. Held for one run, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    /// Lifetime in seconds, when the token endpoint reports it.
    pub expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        AccessToken {
            secret: secret.into(),
            expires_in: None,
        }
    }

    pub fn with_expiry(mut self, expires_in: Option<u64>) -> Self {
        self.expires_in = expires_in;
        self
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Server-assigned identifier of the fact sheet a manifest created or updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSheetId(String);

impl FactSheetId {
    /// For [`FactSheetApi`] implementations; the pipeline only forwards ids they return.
    pub fn new(id: impl Into<String>) -> Self {
        FactSheetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactSheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document record returned by the `createDocument` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Always non-empty.
    pub id: String,
    pub name: Option<String>,
    pub url: Option<String>,
    pub fact_sheet_id: Option<String>,
}

/// The three remote operations of a publish run.
///
/// Implementations own transport and authentication details. File paths are passed
/// in so the trait stays agnostic of the working directory.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait FactSheetApi: Send + Sync {
    /// Exchange the static API token for a bearer token (client-credentials grant).
    async fn obtain_access_token(&self) -> Result<AccessToken, PublishError>;

    /// Upload the manifest file and return the id of the fact sheet it describes.
    async fn upload_manifest(
        &self,
        token: &AccessToken,
        manifest_path: &Path,
    ) -> Result<FactSheetId, PublishError>;

    /// Create a document linked to `fact_sheet_id`, uploading the file at `document_path`.
    ///
    /// Callers check that the file exists; implementations surface a missing file as
    /// [`PublishError::Io`].
    async fn upload_document(
        &self,
        token: &AccessToken,
        fact_sheet_id: &FactSheetId,
        document_path: &Path,
    ) -> Result<DocumentRecord, PublishError>;
}
