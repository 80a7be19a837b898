//! High-level pipeline: orchestrates token → manifest → document for one fact sheet.
//!
//! This module provides the top-level orchestration of a publish run. It:
//!   - Exchanges the API token for a bearer token
//!   - Uploads the manifest and takes the fact sheet id from the response
//!   - Attaches the document to that fact sheet, when the document exists locally
//!   - Returns a [`PublishReport`] of what was published.
//!
//! # Responsibilities
//! - Fail-fast orchestration: the first failing step ends the run with its error
//! - The document step only ever receives a fact sheet id produced by the manifest step
//! - Logs every step through tracing events
//!
//! # Callable From
//! - The CLI crate and integration tests, with any [`FactSheetApi`] implementation.

use std::path::Path;

use serde::Serialize;
use tracing::{error, info};

use crate::config::PublishConfig;
use crate::contract::{AccessToken, DocumentRecord, FactSheetApi, FactSheetId};
use crate::error::PublishError;

/// Outcome of a successful publish run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub fact_sheet_id: String,
    /// `None` when no document file was present.
    pub document: Option<DocumentRecord>,
}

pub async fn publish<A>(api: &A, config: &PublishConfig) -> Result<PublishReport, PublishError>
where
    A: FactSheetApi + ?Sized,
{
    info!("[PUBLISH] Starting publish pipeline");

    let token = match api.obtain_access_token().await {
        Ok(token) => {
            info!(expires_in = ?token.expires_in, "[PUBLISH] Obtained access token");
            token
        }
        Err(e) => {
            error!(error = %e, "[PUBLISH][ERROR] Token exchange failed");
            return Err(e);
        }
    };

    let fact_sheet_id = match api.upload_manifest(&token, &config.manifest_path).await {
        Ok(id) => {
            info!(fact_sheet_id = %id, "[PUBLISH] Manifest uploaded");
            id
        }
        Err(e) => {
            error!(
                error = %e,
                manifest = %config.manifest_path.display(),
                "[PUBLISH][ERROR] Manifest upload failed"
            );
            return Err(e);
        }
    };

    let document = attach_document(api, &token, &fact_sheet_id, &config.document_path).await?;

    info!(
        fact_sheet_id = %fact_sheet_id,
        document_id = document.as_ref().map(|d| d.id.as_str()),
        "[PUBLISH] Publish pipeline complete"
    );

    Ok(PublishReport {
        fact_sheet_id: fact_sheet_id.to_string(),
        document,
    })
}

/// Attach the document at `document_path` to the fact sheet.
///
/// A missing document is not an error: the step is skipped and `Ok(None)` returned
/// without any call on `api`.
pub async fn attach_document<A>(
    api: &A,
    token: &AccessToken,
    fact_sheet_id: &FactSheetId,
    document_path: &Path,
) -> Result<Option<DocumentRecord>, PublishError>
where
    A: FactSheetApi + ?Sized,
{
    let is_file = tokio::fs::metadata(document_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        info!(
            document = %document_path.display(),
            "[PUBLISH] No document file found, skipping upload"
        );
        return Ok(None);
    }

    match api.upload_document(token, fact_sheet_id, document_path).await {
        Ok(record) => {
            info!(
                document_id = %record.id,
                fact_sheet_id = %fact_sheet_id,
                "[PUBLISH] Document uploaded successfully"
            );
            Ok(Some(record))
        }
        Err(e) => {
            error!(
                error = %e,
                document = %document_path.display(),
                "[PUBLISH][ERROR] Document upload failed"
            );
            Err(e)
        }
    }
}
