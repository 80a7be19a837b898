//! GraphQL payloads for the pathfinder upload endpoint.
//!
//! The `createDocument` mutation takes its arguments as variables; ids and file
//! names never appear in the query text.

use serde::{Deserialize, Serialize};

use crate::contract::{DocumentRecord, FactSheetId};

pub const DOCUMENT_TYPE: &str = "documentation";
pub const DOCUMENT_ORIGIN: &str = "LX_STORAGE_SERVICE";

pub const CREATE_DOCUMENT_MUTATION: &str = "mutation createDocument($factSheetId: ID!, $name: String!, $documentType: String, $origin: String) { \
createDocument(factSheetId: $factSheetId, name: $name, documentType: $documentType, origin: $origin) { \
id name url factSheetId } }";

/// Body of the `graphQLRequest` multipart part.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentVariables {
    pub fact_sheet_id: String,
    pub name: String,
    pub document_type: &'static str,
    pub origin: &'static str,
}

pub fn create_document_request(
    fact_sheet_id: &FactSheetId,
    document_name: &str,
) -> GraphQlRequest<CreateDocumentVariables> {
    GraphQlRequest {
        query: CREATE_DOCUMENT_MUTATION,
        variables: CreateDocumentVariables {
            fact_sheet_id: fact_sheet_id.as_str().to_string(),
            name: document_name.to_string(),
            document_type: DOCUMENT_TYPE,
            origin: DOCUMENT_ORIGIN,
        },
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentData {
    #[serde(default)]
    pub create_document: Option<CreatedDocument>,
}

/// `createDocument` payload as sent by the server; every field may be absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocument {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub fact_sheet_id: Option<String>,
}

impl GraphQlResponse<CreateDocumentData> {
    /// The created document, if the server returned one with a non-empty id.
    pub fn document(self) -> Option<DocumentRecord> {
        let created = self.data?.create_document?;
        match created.id {
            Some(id) if !id.is_empty() => Some(DocumentRecord {
                id,
                name: created.name,
                url: created.url,
                fact_sheet_id: created.fact_sheet_id,
            }),
            _ => None,
        }
    }
}
