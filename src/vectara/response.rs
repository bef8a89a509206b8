//! Typed view of the `/v1/query` response.
//!
//! Every field the node reads is modeled here with a default so that a sparse
//! payload parses cleanly; structural problems (no result set, dangling
//! document index) are rejected once in [`QueryResponse::into_output`].

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::errors::UpstreamError;
use crate::graph::{ChainOutput, Document};

const STATUS_BAD_REQUEST: &str = "BAD_REQUEST";
const STATUS_NOT_FOUND: &str = "NOT_FOUND";
const SUMMARIZER_NOT_FOUND_DETAIL: &str = "Failed to retrieve summarizer.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub response_set: Vec<ResponseSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseSet {
    #[serde(default)]
    pub response: Vec<ResponseItem>,
    #[serde(default)]
    pub document: Vec<DocumentItem>,
    #[serde(default)]
    pub summary: Vec<Summary>,
}

/// One matched passage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default)]
    pub document_index: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    pub text: Option<String>,
    #[serde(default)]
    pub status: Vec<Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub code: String,
    pub status_detail: Option<String>,
}

impl QueryResponse {
    /// Reshape the first result set into the node output.
    ///
    /// `summarizer` is only used to name the profile when the provider
    /// reports it as unavailable.
    pub fn into_output(self, summarizer: &str) -> Result<ChainOutput, UpstreamError> {
        let set = self
            .response_set
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::generic("Vectara response contained no result set"))?;

        let mut passages = Vec::with_capacity(set.response.len());
        for (position, item) in set.response.into_iter().enumerate() {
            let document = set.document.get(item.document_index).ok_or_else(|| {
                UpstreamError::Generic(format!(
                    "response {} references missing document {}",
                    position, item.document_index
                ))
            })?;
            let metadata = merge_metadata(&item.metadata, &document.metadata);
            passages.push((item.text, metadata));
        }

        let summary = set.summary.into_iter().next().unwrap_or_default();
        check_summary_status(&summary.status, summarizer)?;

        Ok(ChainOutput {
            text: summary.text,
            source_documents: passages
                .into_iter()
                .map(|(page_content, metadata)| Document {
                    page_content,
                    metadata,
                })
                .collect(),
        })
    }
}

/// Passage metadata overlaid with its document's metadata; document entries
/// win on key collision.
pub fn merge_metadata(
    response: &[MetadataEntry],
    document: &[MetadataEntry],
) -> Map<String, Value> {
    let mut merged = Map::new();
    for entry in response.iter().chain(document) {
        merged.insert(entry.name.clone(), entry.value.clone());
    }
    merged
}

fn check_summary_status(status: &[Status], summarizer: &str) -> Result<(), UpstreamError> {
    let Some(first) = status.first() else {
        return Ok(());
    };

    if first.code == STATUS_BAD_REQUEST {
        return Err(UpstreamError::BadRequest);
    }
    if first.code == STATUS_NOT_FOUND
        && first.status_detail.as_deref() == Some(SUMMARIZER_NOT_FOUND_DETAIL)
    {
        return Err(UpstreamError::InvalidSummarizer(summarizer.to_string()));
    }

    Ok(())
}
