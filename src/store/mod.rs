//! Search-store handles consumed by the query node.
//!
//! A handle carries everything the node needs to address the provider:
//! credential headers plus the explicit [`StoreQueryConfig`] (result count,
//! corpora, account, metadata filter). The node never reaches into a concrete
//! store type.

mod vectara;

pub use vectara::VectaraStore;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::core::errors::ChainError;

/// Sentence-context window around each matched passage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub sentences_before: Option<u32>,
    pub sentences_after: Option<u32>,
}

/// Metadata filter and ranking knobs applied to every corpus key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectaraFilter {
    /// Provider filter expression, e.g. `doc.lang = 'en'`.
    pub filter: Option<String>,
    /// Lexical interpolation weight.
    pub lambda: Option<f64>,
    pub context_config: Option<ContextWindow>,
}

/// Query-relevant settings read off a store handle. Unset fields fall back
/// to the provider defaults when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQueryConfig {
    /// Number of results to return.
    pub k: Option<u32>,
    pub corpus_ids: Vec<u32>,
    pub customer_id: Option<String>,
    pub filter: Option<VectaraFilter>,
}

/// A configured handle to a hosted search store.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Headers (auth included) for JSON requests against the store.
    async fn json_headers(&self) -> Result<HeaderMap, ChainError>;

    fn query_config(&self) -> StoreQueryConfig;
}
