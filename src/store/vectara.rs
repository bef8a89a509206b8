use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use super::{SearchStore, StoreQueryConfig, VectaraFilter};
use crate::core::config::VectaraSettings;
use crate::core::errors::ChainError;

const API_KEY_HEADER: &str = "x-api-key";
const CUSTOMER_ID_HEADER: &str = "customer-id";

/// Store handle for a Vectara account.
#[derive(Debug, Clone)]
pub struct VectaraStore {
    customer_id: String,
    corpus_ids: Vec<u32>,
    api_key: String,
    k: Option<u32>,
    filter: Option<VectaraFilter>,
}

impl VectaraStore {
    pub fn new(
        customer_id: impl Into<String>,
        corpus_ids: Vec<u32>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            corpus_ids,
            api_key: api_key.into(),
            k: None,
            filter: None,
        }
    }

    pub fn from_settings(settings: &VectaraSettings) -> Self {
        Self {
            customer_id: settings.customer_id.clone(),
            corpus_ids: settings.corpus_ids.clone(),
            api_key: settings.api_key.clone(),
            k: settings.k,
            filter: settings.filter.clone(),
        }
    }

    /// Store for a CLI run: `fallback_api_key` fills an empty configured key,
    /// `k` overrides the configured result count.
    pub fn resolve(
        settings: &VectaraSettings,
        fallback_api_key: Option<String>,
        k: Option<u32>,
    ) -> Self {
        let mut store = Self::from_settings(settings);
        if store.api_key.is_empty() {
            if let Some(key) = fallback_api_key {
                store.api_key = key;
            }
        }
        if let Some(k) = k {
            store.k = Some(k);
        }
        store
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_filter(mut self, filter: VectaraFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[async_trait]
impl SearchStore for VectaraStore {
    async fn json_headers(&self) -> Result<HeaderMap, ChainError> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, header_value("api key", &self.api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            CUSTOMER_ID_HEADER,
            header_value("customer id", &self.customer_id)?,
        );
        Ok(headers)
    }

    fn query_config(&self) -> StoreQueryConfig {
        StoreQueryConfig {
            k: self.k,
            corpus_ids: self.corpus_ids.clone(),
            customer_id: Some(self.customer_id.clone()),
            filter: self.filter.clone(),
        }
    }
}

fn header_value(label: &str, value: &str) -> Result<HeaderValue, ChainError> {
    HeaderValue::from_str(value).map_err(|_| {
        ChainError::Config(format!(
            "{} contains characters not allowed in a header",
            label
        ))
    })
}
