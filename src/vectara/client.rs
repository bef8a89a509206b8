use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use super::request::QueryRequest;
use super::response::QueryResponse;
use crate::core::config::defaults::DEFAULT_ENDPOINT;
use crate::core::errors::UpstreamError;

#[derive(Clone)]
pub struct VectaraClient {
    base_url: String,
    client: Client,
}

impl VectaraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// POST `request` to `/v1/query` and parse the reply.
    ///
    /// Anything other than `200 OK` is reported as [`UpstreamError::Status`];
    /// transport and decoding failures become [`UpstreamError::Generic`].
    pub async fn query(
        &self,
        headers: HeaderMap,
        request: &QueryRequest,
    ) -> Result<QueryResponse, UpstreamError> {
        let url = format!("{}/v1/query", self.base_url);

        let res = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::generic)?;

        if res.status() != StatusCode::OK {
            tracing::warn!("Vectara query failed with status {}", res.status());
            return Err(UpstreamError::Status(res.status().as_u16()));
        }

        res.json::<QueryResponse>()
            .await
            .map_err(UpstreamError::generic)
    }
}

impl Default for VectaraClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
