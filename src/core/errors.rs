use thiserror::Error;

/// Failures reported by (or while talking to) the Vectara query API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Vectara API returned status code {0}")]
    Status(u16),
    #[error(
        "BAD REQUEST: Too much text for the summarizer to summarize. Please try reducing the \
         number of search results to summarize, or the context of each result by adjusting \
         the 'summary_num_sentences', and 'summary_num_results' parameters respectively."
    )]
    BadRequest,
    #[error("BAD REQUEST: summarizer {0} is invalid for this account.")]
    InvalidSummarizer(String),
    #[error("{0}")]
    Generic(String),
}

impl UpstreamError {
    pub fn generic<E: std::fmt::Display>(err: E) -> Self {
        UpstreamError::Generic(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChainError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ChainError::Internal(err.to_string())
    }
}
