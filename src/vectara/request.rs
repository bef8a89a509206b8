use serde::{Deserialize, Serialize};

use crate::core::config::defaults::{
    DEFAULT_LAMBDA, DEFAULT_MAX_SUMMARIZED_RESULTS, DEFAULT_RESPONSE_LANG,
    DEFAULT_SENTENCES_AFTER, DEFAULT_SENTENCES_BEFORE, DEFAULT_SUMMARIZER_PROMPT, DEFAULT_TOP_K,
};
use crate::store::StoreQueryConfig;

/// Server-side summarizer settings sent with every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub prompt_name: String,
    pub response_lang: String,
    pub max_summarized_results: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            prompt_name: DEFAULT_SUMMARIZER_PROMPT.to_string(),
            response_lang: DEFAULT_RESPONSE_LANG.to_string(),
            max_summarized_results: DEFAULT_MAX_SUMMARIZED_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub query: Vec<QueryBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub query: String,
    pub start: u32,
    pub num_results: u32,
    pub context_config: ContextConfig,
    pub corpus_key: Vec<CorpusKey>,
    pub summary: Vec<SummaryRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    pub sentences_after: u32,
    pub sentences_before: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusKey {
    pub customer_id: String,
    pub corpus_id: u32,
    pub metadata_filter: String,
    pub lexical_interpolation_config: LexicalInterpolation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalInterpolation {
    pub lambda: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub summarizer_prompt_name: String,
    pub response_lang: String,
    pub max_summarized_results: u32,
}

impl From<&SummarizerConfig> for SummaryRequest {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            summarizer_prompt_name: config.prompt_name.clone(),
            response_lang: config.response_lang.clone(),
            max_summarized_results: config.max_summarized_results,
        }
    }
}

/// Build the single-query request body for `query`. Pure: the same store
/// config, summarizer and text always produce the same body.
pub fn build_query_request(
    store: &StoreQueryConfig,
    summarizer: &SummarizerConfig,
    query: &str,
) -> QueryRequest {
    let filter = store.filter.clone().unwrap_or_default();
    let context = filter.context_config.clone().unwrap_or_default();
    let customer_id = store.customer_id.clone().unwrap_or_default();
    let metadata_filter = filter.filter.clone().unwrap_or_default();
    let lambda = filter.lambda.unwrap_or(DEFAULT_LAMBDA);

    let corpus_key = store
        .corpus_ids
        .iter()
        .map(|&corpus_id| CorpusKey {
            customer_id: customer_id.clone(),
            corpus_id,
            metadata_filter: metadata_filter.clone(),
            lexical_interpolation_config: LexicalInterpolation { lambda },
        })
        .collect();

    QueryRequest {
        query: vec![QueryBody {
            query: query.to_string(),
            start: 0,
            num_results: store.k.unwrap_or(DEFAULT_TOP_K),
            context_config: ContextConfig {
                sentences_after: context.sentences_after.unwrap_or(DEFAULT_SENTENCES_AFTER),
                sentences_before: context.sentences_before.unwrap_or(DEFAULT_SENTENCES_BEFORE),
            },
            corpus_key,
            summary: vec![SummaryRequest::from(summarizer)],
        }],
    }
}
