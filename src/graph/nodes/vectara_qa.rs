// Vectara QA Chain Node
// Retrieval plus server-side summarization in a single provider call

use async_trait::async_trait;

use crate::core::errors::ChainError;
use crate::graph::node::{ChainNode, ChainOutput, NodeData, NodeDescriptor, NodeParam};
use crate::vectara::{build_query_request, SummarizerConfig, VectaraClient};

pub const VECTARA_STORE_INPUT: &str = "vectaraStore";

pub struct VectaraQaChainNode {
    descriptor: NodeDescriptor,
    client: VectaraClient,
    summarizer: SummarizerConfig,
}

impl VectaraQaChainNode {
    pub fn new() -> Self {
        Self::with_client(VectaraClient::default())
    }

    pub fn with_client(client: VectaraClient) -> Self {
        Self {
            descriptor: descriptor(),
            client,
            summarizer: SummarizerConfig::default(),
        }
    }

    pub fn with_summarizer(mut self, summarizer: SummarizerConfig) -> Self {
        self.summarizer = summarizer;
        self
    }
}

impl Default for VectaraQaChainNode {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor() -> NodeDescriptor {
    let node_type = "VectaraQAChain".to_string();
    NodeDescriptor {
        label: "Vectara QA Chain".to_string(),
        name: "vectaraQAChain".to_string(),
        version: 1.0,
        base_classes: vec![
            node_type.clone(),
            "VectorDBQAChain".to_string(),
            "BaseChain".to_string(),
        ],
        node_type,
        icon: "vectara.png".to_string(),
        category: "Chains".to_string(),
        description: "QA chain for Vectara".to_string(),
        inputs: vec![NodeParam::new(
            "Vectara Vector Store",
            VECTARA_STORE_INPUT,
            "VectorStore",
        )],
    }
}

#[async_trait]
impl ChainNode for VectaraQaChainNode {
    fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    async fn run(&self, node_data: &NodeData, input: &str) -> Result<ChainOutput, ChainError> {
        let store = node_data.vector_store(VECTARA_STORE_INPUT)?;
        let headers = store.json_headers().await?;
        let request = build_query_request(&store.query_config(), &self.summarizer, input);

        tracing::debug!(
            "Vectara query from {}: {} corpora, {} results requested",
            node_data.id,
            request.query[0].corpus_key.len(),
            request.query[0].num_results
        );

        let response = self.client.query(headers, &request).await?;
        let output = response.into_output(&self.summarizer.prompt_name)?;

        tracing::info!(
            "Vectara query returned {} source documents (summary: {})",
            output.source_documents.len(),
            output.text.is_some()
        );

        Ok(output)
    }
}
