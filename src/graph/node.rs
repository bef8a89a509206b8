// Node trait and types
// Contract between chain nodes and the orchestration host

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::errors::ChainError;
use crate::store::SearchStore;

/// A declared input slot on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeParam {
    pub label: String,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl NodeParam {
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        param_type: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

/// What the host shows in its node palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub label: String,
    pub name: String,
    pub version: f32,
    #[serde(rename = "type")]
    pub node_type: String,
    pub icon: String,
    pub category: String,
    pub description: String,
    pub base_classes: Vec<String>,
    pub inputs: Vec<NodeParam>,
}

/// A resolved input value supplied by the host.
#[derive(Clone)]
pub enum NodeInput {
    VectorStore(Arc<dyn SearchStore>),
    Text(String),
}

impl std::fmt::Debug for NodeInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeInput::VectorStore(_) => f.write_str("VectorStore(..)"),
            NodeInput::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Per-invocation node data: the resolved values of the node's input slots.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub id: String,
    pub inputs: HashMap<String, NodeInput>,
}

impl NodeData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inputs: HashMap::new(),
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, input: NodeInput) -> Self {
        self.inputs.insert(name.into(), input);
        self
    }

    /// Resolve a vector-store slot, failing if it is unset or holds another kind.
    pub fn vector_store(&self, name: &str) -> Result<Arc<dyn SearchStore>, ChainError> {
        match self.inputs.get(name) {
            Some(NodeInput::VectorStore(store)) => Ok(store.clone()),
            Some(other) => Err(ChainError::BadRequest(format!(
                "input '{}' on node {} must be a vector store, got {:?}",
                name, self.id, other
            ))),
            None => Err(ChainError::BadRequest(format!(
                "input '{}' on node {} is not connected",
                name, self.id
            ))),
        }
    }
}

/// A retrieved passage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub page_content: String,
    pub metadata: Map<String, Value>,
}

/// Result of a QA chain run: the summarized answer and its sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainOutput {
    /// Summary text; omitted from the JSON when the response had no summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub source_documents: Vec<Document>,
}

/// ChainNode trait - every plugin node implements this
#[async_trait]
pub trait ChainNode: Send + Sync {
    fn descriptor(&self) -> &NodeDescriptor;

    /// Unique name the host registers the node under
    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Prepare the node before its first run
    async fn init(&self, _node_data: &NodeData) -> Result<(), ChainError> {
        Ok(())
    }

    /// Execute the node against `input`
    async fn run(&self, node_data: &NodeData, input: &str) -> Result<ChainOutput, ChainError>;
}
