// Node Registry
// Name-keyed table of the nodes this plugin exports to the host

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::config::VectaraSettings;
use crate::core::errors::ChainError;
use crate::vectara::VectaraClient;

use super::node::{ChainNode, ChainOutput, NodeData, NodeDescriptor};
use super::nodes::VectaraQaChainNode;

#[derive(Default, Clone)]
pub struct NodeRegistry {
    nodes: HashMap<String, Arc<dyn ChainNode>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under its descriptor name, replacing any previous
    /// node with the same name.
    pub fn register(&mut self, node: Arc<dyn ChainNode>) -> &mut Self {
        let name = node.name().to_string();
        if self.nodes.insert(name.clone(), node).is_some() {
            tracing::warn!("Replaced previously registered node {}", name);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ChainNode>> {
        self.nodes.get(name).cloned()
    }

    /// Descriptors of all registered nodes, sorted by name.
    pub fn descriptors(&self) -> Vec<NodeDescriptor> {
        let mut descriptors: Vec<NodeDescriptor> = self
            .nodes
            .values()
            .map(|node| node.descriptor().clone())
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub async fn run(
        &self,
        name: &str,
        node_data: &NodeData,
        input: &str,
    ) -> Result<ChainOutput, ChainError> {
        let node = self
            .get(name)
            .ok_or_else(|| ChainError::NotFound(format!("node {}", name)))?;
        node.init(node_data).await?;
        node.run(node_data, input).await
    }
}

/// Build the registry of exported nodes from the `vectara` settings.
pub fn default_registry(settings: &VectaraSettings) -> NodeRegistry {
    let node = VectaraQaChainNode::with_client(VectaraClient::new(settings.endpoint.clone()))
        .with_summarizer(settings.summarizer.clone());

    let mut registry = NodeRegistry::new();
    registry.register(Arc::new(node));
    registry
}
