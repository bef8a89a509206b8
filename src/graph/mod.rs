// Graph Module
// Chain-node plugin surface exposed to the orchestration host

pub mod node;
pub mod registry;

pub mod nodes;

pub use node::{ChainNode, ChainOutput, Document, NodeData, NodeDescriptor, NodeInput, NodeParam};
pub use nodes::VectaraQaChainNode;
pub use registry::{default_registry, NodeRegistry};
