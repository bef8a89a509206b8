// Graph Nodes Module
// Individual node implementations

pub mod vectara_qa;

pub use vectara_qa::{VectaraQaChainNode, VECTARA_STORE_INPUT};
