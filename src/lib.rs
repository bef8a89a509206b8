//! Vectara QA chain node for visual chain-orchestration hosts.
//!
//! The node hands a query to Vectara's hosted search-and-summarize API and
//! reshapes the reply into `{ text, sourceDocuments }`. Retrieval, ranking
//! and summarization all happen provider-side.

pub mod core;
pub mod graph;
pub mod store;
pub mod vectara;

pub use crate::core::errors::{ChainError, UpstreamError};
pub use graph::{ChainNode, ChainOutput, Document, NodeData, NodeInput, VectaraQaChainNode};
pub use store::{SearchStore, StoreQueryConfig, VectaraFilter, VectaraStore};
