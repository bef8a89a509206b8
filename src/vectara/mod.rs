pub mod client;
pub mod request;
pub mod response;

pub use client::VectaraClient;
pub use request::{build_query_request, QueryRequest, SummarizerConfig};
pub use response::{merge_metadata, QueryResponse};
