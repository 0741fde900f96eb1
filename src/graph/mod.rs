//! Purchase graph data model
//!
//! This module implements the bipartite property graph:
//! - Customer and Article vertices with two optional property slots
//! - Directed PURCHASE edges, one per transaction (parallel edges allowed)
//! - A build-once store with adjacency lookups and a CSR export for algorithms

pub mod edge;
pub mod store;
pub mod types;
pub mod vertex;

// Re-export main types
pub use edge::Edge;
pub use store::{GraphError, GraphResult, GraphStatistics, PurchaseGraph};
pub use types::{EdgeType, VertexId, VertexType};
pub use vertex::Vertex;
pub use retail_graph_algorithms::NodeId;
