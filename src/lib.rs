//! Retail Purchase Graph Analytics
//!
//! Builds a bipartite customer/article purchase graph from transaction rows
//! and runs two analytics over it: PageRank over articles and weakly
//! connected components over customers.
//!
//! # Architecture
//!
//! - `schema`: transaction rows -> deduplicated vertices and purchase edges
//! - `graph`: build-once `PurchaseGraph` with adjacency lookups
//! - `algo`: adapter over the `retail-graph-algorithms` crate
//! - `report`: top-k articles, customer communities, metadata records
//! - `table`: row sources, metadata sinks and sampling
//! - `pipeline`: one batch run wired from the pieces above
//!
//! ## Example Usage
//!
//! ```rust
//! use retail_graph::algo::{run_connected_components, run_page_rank, PageRankConfig, WccConfig};
//! use retail_graph::graph::{Edge, PurchaseGraph, Vertex};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2020, 9, 1).unwrap();
//! let vertices = vec![
//!     Vertex::customer("C1", Some("Adult".to_string())).unwrap(),
//!     Vertex::article("A1", Some("Tee".to_string()), Some("Black".to_string())).unwrap(),
//! ];
//! let edges = vec![Edge::purchase("C1", "A1", date, 0.02, 2020, 9)];
//! let graph = PurchaseGraph::build(vertices, edges).unwrap();
//!
//! let scores = run_page_rank(&graph, PageRankConfig::default());
//! assert_eq!(scores.len(), 2);
//!
//! let labels = run_connected_components(&graph, WccConfig::default());
//! assert_eq!(labels.component_count, 1);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod table;

// Re-export main types for convenience
pub use graph::{Edge, GraphError, GraphResult, PurchaseGraph, Vertex, VertexId, VertexType};

pub use algo::{ComponentLabel, ComponentLabels, PageRankConfig, RankScore, WccConfig};

pub use config::{ConfigError, PipelineConfig, ReportConfig};

pub use pipeline::{run, PipelineError, PipelineResult, RunSummary};

pub use report::{CustomerSegment, EnrichedRecord, MetadataRecord, Metric, TrendingArticle};

pub use schema::{map_rows, AgeBracket, MappedGraph, MappingStats, SchemaError, TransactionRow};

pub use table::{
    JsonLinesTable, JsonLinesTransactions, MemoryTable, MemoryTransactions, MetadataSink,
    MetadataSource, SampleConfig, Sampler, TableError, TransactionSource,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
