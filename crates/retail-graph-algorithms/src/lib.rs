pub mod common;
pub mod pagerank;
pub mod community;

pub use common::{GraphView, NodeId};
pub use pagerank::{page_rank, page_rank_dense, PageRankConfig};
pub use community::{weakly_connected_components, propagate_min_labels, WccConfig, WccResult};
