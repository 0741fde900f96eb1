//! Graph algorithms module
//!
//! Algorithms are implemented in the `retail-graph-algorithms` crate.
//! This module provides the integration/adapter layer: it runs them over a
//! `PurchaseGraph` and maps dense results back to vertex ids.

use crate::graph::{NodeId, PurchaseGraph, VertexId, VertexType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// Re-export algorithms
pub use retail_graph_algorithms::{
    page_rank, page_rank_dense, weakly_connected_components, PageRankConfig, WccConfig,
    WccResult,
};

/// PageRank score of one vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankScore {
    pub vertex_id: VertexId,
    pub vertex_type: VertexType,
    pub score: f64,
}

/// Component membership of one vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLabel {
    pub vertex_id: VertexId,
    pub vertex_type: VertexType,
    /// Smallest vertex id in the component
    pub component_id: VertexId,
    /// Node id of that smallest vertex; stable for one graph build
    pub component_ordinal: NodeId,
}

/// Full labelling of a graph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentLabels {
    /// One label per vertex, ascending by vertex id
    pub labels: Vec<ComponentLabel>,
    pub component_count: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// Run PageRank over the directed purchase graph
///
/// Returns one score per vertex, ascending by vertex id.
pub fn run_page_rank(graph: &PurchaseGraph, config: PageRankConfig) -> Vec<RankScore> {
    let view = graph.view();
    let scores = page_rank_dense(&view, config);

    debug!(
        vertices = view.node_count,
        edges = view.edge_count(),
        total = scores.iter().sum::<f64>(),
        "PageRank finished"
    );

    graph
        .vertices()
        .iter()
        .zip(scores)
        .map(|(vertex, score)| RankScore {
            vertex_id: vertex.id.clone(),
            vertex_type: vertex.vertex_type,
            score,
        })
        .collect()
}

/// Run weakly connected components over the purchase graph
///
/// Stopping at the sweep cap is not an error: the labels are returned with
/// `converged = false` and a warning is logged.
pub fn run_connected_components(graph: &PurchaseGraph, config: WccConfig) -> ComponentLabels {
    let view = graph.view();
    let result = weakly_connected_components(&view, config);

    if !result.converged {
        warn!(
            iterations = result.iterations,
            "Connected components stopped at the iteration cap before a fixpoint; \
             some components may be split"
        );
    }

    // Every dense index has a label, and every label is a dense index
    let vertices = graph.vertices();
    let labels = vertices
        .iter()
        .enumerate()
        .map(|(idx, vertex)| {
            let ordinal = result.node_component[&(idx as NodeId)];
            ComponentLabel {
                vertex_id: vertex.id.clone(),
                vertex_type: vertex.vertex_type,
                component_id: vertices[ordinal as usize].id.clone(),
                component_ordinal: ordinal,
            }
        })
        .collect();

    ComponentLabels {
        labels,
        component_count: result.component_count(),
        iterations: result.iterations,
        converged: result.converged,
    }
}
