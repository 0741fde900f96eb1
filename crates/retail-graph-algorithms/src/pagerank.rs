//! PageRank algorithm implementation
//!
//! Power iteration over the directed graph with teleportation. Mass held by
//! dangling nodes (out-degree 0) is spread uniformly over all nodes, so the
//! scores sum to 1.0 after every round.
//!
//! PR(u) = r/N + (1-r) * (Σ PR(v)/L(v) for v -> u  +  D/N)
//!
//! Where:
//! - r is the reset (teleport) probability
//! - N is the number of nodes
//! - L(v) is the out-degree of v, counting parallel edges
//! - D is the total score of dangling nodes

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Teleport probability (usually 0.15)
    pub reset_probability: f64,
    /// Exact number of rounds to run. There is no tolerance stop.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            reset_probability: 0.15,
            max_iterations: 3,
        }
    }
}

impl PageRankConfig {
    pub const fn with_reset_probability(mut self, reset_probability: f64) -> Self {
        self.reset_probability = reset_probability;
        self
    }

    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeId, f64> {
    let scores = page_rank_dense(view, config);

    let mut result = HashMap::with_capacity(scores.len());
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }
    result
}

/// PageRank scores indexed by dense node index
pub fn page_rank_dense(view: &GraphView, config: PageRankConfig) -> Vec<f64> {
    let n = view.node_count;

    if n == 0 {
        return Vec::new();
    }

    let n_f = n as f64;
    let mut scores = vec![1.0 / n_f; n];
    let mut next_scores = vec![0.0; n];

    let r = config.reset_probability;
    let teleport = r / n_f;

    for _ in 0..config.max_iterations {
        // Sequential sum keeps the dangling share bit-for-bit reproducible.
        let dangling: f64 = (0..n)
            .filter(|&i| view.out_degree(i) == 0)
            .map(|i| scores[i])
            .sum();
        let dangling_share = dangling / n_f;

        let current = &scores;
        next_scores
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, next)| {
                let mut sum_incoming = 0.0;
                for &source_idx in view.predecessors(i) {
                    sum_incoming += current[source_idx] / view.out_degree(source_idx) as f64;
                }
                *next = teleport + (1.0 - r) * (sum_incoming + dangling_share);
            });

        std::mem::swap(&mut scores, &mut next_scores);
    }

    scores
}
