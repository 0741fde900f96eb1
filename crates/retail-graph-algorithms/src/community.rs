//! Community detection algorithms
//!
//! Weakly Connected Components by min-label propagation.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use std::collections::HashMap;

/// WCC configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WccConfig {
    /// Sweep cap. `None` means one sweep per node, which always exceeds
    /// the diameter.
    pub max_iterations: Option<usize>,
}

/// Result of WCC algorithm
#[derive(Debug, Clone)]
pub struct WccResult {
    /// Map of Component ID -> List of NodeIds, ascending
    pub components: HashMap<NodeId, Vec<NodeId>>,
    /// Map of NodeId -> Component ID
    ///
    /// The component ID is the NodeId of the component's first node in
    /// dense index order.
    pub node_component: HashMap<NodeId, NodeId>,
    /// Sweeps performed, including the final one that changed nothing
    pub iterations: usize,
    /// False when the cap stopped propagation before a fixpoint
    pub converged: bool,
}

impl WccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

/// Weakly Connected Components (WCC)
///
/// Finds all disjoint subgraphs in the graph.
/// Ignores edge direction.
pub fn weakly_connected_components(view: &GraphView, config: WccConfig) -> WccResult {
    let (labels, iterations, converged) = propagate_min_labels(view, config);

    let mut components: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    let mut node_component = HashMap::with_capacity(view.node_count);

    for (idx, &label) in labels.iter().enumerate() {
        let node_id = view.index_to_node[idx];
        let component_id = view.index_to_node[label];
        components.entry(component_id).or_default().push(node_id);
        node_component.insert(node_id, component_id);
    }
    for members in components.values_mut() {
        members.sort_unstable();
    }

    WccResult {
        components,
        node_component,
        iterations,
        converged,
    }
}

/// Labels by dense index, the number of sweeps run and whether a fixpoint was reached.
///
/// Every sweep reads only the labels committed by the previous sweep. A
/// label never increases, so a stopped run only ever leaves components
/// split, never wrongly merged.
pub fn propagate_min_labels(view: &GraphView, config: WccConfig) -> (Vec<usize>, usize, bool) {
    let n = view.node_count;
    let cap = config.max_iterations.unwrap_or(n);

    let mut labels: Vec<usize> = (0..n).collect();
    let mut next: Vec<usize> = labels.clone();

    if n == 0 {
        return (labels, 0, true);
    }

    let mut iterations = 0;
    while iterations < cap {
        iterations += 1;

        let current = &labels;
        let changed = next
            .par_iter_mut()
            .enumerate()
            .map(|(i, slot)| {
                let min = view
                    .neighbors(i)
                    .map(|j| current[j])
                    .fold(current[i], usize::min);
                *slot = min;
                min != current[i]
            })
            .reduce(|| false, |a, b| a || b);

        std::mem::swap(&mut labels, &mut next);

        if !changed {
            return (labels, iterations, true);
        }
    }

    (labels, iterations, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wcc() {
        // Nodes: 0..6
        // Edges: 0->1, 2->3->4, 5 (isolated)
        let view = GraphView::from_edges(6, &[(0, 1), (2, 3), (3, 4)]);

        let result = weakly_connected_components(&view, WccConfig::default());

        assert!(result.converged);
        assert_eq!(result.component_count(), 3);

        let c0 = result.node_component[&0];
        let c1 = result.node_component[&1];
        assert_eq!(c0, c1);
        assert_eq!(c0, 0);

        let c2 = result.node_component[&2];
        let c3 = result.node_component[&3];
        let c4 = result.node_component[&4];
        assert_eq!(c2, c3);
        assert_eq!(c3, c4);
        assert_ne!(c0, c2);

        assert_eq!(result.node_component[&5], 5);
        assert_eq!(result.components[&2], vec![2, 3, 4]);
    }

    #[test]
    fn test_direction_is_ignored() {
        // 3 -> 0 and 3 -> 1: 0 and 1 only meet through 3's outgoing edges
        let view = GraphView::from_edges(4, &[(3, 0), (3, 1)]);
        let result = weakly_connected_components(&view, WccConfig::default());
        assert_eq!(result.node_component[&1], 0);
        assert_eq!(result.node_component[&3], 0);
        assert_eq!(result.node_component[&2], 2);
    }

    #[test]
    fn test_no_edges_gives_singletons() {
        let view = GraphView::from_edges(3, &[]);
        let result = weakly_connected_components(&view, WccConfig::default());
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.component_count(), 3);
        for id in 0..3 {
            assert_eq!(result.node_component[&id], id);
        }
    }

    #[test]
    fn test_empty_graph() {
        let view = GraphView::from_edges(0, &[]);
        let result = weakly_connected_components(&view, WccConfig::default());
        assert!(result.converged);
        assert_eq!(result.component_count(), 0);
    }

    #[test]
    fn test_cap_reports_non_convergence() {
        // Path 0-1-2-3-4-5: label 0 needs five sweeps to reach node 5
        let edges: Vec<_> = (0..5).map(|i| (i + 1, i)).collect();
        let view = GraphView::from_edges(6, &edges);

        let (labels, iterations, converged) =
            propagate_min_labels(&view, WccConfig { max_iterations: Some(2) });
        assert!(!converged);
        assert_eq!(iterations, 2);
        assert_eq!(labels, vec![0, 0, 0, 1, 2, 3]);

        let full = weakly_connected_components(&view, WccConfig::default());
        assert!(full.converged);
        assert_eq!(full.component_count(), 1);
    }

    #[test]
    fn test_uses_node_ids_not_indices() {
        let mut outgoing = vec![Vec::new(); 3];
        let mut incoming = vec![Vec::new(); 3];
        outgoing[1].push(2);
        incoming[2].push(1);
        let view = GraphView::from_adjacency_list(vec![10, 20, 30], outgoing, incoming);

        let result = weakly_connected_components(&view, WccConfig::default());
        assert_eq!(result.node_component[&30], 20);
        assert_eq!(result.node_component[&10], 10);
    }
}
