//! In-memory graph storage implementation
//!
//! The store is bulk-loaded once and then frozen. Vertices are kept sorted
//! by id, and a vertex's position in that order is its dense `NodeId`, so
//! integer order on node ids matches string order on vertex ids.

use super::edge::Edge;
use super::types::{VertexId, VertexType};
use super::vertex::Vertex;
use retail_graph_algorithms::{GraphView, NodeId};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur while building or querying the graph
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("{0} vertex has an empty id")]
    EmptyVertexId(VertexType),

    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Vertex {0} appears more than once")]
    DuplicateVertex(VertexId),

    #[error("Invalid edge #{edge}: endpoint {vertex} does not exist")]
    DanglingEdge { edge: usize, vertex: VertexId },

    #[error("Invalid edge #{edge}: {vertex} is a {found}, expected a {expected}")]
    InvalidEdgeEndpoint {
        edge: usize,
        vertex: VertexId,
        expected: VertexType,
        found: VertexType,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Vertex and edge counts of a built graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStatistics {
    pub customer_count: usize,
    pub article_count: usize,
    pub edge_count: usize,
}

/// Immutable purchase graph
///
/// - vertices: sorted by id, position = NodeId
/// - index: VertexId -> position
/// - outgoing / incoming: position -> neighbour positions, in edge order
#[derive(Debug, Clone, Default)]
pub struct PurchaseGraph {
    vertices: Vec<Vertex>,
    index: FxHashMap<VertexId, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl PurchaseGraph {
    /// Bulk-load a graph from deduplicated vertices and purchase edges
    ///
    /// Fails on duplicate vertex ids, on edges whose endpoints are missing
    /// and on edges that do not run from a customer to an article.
    pub fn build(mut vertices: Vec<Vertex>, edges: Vec<Edge>) -> GraphResult<Self> {
        vertices.sort_by(|a, b| a.id.cmp(&b.id));

        let mut index = FxHashMap::default();
        index.reserve(vertices.len());
        for (idx, vertex) in vertices.iter().enumerate() {
            if vertex.id.is_empty() {
                return Err(GraphError::EmptyVertexId(vertex.vertex_type));
            }
            if index.insert(vertex.id.clone(), idx).is_some() {
                return Err(GraphError::DuplicateVertex(vertex.id.clone()));
            }
        }

        let mut outgoing = vec![Vec::new(); vertices.len()];
        let mut incoming = vec![Vec::new(); vertices.len()];

        for (edge_idx, edge) in edges.iter().enumerate() {
            let src = Self::endpoint(&vertices, &index, edge_idx, &edge.src, VertexType::Customer)?;
            let dst = Self::endpoint(&vertices, &index, edge_idx, &edge.dst, VertexType::Article)?;
            outgoing[src].push(dst);
            incoming[dst].push(src);
        }

        Ok(PurchaseGraph {
            vertices,
            index,
            edges,
            outgoing,
            incoming,
        })
    }

    fn endpoint(
        vertices: &[Vertex],
        index: &FxHashMap<VertexId, usize>,
        edge: usize,
        id: &VertexId,
        expected: VertexType,
    ) -> GraphResult<usize> {
        let idx = *index.get(id).ok_or_else(|| GraphError::DanglingEdge {
            edge,
            vertex: id.clone(),
        })?;
        let found = vertices[idx].vertex_type;
        if found != expected {
            return Err(GraphError::InvalidEdgeEndpoint {
                edge,
                vertex: id.clone(),
                expected,
                found,
            });
        }
        Ok(idx)
    }

    fn position(&self, id: &VertexId) -> GraphResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(id.clone()))
    }

    /// Get a vertex by id
    pub fn vertex(&self, id: &VertexId) -> Option<&Vertex> {
        self.index.get(id).map(|&idx| &self.vertices[idx])
    }

    /// Dense node id of a vertex
    pub fn node_id(&self, id: &VertexId) -> Option<NodeId> {
        self.index.get(id).map(|&idx| idx as NodeId)
    }

    /// All vertices, ascending by id
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, in load order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices of one type, ascending by id
    pub fn vertices_of_type(&self, vertex_type: VertexType) -> impl Iterator<Item = &Vertex> {
        self.vertices
            .iter()
            .filter(move |v| v.vertex_type == vertex_type)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of purchases made (customers) or 0 (articles)
    pub fn out_degree(&self, id: &VertexId) -> GraphResult<usize> {
        Ok(self.outgoing[self.position(id)?].len())
    }

    /// Number of purchases received (articles) or 0 (customers)
    pub fn in_degree(&self, id: &VertexId) -> GraphResult<usize> {
        Ok(self.incoming[self.position(id)?].len())
    }

    /// Articles bought by a customer, one entry per purchase
    pub fn successors(&self, id: &VertexId) -> GraphResult<impl Iterator<Item = &VertexId>> {
        let idx = self.position(id)?;
        Ok(self.outgoing[idx].iter().map(move |&n| &self.vertices[n].id))
    }

    /// Customers that bought an article, one entry per purchase
    pub fn predecessors(&self, id: &VertexId) -> GraphResult<impl Iterator<Item = &VertexId>> {
        let idx = self.position(id)?;
        Ok(self.incoming[idx].iter().map(move |&n| &self.vertices[n].id))
    }

    /// Undirected adjacency: successors followed by predecessors
    pub fn neighbors(&self, id: &VertexId) -> GraphResult<impl Iterator<Item = &VertexId>> {
        let idx = self.position(id)?;
        Ok(self.outgoing[idx]
            .iter()
            .chain(self.incoming[idx].iter())
            .map(move |&n| &self.vertices[n].id))
    }

    pub fn statistics(&self) -> GraphStatistics {
        let customer_count = self.vertices.iter().filter(|v| v.is_customer()).count();
        GraphStatistics {
            customer_count,
            article_count: self.vertices.len() - customer_count,
            edge_count: self.edges.len(),
        }
    }

    /// Dense CSR view for algorithm execution
    pub fn view(&self) -> GraphView {
        GraphView::from_adjacency_list(
            (0..self.vertices.len() as NodeId).collect(),
            self.outgoing.clone(),
            self.incoming.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn purchase(src: &str, dst: &str) -> Edge {
        let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        Edge::purchase(src, dst, date, 0.05, 2020, 1)
    }

    fn sample_graph() -> PurchaseGraph {
        let vertices = vec![
            Vertex::article("A2", None, None).unwrap(),
            Vertex::customer("C1", Some("Youth".into())).unwrap(),
            Vertex::article("A1", Some("Top".into()), Some("Red".into())).unwrap(),
            Vertex::customer("C2", None).unwrap(),
        ];
        let edges = vec![purchase("C1", "A1"), purchase("C2", "A1"), purchase("C2", "A2")];
        PurchaseGraph::build(vertices, edges).unwrap()
    }

    #[test]
    fn test_vertices_sorted_and_indexed() {
        let graph = sample_graph();
        let ids: Vec<_> = graph.vertices().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "C1", "C2"]);
        assert_eq!(graph.node_id(&"C1".into()), Some(2));
        assert_eq!(graph.vertices()[1].id.as_str(), "A2");
        assert_eq!(graph.vertex(&"A1".into()).unwrap().prod_name(), Some("Top"));
    }

    #[test]
    fn test_degrees_and_adjacency() {
        let graph = sample_graph();
        assert_eq!(graph.out_degree(&"C2".into()).unwrap(), 2);
        assert_eq!(graph.in_degree(&"A1".into()).unwrap(), 2);
        assert_eq!(graph.out_degree(&"A1".into()).unwrap(), 0);

        let bought: Vec<_> = graph.successors(&"C2".into()).unwrap().map(|v| v.as_str()).collect();
        assert_eq!(bought, vec!["A1", "A2"]);

        let buyers: Vec<_> = graph.predecessors(&"A1".into()).unwrap().map(|v| v.as_str()).collect();
        assert_eq!(buyers, vec!["C1", "C2"]);

        let around: Vec<_> = graph.neighbors(&"A1".into()).unwrap().map(|v| v.as_str()).collect();
        assert_eq!(around, vec!["C1", "C2"]);
    }

    #[test]
    fn test_unknown_vertex() {
        let graph = sample_graph();
        assert_eq!(
            graph.out_degree(&"nope".into()),
            Err(GraphError::VertexNotFound("nope".into()))
        );
        assert!(graph.vertex(&"nope".into()).is_none());
    }

    #[test]
    fn test_vertices_of_type() {
        let graph = sample_graph();
        let customers: Vec<_> = graph
            .vertices_of_type(VertexType::Customer)
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(customers, vec!["C1", "C2"]);
        assert_eq!(graph.vertices_of_type(VertexType::Article).count(), 2);
    }

    #[test]
    fn test_statistics() {
        let stats = sample_graph().statistics();
        assert_eq!(
            stats,
            GraphStatistics { customer_count: 2, article_count: 2, edge_count: 3 }
        );
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let vertices = vec![
            Vertex::customer("C1", None).unwrap(),
            Vertex::customer("C1", Some("Adult".into())).unwrap(),
        ];
        assert_eq!(
            PurchaseGraph::build(vertices, Vec::new()).unwrap_err(),
            GraphError::DuplicateVertex("C1".into())
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let vertices = vec![Vertex::customer("C1", None).unwrap()];
        let err = PurchaseGraph::build(vertices, vec![purchase("C1", "A9")]).unwrap_err();
        assert_eq!(err, GraphError::DanglingEdge { edge: 0, vertex: "A9".into() });
    }

    #[test]
    fn test_reversed_edge_rejected() {
        let vertices = vec![
            Vertex::customer("C1", None).unwrap(),
            Vertex::article("A1", None, None).unwrap(),
        ];
        let err = PurchaseGraph::build(vertices, vec![purchase("A1", "C1")]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidEdgeEndpoint { edge: 0, .. }));
    }

    #[test]
    fn test_view_matches_store() {
        let graph = sample_graph();
        let view = graph.view();
        assert_eq!(view.node_count, 4);
        assert_eq!(view.edge_count(), 3);
        // C2 (3) -> A1 (0), A2 (1)
        assert_eq!(view.successors(3), &[0, 1]);
        assert_eq!(view.in_degree(0), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = PurchaseGraph::build(Vec::new(), Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.view().node_count, 0);
    }
}
