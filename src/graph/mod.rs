//! Quantum walk search on arbitrary undirected graphs.

pub mod random;
pub mod simulator;

pub use simulator::GraphWalk;

use crate::core::WalkError;

/// An undirected edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub v1: usize,
    pub v2: usize,
}

/// A simple undirected graph over vertices `0..vertex_count`.
///
/// Self-loops and parallel edges are rejected on insertion, so the edge
/// list doubles as the coin-space basis of [`GraphWalk`].
#[derive(Debug, Clone)]
pub struct Graph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Result<Self, WalkError> {
        if vertex_count == 0 {
            return Err(WalkError::InvalidParameter {
                message: "Graph must have at least one vertex".to_string(),
            });
        }
        Ok(Self {
            vertex_count,
            edges: Vec::new(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edge(&self, v1: usize, v2: usize) -> bool {
        self.edges
            .iter()
            .any(|e| (e.v1 == v1 && e.v2 == v2) || (e.v1 == v2 && e.v2 == v1))
    }

    /// Number of edges incident to `v`.
    pub fn degree(&self, v: usize) -> Result<usize, WalkError> {
        self.check_vertex(v)?;
        Ok(self
            .edges
            .iter()
            .filter(|e| e.v1 == v || e.v2 == v)
            .count())
    }

    /// Adds the undirected edge `(v1, v2)`. Adding an edge that already
    /// exists is a no-op.
    pub fn add_edge(&mut self, v1: usize, v2: usize) -> Result<(), WalkError> {
        self.check_vertex(v1)?;
        self.check_vertex(v2)?;
        if v1 == v2 {
            return Err(WalkError::InvalidParameter {
                message: format!("Self-loop on vertex {v1} is not allowed"),
            });
        }
        if !self.has_edge(v1, v2) {
            self.edges.push(Edge { v1, v2 });
        }
        Ok(())
    }

    /// Removes the undirected edge `(v1, v2)` if present.
    pub fn remove_edge(&mut self, v1: usize, v2: usize) -> Result<(), WalkError> {
        self.check_vertex(v1)?;
        self.check_vertex(v2)?;
        self.edges
            .retain(|e| !((e.v1 == v1 && e.v2 == v2) || (e.v1 == v2 && e.v2 == v1)));
        Ok(())
    }

    fn check_vertex(&self, v: usize) -> Result<(), WalkError> {
        if v >= self.vertex_count {
            return Err(WalkError::PositionOutOfRange {
                message: format!("Vertex {} is outside [0, {})", v, self.vertex_count),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected_and_deduplicated() {
        let mut graph = Graph::new(4).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 0).unwrap();
        graph.add_edge(1, 2).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(1, 0));
        assert_eq!(graph.degree(1).unwrap(), 2);

        graph.remove_edge(2, 1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.has_edge(1, 2));
    }

    #[test]
    fn invalid_edges_are_rejected() {
        let mut graph = Graph::new(3).unwrap();
        assert!(matches!(
            graph.add_edge(0, 3),
            Err(WalkError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            graph.add_edge(1, 1),
            Err(WalkError::InvalidParameter { .. })
        ));
        assert!(matches!(Graph::new(0), Err(WalkError::InvalidParameter { .. })));
    }
}
