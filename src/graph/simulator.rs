use crate::core::{Coin, WalkError, WalkSimulator};
use crate::graph::Graph;

/// Coined quantum walk on an arbitrary undirected [`Graph`].
///
/// The coin space of a vertex is spanned by its incident edges, so one
/// amplitude pair is stored per edge: slot 0 belongs to the edge's `v1`
/// side and slot 1 to its `v2` side. The graph can be edited between runs;
/// the next [`run`] then restarts the walk from the uniform state over the
/// new edge set.
///
/// [`run`]: WalkSimulator::run
#[derive(Debug, Clone)]
pub struct GraphWalk {
    graph: Graph,
    coin: Coin,
    // incidence[v] lists (edge index, slot of v in that edge)
    incidence: Vec<Vec<(usize, usize)>>,
    amplitudes: Vec<[f64; 2]>,
    marked: Vec<bool>,
    t: usize,
    dirty: bool,
}

impl GraphWalk {
    /// Creates a walk over `graph` in the uniform initial state.
    pub fn new(graph: Graph, coin: Coin) -> Result<Self, WalkError> {
        let marked = vec![false; graph.vertex_count()];
        let mut walk = Self {
            graph,
            coin,
            incidence: Vec::new(),
            amplitudes: Vec::new(),
            marked,
            t: 0,
            dirty: false,
        };
        walk.reinitialize()?;
        Ok(walk)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    /// Adds an edge to the underlying graph. The state becomes stale and
    /// is rebuilt on the next [`run`](WalkSimulator::run).
    pub fn add_edge(&mut self, v1: usize, v2: usize) -> Result<(), WalkError> {
        self.graph.add_edge(v1, v2)?;
        self.dirty = true;
        Ok(())
    }

    /// Removes an edge from the underlying graph, staling the state like
    /// [`add_edge`](Self::add_edge).
    pub fn remove_edge(&mut self, v1: usize, v2: usize) -> Result<(), WalkError> {
        self.graph.remove_edge(v1, v2)?;
        self.dirty = true;
        Ok(())
    }

    /// Amplitude of the directed state `|from, to>`.
    pub fn directed_amplitude(&self, from: usize, to: usize) -> Result<f64, WalkError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        for &(edge, slot) in &self.incidence[from] {
            let e = self.graph.edges()[edge];
            let other = if slot == 0 { e.v2 } else { e.v1 };
            if other == to {
                return Ok(self.amplitudes[edge][slot]);
            }
        }
        Err(WalkError::PositionOutOfRange {
            message: format!("No edge between {from} and {to}"),
        })
    }

    fn reinitialize(&mut self) -> Result<(), WalkError> {
        if self.graph.edge_count() == 0 {
            return Err(WalkError::EmptyGraph {
                message: "Walk needs at least one edge".to_string(),
            });
        }

        self.incidence = vec![Vec::new(); self.graph.vertex_count()];
        for (i, e) in self.graph.edges().iter().enumerate() {
            self.incidence[e.v1].push((i, 0));
            self.incidence[e.v2].push((i, 1));
        }

        let amplitude = 1.0 / ((2 * self.graph.edge_count()) as f64).sqrt();
        self.amplitudes = vec![[amplitude; 2]; self.graph.edge_count()];
        self.t = 0;
        self.dirty = false;
        Ok(())
    }

    fn check_vertex(&self, v: usize) -> Result<(), WalkError> {
        if v >= self.graph.vertex_count() {
            return Err(WalkError::PositionOutOfRange {
                message: format!("Vertex {} is outside [0, {})", v, self.graph.vertex_count()),
            });
        }
        Ok(())
    }

    fn query(&mut self) {
        for v in 0..self.marked.len() {
            if !self.marked[v] {
                continue;
            }
            for &(edge, slot) in &self.incidence[v] {
                self.amplitudes[edge][slot] = -self.amplitudes[edge][slot];
            }
        }
    }

    /// Grover diffusion over each vertex's incident directions. Isolated
    /// vertices carry no amplitude and are skipped.
    fn coin_flip(&mut self) {
        for v in 0..self.incidence.len() {
            let degree = self.incidence[v].len();
            if degree == 0 {
                continue;
            }
            if self.coin == Coin::Akr && self.marked[v] {
                continue;
            }

            let sum: f64 = self.incidence[v]
                .iter()
                .map(|&(edge, slot)| self.amplitudes[edge][slot])
                .sum();
            let scaled = 2.0 * sum / degree as f64;

            for i in 0..degree {
                let (edge, slot) = self.incidence[v][i];
                self.amplitudes[edge][slot] = scaled - self.amplitudes[edge][slot];
            }
        }
    }

    fn shift(&mut self) {
        for pair in &mut self.amplitudes {
            pair.swap(0, 1);
        }
    }

    fn vertex_probability_at(&self, v: usize) -> f64 {
        self.incidence[v]
            .iter()
            .map(|&(edge, slot)| {
                let a = self.amplitudes[edge][slot];
                a * a
            })
            .sum()
    }
}

impl WalkSimulator for GraphWalk {
    type Position = usize;

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn current_step(&self) -> usize {
        self.t
    }

    fn run(&mut self, step_count: usize) -> Result<(), WalkError> {
        if self.dirty {
            self.reinitialize()?;
        }
        for _ in 0..step_count {
            self.query();
            self.coin_flip();
            self.shift();
            self.t += 1;
        }
        Ok(())
    }

    fn mark_vertex(&mut self, v: usize) -> Result<(), WalkError> {
        self.check_vertex(v)?;
        self.marked[v] = true;
        Ok(())
    }

    fn unmark_vertex(&mut self, v: usize) -> Result<(), WalkError> {
        self.check_vertex(v)?;
        self.marked[v] = false;
        Ok(())
    }

    fn is_vertex_marked(&self, v: usize) -> Result<bool, WalkError> {
        self.check_vertex(v)?;
        Ok(self.marked[v])
    }

    fn scalar_product(&self) -> f64 {
        let amplitude_sum: f64 = self.amplitudes.iter().map(|pair| pair[0] + pair[1]).sum();
        amplitude_sum / ((2 * self.graph.edge_count()) as f64).sqrt()
    }

    fn vertex_probability(&self, v: usize) -> Result<f64, WalkError> {
        self.check_vertex(v)?;
        Ok(self.vertex_probability_at(v))
    }

    fn marked_vertex_probability(&self) -> f64 {
        (0..self.marked.len())
            .filter(|&v| self.marked[v])
            .map(|v| self.vertex_probability_at(v))
            .sum()
    }

    fn total_probability(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|pair| pair[0] * pair[0] + pair[1] * pair[1])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn cycle(n: usize) -> Graph {
        let mut graph = Graph::new(n).unwrap();
        for v in 0..n {
            graph.add_edge(v, (v + 1) % n).unwrap();
        }
        graph
    }

    #[test]
    fn edgeless_graph_is_rejected() {
        let graph = Graph::new(3).unwrap();
        assert!(matches!(
            GraphWalk::new(graph, Coin::Grover),
            Err(WalkError::EmptyGraph { .. })
        ));
    }

    #[test]
    fn unmarked_walk_is_a_fixed_point() {
        let mut walk = GraphWalk::new(cycle(6), Coin::Grover).unwrap();
        walk.run(15).unwrap();
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn search_preserves_unitarity_on_irregular_graph() {
        // Star plus a pendant path, so degrees range from 1 to 4.
        let mut graph = Graph::new(6).unwrap();
        for v in 1..5 {
            graph.add_edge(0, v).unwrap();
        }
        graph.add_edge(4, 5).unwrap();

        for coin in [Coin::Akr, Coin::Grover] {
            let mut walk = GraphWalk::new(graph.clone(), coin).unwrap();
            walk.mark_vertex(0).unwrap();
            for _ in 0..20 {
                walk.run(1).unwrap();
                assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn editing_the_graph_restarts_the_walk() {
        let mut walk = GraphWalk::new(cycle(4), Coin::Akr).unwrap();
        walk.mark_vertex(2).unwrap();
        walk.run(5).unwrap();
        assert_eq!(walk.current_step(), 5);

        walk.add_edge(0, 2).unwrap();
        walk.run(0).unwrap();
        assert_eq!(walk.current_step(), 0);
        assert_eq!(walk.graph().edge_count(), 5);
        let expected = 1.0 / 10f64.sqrt();
        assert!((walk.directed_amplitude(0, 2).unwrap() - expected).abs() < TOLERANCE);
        // Marks survive the rebuild.
        assert!(walk.is_vertex_marked(2).unwrap());
    }

    #[test]
    fn removing_every_edge_fails_on_the_next_run() {
        let mut walk = GraphWalk::new(cycle(3), Coin::Grover).unwrap();
        for v in 0..3 {
            walk.remove_edge(v, (v + 1) % 3).unwrap();
        }
        assert!(matches!(walk.run(1), Err(WalkError::EmptyGraph { .. })));
    }
}
