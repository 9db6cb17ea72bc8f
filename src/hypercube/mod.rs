//! Quantum walk search on the `n`-dimensional hypercube.

use crate::core::{Coin, WalkError, WalkSimulator};

/// Coined quantum walk on the hypercube `{0, 1}^n`.
///
/// Vertices are the integers `0..2^n` and the coin space of each vertex is
/// spanned by the `n` bit-flip directions. The shift along direction `j`
/// moves `|v, j>` to `|v XOR (1 << j), j>`, which is its own inverse.
#[derive(Debug, Clone)]
pub struct HypercubeWalk {
    dimension: usize,
    coin: Coin,
    // state[v * dimension + j] is the amplitude of |v, j>
    state: Vec<f64>,
    marked: Vec<bool>,
    t: usize,
}

impl HypercubeWalk {
    /// Creates a walk on the `dimension`-cube in the uniform initial state.
    pub fn new(dimension: usize, coin: Coin) -> Result<Self, WalkError> {
        if dimension == 0 {
            return Err(WalkError::InvalidParameter {
                message: "Hypercube dimension must be positive".to_string(),
            });
        }
        if dimension >= usize::BITS as usize {
            return Err(WalkError::InvalidParameter {
                message: format!("Hypercube dimension {dimension} is too large to index"),
            });
        }

        let vertex_count = 1usize << dimension;
        let amplitude = 1.0 / ((vertex_count * dimension) as f64).sqrt();
        Ok(Self {
            dimension,
            coin,
            state: vec![amplitude; vertex_count * dimension],
            marked: vec![false; vertex_count],
            t: 0,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    /// Amplitude of the directed state `|vertex, direction>`.
    pub fn vertex_amplitude(&self, vertex: usize, direction: usize) -> Result<f64, WalkError> {
        self.check_vertex(vertex)?;
        if direction >= self.dimension {
            return Err(WalkError::PositionOutOfRange {
                message: format!(
                    "Direction {} is outside [0, {})",
                    direction, self.dimension
                ),
            });
        }
        Ok(self.state[vertex * self.dimension + direction])
    }

    fn check_vertex(&self, v: usize) -> Result<(), WalkError> {
        if v >= self.marked.len() {
            return Err(WalkError::PositionOutOfRange {
                message: format!("Vertex {} is outside [0, {})", v, self.marked.len()),
            });
        }
        Ok(())
    }

    fn query(&mut self) {
        for v in 0..self.marked.len() {
            if !self.marked[v] {
                continue;
            }
            for j in 0..self.dimension {
                let i = v * self.dimension + j;
                self.state[i] = -self.state[i];
            }
        }
    }

    fn coin_flip(&mut self) {
        for v in 0..self.marked.len() {
            if self.coin == Coin::Akr && self.marked[v] {
                continue;
            }

            let base = v * self.dimension;
            let sum: f64 = self.state[base..base + self.dimension].iter().sum();
            let scaled = 2.0 * sum / self.dimension as f64;
            for j in 0..self.dimension {
                self.state[base + j] = scaled - self.state[base + j];
            }
        }
    }

    /// The shift pairs each slot with its image under the bit flip, so a
    /// double buffer keeps the exchange from clobbering itself.
    fn shift(&mut self) {
        let mut shifted = vec![0.0; self.state.len()];
        for v in 0..self.marked.len() {
            for j in 0..self.dimension {
                let neighbor = v ^ (1 << j);
                shifted[v * self.dimension + j] = self.state[neighbor * self.dimension + j];
            }
        }
        self.state = shifted;
    }

    fn vertex_probability_at(&self, v: usize) -> f64 {
        let base = v * self.dimension;
        self.state[base..base + self.dimension]
            .iter()
            .map(|a| a * a)
            .sum()
    }
}

impl WalkSimulator for HypercubeWalk {
    type Position = usize;

    fn vertex_count(&self) -> usize {
        self.marked.len()
    }

    fn current_step(&self) -> usize {
        self.t
    }

    fn run(&mut self, step_count: usize) -> Result<(), WalkError> {
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
        let amplitude_sum: f64 = self.state.iter().sum();
        amplitude_sum / ((self.marked.len() * self.dimension) as f64).sqrt()
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
        self.state.iter().map(|a| a * a).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn initial_state_is_normalized() {
        let walk = HypercubeWalk::new(4, Coin::Grover).unwrap();
        assert_eq!(walk.vertex_count(), 16);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn one_dimensional_search_alternates_exactly() {
        // On the 1-cube with vertex 0 marked, one step sends all the
        // probability onto the marked vertex's outgoing slot.
        let mut walk = HypercubeWalk::new(1, Coin::Grover).unwrap();
        walk.mark_vertex(0).unwrap();
        walk.run(1).unwrap();

        assert_eq!(walk.current_step(), 1);
        assert!(walk.scalar_product().abs() < TOLERANCE);
        assert!((walk.vertex_probability(0).unwrap() - 0.5).abs() < TOLERANCE);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn unmarked_walk_is_a_fixed_point() {
        let mut walk = HypercubeWalk::new(5, Coin::Akr).unwrap();
        walk.run(12).unwrap();
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn search_amplifies_the_marked_vertex() {
        let mut walk = HypercubeWalk::new(6, Coin::Akr).unwrap();
        walk.mark_vertex(21).unwrap();
        let initial = walk.marked_vertex_probability();

        let mut peak = initial;
        for _ in 0..16 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
            peak = peak.max(walk.marked_vertex_probability());
        }
        assert!(peak > 10.0 * initial);
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        let mut walk = HypercubeWalk::new(3, Coin::Grover).unwrap();
        assert!(matches!(
            walk.mark_vertex(8),
            Err(WalkError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            walk.vertex_amplitude(0, 3),
            Err(WalkError::PositionOutOfRange { .. })
        ));
    }
}
