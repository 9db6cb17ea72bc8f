use std::collections::HashSet;

use crate::core::{Vertex, WalkError, WalkSimulator};

// Side length of a tessellation patch.
const PATCH: usize = 2;

/// Staggered quantum walk on a rectangular grid with periodic boundaries.
///
/// Unlike the coined walks there is a single amplitude per vertex. One step
/// alternates Grover diffusion over two staggered tessellations of 2x2
/// patches, each preceded by the marked-vertex query, so evolution is
/// `D_beta Q D_alpha Q` where the beta tessellation is the alpha one shifted
/// by (1, 1).
#[derive(Debug, Clone)]
pub struct StaggeredRectangleWalk {
    height: usize,
    width: usize,
    state: Vec<f64>,
    marked: HashSet<Vertex>,
    t: usize,
}

impl StaggeredRectangleWalk {
    /// Creates a walk on a `height` x `width` torus in the uniform initial
    /// state. Both dimensions must be even so the 2x2 patches tile the
    /// torus exactly.
    pub fn new(height: usize, width: usize) -> Result<Self, WalkError> {
        if height == 0 || width == 0 {
            return Err(WalkError::InvalidParameter {
                message: format!("Lattice dimensions must be positive, got {height}x{width}"),
            });
        }
        if height % PATCH != 0 || width % PATCH != 0 {
            return Err(WalkError::InvalidParameter {
                message: format!(
                    "Staggered tessellation needs dimensions divisible by {PATCH}, got {height}x{width}"
                ),
            });
        }

        let amplitude = 1.0 / ((height * width) as f64).sqrt();
        Ok(Self {
            height,
            width,
            state: vec![amplitude; height * width],
            marked: HashSet::new(),
            t: 0,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn marked_vertices(&self) -> Vec<Vertex> {
        self.marked.iter().copied().collect()
    }

    /// Amplitude at a vertex.
    pub fn vertex_amplitude(&self, v: Vertex) -> Result<f64, WalkError> {
        self.check_position(v)?;
        Ok(self.state[self.index(v.x, v.y)])
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_position(&self, v: Vertex) -> Result<(), WalkError> {
        if v.x >= self.width {
            return Err(WalkError::PositionOutOfRange {
                message: format!("x = {} is outside [0, {})", v.x, self.width),
            });
        }
        if v.y >= self.height {
            return Err(WalkError::PositionOutOfRange {
                message: format!("y = {} is outside [0, {})", v.y, self.height),
            });
        }
        Ok(())
    }

    fn query(&mut self) {
        let marked: Vec<Vertex> = self.marked.iter().copied().collect();
        for v in marked {
            let i = self.index(v.x, v.y);
            self.state[i] = -self.state[i];
        }
    }

    /// Grover diffusion over every patch of the tessellation anchored at
    /// `(x_start, y_start)`.
    fn diffuse(&mut self, x_start: usize, y_start: usize) {
        for y in (y_start..self.height + y_start).step_by(PATCH) {
            for x in (x_start..self.width + x_start).step_by(PATCH) {
                self.diffuse_patch(x, y);
            }
        }
    }

    fn diffuse_patch(&mut self, x: usize, y: usize) {
        let mut sum = 0.0;
        for dy in 0..PATCH {
            for dx in 0..PATCH {
                sum += self.state[self.index((x + dx) % self.width, (y + dy) % self.height)];
            }
        }
        let scaled = 2.0 * sum / (PATCH * PATCH) as f64;

        for dy in 0..PATCH {
            for dx in 0..PATCH {
                let i = self.index((x + dx) % self.width, (y + dy) % self.height);
                self.state[i] = scaled - self.state[i];
            }
        }
    }
}

impl WalkSimulator for StaggeredRectangleWalk {
    type Position = Vertex;

    fn vertex_count(&self) -> usize {
        self.width * self.height
    }

    fn current_step(&self) -> usize {
        self.t
    }

    fn run(&mut self, step_count: usize) -> Result<(), WalkError> {
        for _ in 0..step_count {
            self.query();
            self.diffuse(0, 0);
            self.query();
            self.diffuse(1, 1);
            self.t += 1;
        }
        Ok(())
    }

    fn mark_vertex(&mut self, v: Vertex) -> Result<(), WalkError> {
        self.check_position(v)?;
        self.marked.insert(v);
        Ok(())
    }

    fn unmark_vertex(&mut self, v: Vertex) -> Result<(), WalkError> {
        self.check_position(v)?;
        self.marked.remove(&v);
        Ok(())
    }

    fn is_vertex_marked(&self, v: Vertex) -> Result<bool, WalkError> {
        self.check_position(v)?;
        Ok(self.marked.contains(&v))
    }

    fn scalar_product(&self) -> f64 {
        let amplitude_sum: f64 = self.state.iter().sum();
        amplitude_sum / ((self.height * self.width) as f64).sqrt()
    }

    fn vertex_probability(&self, v: Vertex) -> Result<f64, WalkError> {
        self.check_position(v)?;
        let a = self.state[self.index(v.x, v.y)];
        Ok(a * a)
    }

    fn marked_vertex_probability(&self) -> f64 {
        self.marked
            .iter()
            .map(|v| {
                let a = self.state[self.index(v.x, v.y)];
                a * a
            })
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
    fn initial_state_is_uniform() {
        let walk = StaggeredRectangleWalk::new(4, 6).unwrap();
        let expected = 1.0 / 24f64.sqrt();
        for y in 0..4 {
            for x in 0..6 {
                let a = walk.vertex_amplitude(Vertex::new(x, y)).unwrap();
                assert!((a - expected).abs() < TOLERANCE);
            }
        }
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        assert!(matches!(
            StaggeredRectangleWalk::new(3, 4),
            Err(WalkError::InvalidParameter { .. })
        ));
        assert!(matches!(
            StaggeredRectangleWalk::new(4, 5),
            Err(WalkError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn unmarked_walk_is_a_fixed_point() {
        let mut walk = StaggeredRectangleWalk::new(4, 4).unwrap();
        walk.run(25).unwrap();
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
        assert_eq!(walk.current_step(), 25);
    }

    #[test]
    fn search_preserves_unitarity_and_amplifies_the_target() {
        let mut walk = StaggeredRectangleWalk::new(8, 8).unwrap();
        walk.mark_vertex(Vertex::new(3, 3)).unwrap();
        let initial = walk.marked_vertex_probability();

        let mut peak = initial;
        for _ in 0..12 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
            peak = peak.max(walk.marked_vertex_probability());
        }
        assert!(peak > 5.0 * initial);
    }
}
