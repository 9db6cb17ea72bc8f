use std::collections::HashSet;

use crate::core::torus;
use crate::core::{Coin, Vertex, WalkError, WalkSimulator};

// The honeycomb grid is simulated on its rectangular-grid equivalent with
// three edges per vertex:
//
//    * - *       * - *
//   /     \      |   |
//  *       *  =  *   *
//   \     /      |   |
//    * - *       * - *
//
// The lattice is bipartite: the parity of x+y decides which three of the
// six possible directions exist at a vertex. Opposite directions share a
// storage slot, which is what makes the flip-flop shift a plain slot swap.
const LEFT: usize = 0; // even-parity vertices
const RIGHT: usize = 0; // odd-parity vertices
const UP_RIGHT: usize = 1; // even
const DOWN_LEFT: usize = 1; // odd
const DOWN_RIGHT: usize = 2; // even
const UP_LEFT: usize = 2; // odd
const SELF: usize = 3;

const DIRECTION_COUNT: usize = 3;
const SLOT_COUNT: usize = DIRECTION_COUNT + 1;

/// Walk directions on the honeycomb lattice. Directions other than the
/// self-loop exist only at vertices of the matching parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    UpRight,
    DownLeft,
    DownRight,
    UpLeft,
    SelfLoop,
}

impl Direction {
    fn slot(self) -> usize {
        match self {
            Direction::Left | Direction::Right => 0,
            Direction::UpRight | Direction::DownLeft => 1,
            Direction::DownRight | Direction::UpLeft => 2,
            Direction::SelfLoop => SELF,
        }
    }

    /// Parity of x + y at the vertices carrying this direction, or `None`
    /// for the self-loop, which every vertex carries.
    fn parity(self) -> Option<usize> {
        match self {
            Direction::Left | Direction::UpRight | Direction::DownRight => Some(0),
            Direction::Right | Direction::DownLeft | Direction::UpLeft => Some(1),
            Direction::SelfLoop => None,
        }
    }
}

/// Coined quantum walk on a honeycomb grid with periodic boundaries.
///
/// Both grid dimensions must be even, otherwise the torus identification
/// breaks the bipartition the direction layout relies on. Self-loop weight 0
/// gives the plain coined walk; a positive weight gives the lackadaisical
/// variant.
#[derive(Debug, Clone)]
pub struct HoneycombWalk {
    height: usize,
    width: usize,
    coin: Coin,
    self_loop_weight: f64,
    state: Vec<f64>,
    marked: HashSet<Vertex>,
    t: usize,
}

impl HoneycombWalk {
    /// Creates a walk on a `height` x `width` honeycomb torus in the
    /// uniform initial state, with no self-loop.
    pub fn new(height: usize, width: usize, coin: Coin) -> Result<Self, WalkError> {
        Self::with_self_loop(height, width, coin, 0.0)
    }

    /// Creates a lackadaisical walk with self-loop weight
    /// `self_loop_weight >= 0`.
    pub fn with_self_loop(
        height: usize,
        width: usize,
        coin: Coin,
        self_loop_weight: f64,
    ) -> Result<Self, WalkError> {
        if height == 0 || width == 0 {
            return Err(WalkError::InvalidParameter {
                message: format!("Lattice dimensions must be positive, got {height}x{width}"),
            });
        }
        if height % 2 != 0 || width % 2 != 0 {
            return Err(WalkError::InvalidParameter {
                message: format!(
                    "Honeycomb torus dimensions must be even to stay bipartite, got {height}x{width}"
                ),
            });
        }
        if !(self_loop_weight >= 0.0) {
            return Err(WalkError::InvalidParameter {
                message: format!("Self-loop weight must be non-negative, got {self_loop_weight}"),
            });
        }

        let mut walk = Self {
            height,
            width,
            coin,
            self_loop_weight,
            state: vec![0.0; width * height * SLOT_COUNT],
            marked: HashSet::new(),
            t: 0,
        };

        let amplitude = walk.initial_amplitude();
        let self_amplitude = amplitude * self_loop_weight.sqrt();
        for y in 0..height {
            for x in 0..width {
                // Same slot layout on both parities; only the direction
                // each slot names differs.
                for d in 0..DIRECTION_COUNT {
                    let i = walk.index(x, y, d);
                    walk.state[i] = amplitude;
                }
                let i = walk.index(x, y, SELF);
                walk.state[i] = self_amplitude;
            }
        }

        Ok(walk)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn self_loop_weight(&self) -> f64 {
        self.self_loop_weight
    }

    pub fn marked_vertices(&self) -> Vec<Vertex> {
        self.marked.iter().copied().collect()
    }

    /// Amplitude of a single (vertex, direction) slot. Asking for a
    /// direction the vertex's parity does not carry is an error.
    pub fn vertex_amplitude(&self, v: Vertex, direction: Direction) -> Result<f64, WalkError> {
        self.check_position(v)?;
        if let Some(parity) = direction.parity() {
            if (v.x + v.y) % 2 != parity {
                return Err(WalkError::PositionOutOfRange {
                    message: format!("Vertex {} has no {:?} direction", v, direction),
                });
            }
        }
        Ok(self.state[self.index(v.x, v.y, direction.slot())])
    }

    fn initial_amplitude(&self) -> f64 {
        let state_count = (DIRECTION_COUNT as f64 + self.self_loop_weight)
            * (self.height * self.width) as f64;
        1.0 / state_count.sqrt()
    }

    fn index(&self, x: usize, y: usize, slot: usize) -> usize {
        (y * self.width + x) * SLOT_COUNT + slot
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

    // --- Transformations ---

    fn query(&mut self) {
        let marked: Vec<Vertex> = self.marked.iter().copied().collect();
        for v in marked {
            for slot in 0..SLOT_COUNT {
                let i = self.index(v.x, v.y, slot);
                self.state[i] = -self.state[i];
            }
        }
    }

    fn coin_flip(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                match self.coin {
                    Coin::Akr => {
                        if !self.marked.contains(&Vertex::new(x, y)) {
                            self.grover_coin(x, y);
                        }
                    }
                    Coin::Grover => self.grover_coin(x, y),
                }
            }
        }
    }

    /// Grover diffusion `C = 2|s_c><s_c| - I` over the three populated
    /// directions plus the weighted self-loop. The formula is the same for
    /// both parities because the slot layout is.
    fn grover_coin(&mut self, x: usize, y: usize) {
        let l = self.self_loop_weight;
        let sqrt_l = l.sqrt();

        let mut sum = sqrt_l * self.state[self.index(x, y, SELF)];
        for slot in 0..DIRECTION_COUNT {
            sum += self.state[self.index(x, y, slot)];
        }

        let scaled = 2.0 * sum / (DIRECTION_COUNT as f64 + l);

        for slot in 0..DIRECTION_COUNT {
            let i = self.index(x, y, slot);
            self.state[i] = scaled - self.state[i];
        }
        let i = self.index(x, y, SELF);
        self.state[i] = sqrt_l * scaled - self.state[i];
    }

    /// Flip-flop shift. Iterating over even-parity vertices only touches
    /// each edge exactly once:
    ///
    /// ```text
    /// |x, y, Left>      <=> |x-1, y, Right>
    /// |x, y, UpRight>   <=> |x, y+1, DownLeft>
    /// |x, y, DownRight> <=> |x, y-1, UpLeft>
    /// ```
    fn shift(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if (x + y) % 2 != 0 {
                    continue;
                }

                let left = self.index(x, y, LEFT);
                let right = self.index(torus::wrap(x as isize - 1, self.width), y, RIGHT);
                self.state.swap(left, right);

                let up_right = self.index(x, y, UP_RIGHT);
                let down_left =
                    self.index(x, torus::wrap(y as isize + 1, self.height), DOWN_LEFT);
                self.state.swap(up_right, down_left);

                let down_right = self.index(x, y, DOWN_RIGHT);
                let up_left =
                    self.index(x, torus::wrap(y as isize - 1, self.height), UP_LEFT);
                self.state.swap(down_right, up_left);
            }
        }
    }

    fn vertex_probability_at(&self, x: usize, y: usize) -> f64 {
        (0..SLOT_COUNT)
            .map(|slot| {
                let a = self.state[self.index(x, y, slot)];
                a * a
            })
            .sum()
    }
}

impl WalkSimulator for HoneycombWalk {
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
            self.coin_flip();
            self.shift();
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
        let sqrt_l = self.self_loop_weight.sqrt();
        let mut amplitude_sum = 0.0;

        for y in 0..self.height {
            for x in 0..self.width {
                for slot in 0..DIRECTION_COUNT {
                    amplitude_sum += self.state[self.index(x, y, slot)];
                }
                amplitude_sum += sqrt_l * self.state[self.index(x, y, SELF)];
            }
        }

        amplitude_sum * self.initial_amplitude()
    }

    fn vertex_probability(&self, v: Vertex) -> Result<f64, WalkError> {
        self.check_position(v)?;
        Ok(self.vertex_probability_at(v.x, v.y))
    }

    fn marked_vertex_probability(&self) -> f64 {
        self.marked
            .iter()
            .map(|v| self.vertex_probability_at(v.x, v.y))
            .sum()
    }

    fn total_probability(&self) -> f64 {
        let mut probability = 0.0;
        for y in 0..self.height {
            for x in 0..self.width {
                probability += self.vertex_probability_at(x, y);
            }
        }
        probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn initial_state_is_normalized() {
        let walk = HoneycombWalk::new(6, 6, Coin::Grover).unwrap();
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        assert!(matches!(
            HoneycombWalk::new(5, 6, Coin::Grover),
            Err(WalkError::InvalidParameter { .. })
        ));
        assert!(matches!(
            HoneycombWalk::new(6, 3, Coin::Grover),
            Err(WalkError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn unmarked_walk_is_a_fixed_point() {
        let mut walk = HoneycombWalk::new(4, 4, Coin::Grover).unwrap();
        walk.run(20).unwrap();
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn shift_wraps_at_the_boundary() {
        let mut walk = HoneycombWalk::new(4, 4, Coin::Grover).unwrap();

        // Left at even vertex (0, 0) pairs with Right at (3, 0) across the
        // seam.
        let i = walk.index(0, 0, LEFT);
        walk.state[i] = 0.5;
        walk.shift();
        let j = walk.index(3, 0, RIGHT);
        assert!((walk.state[j] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn amplitude_accessor_respects_parity() {
        let walk = HoneycombWalk::new(4, 4, Coin::Grover).unwrap();
        let even = Vertex::new(2, 2);
        let odd = Vertex::new(1, 2);

        assert!(walk.vertex_amplitude(even, Direction::Left).is_ok());
        assert!(walk.vertex_amplitude(odd, Direction::Right).is_ok());
        assert!(walk.vertex_amplitude(even, Direction::SelfLoop).is_ok());
        assert!(matches!(
            walk.vertex_amplitude(even, Direction::Right),
            Err(WalkError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn search_preserves_unitarity() {
        let mut walk = HoneycombWalk::with_self_loop(6, 6, Coin::Grover, 0.05).unwrap();
        walk.mark_vertex(Vertex::new(0, 0)).unwrap();
        for _ in 0..30 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        }
    }
}
