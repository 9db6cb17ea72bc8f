use std::collections::HashSet;

use crate::core::torus;
use crate::core::{Coin, Vertex, WalkError, WalkSimulator};

/// Walk directions on the triangular lattice.
///
/// The triangular grid is simulated on its rectangular-grid equivalent with
/// six edges per vertex:
///
/// ```text
///    *       *
///   / \   =  | \
///  * - *     * - *
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Right = 1,
    DownLeft = 2,
    UpRight = 3,
    DownRight = 4,
    UpLeft = 5,
    /// The lackadaisical self-loop.
    SelfLoop = 6,
}

const LEFT: usize = Direction::Left as usize;
const RIGHT: usize = Direction::Right as usize;
const DOWN_LEFT: usize = Direction::DownLeft as usize;
const UP_RIGHT: usize = Direction::UpRight as usize;
const DOWN_RIGHT: usize = Direction::DownRight as usize;
const UP_LEFT: usize = Direction::UpLeft as usize;
const SELF: usize = Direction::SelfLoop as usize;

const DIRECTION_COUNT: usize = 6;
const SLOT_COUNT: usize = DIRECTION_COUNT + 1;
const MOVING: [usize; DIRECTION_COUNT] =
    [LEFT, RIGHT, DOWN_LEFT, UP_RIGHT, DOWN_RIGHT, UP_LEFT];

/// Coined quantum walk on a two-dimensional triangular grid with periodic
/// boundaries. Self-loop weight 0 gives the plain coined walk; a positive
/// weight gives the lackadaisical variant.
#[derive(Debug, Clone)]
pub struct TriangleWalk {
    height: usize,
    width: usize,
    coin: Coin,
    self_loop_weight: f64,
    state: Vec<f64>,
    marked: HashSet<Vertex>,
    t: usize,
}

impl TriangleWalk {
    /// Creates a walk on a `height` x `width` triangular torus in the
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
                for d in MOVING {
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

    /// Amplitude of a single (vertex, direction) slot.
    pub fn vertex_amplitude(&self, v: Vertex, direction: Direction) -> Result<f64, WalkError> {
        self.check_position(v)?;
        Ok(self.state[self.index(v.x, v.y, direction as usize)])
    }

    fn initial_amplitude(&self) -> f64 {
        let state_count = (DIRECTION_COUNT as f64 + self.self_loop_weight)
            * (self.height * self.width) as f64;
        1.0 / state_count.sqrt()
    }

    fn index(&self, x: usize, y: usize, direction: usize) -> usize {
        (y * self.width + x) * SLOT_COUNT + direction
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
            for d in 0..SLOT_COUNT {
                let i = self.index(v.x, v.y, d);
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

    fn grover_coin(&mut self, x: usize, y: usize) {
        let l = self.self_loop_weight;
        let sqrt_l = l.sqrt();

        let mut sum = sqrt_l * self.state[self.index(x, y, SELF)];
        for d in MOVING {
            sum += self.state[self.index(x, y, d)];
        }

        let scaled = 2.0 * sum / (DIRECTION_COUNT as f64 + l);

        for d in MOVING {
            let i = self.index(x, y, d);
            self.state[i] = scaled - self.state[i];
        }
        let i = self.index(x, y, SELF);
        self.state[i] = sqrt_l * scaled - self.state[i];
    }

    /// Flip-flop shift over the three edge families of the triangular grid:
    ///
    /// ```text
    /// |x, y, Right>     <=> |x+1, y,   Left>
    /// |x, y, UpRight>   <=> |x,   y+1, DownLeft>
    /// |x, y, DownRight> <=> |x+1, y-1, UpLeft>
    /// ```
    fn shift(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let right = self.index(x, y, RIGHT);
                let left = self.index(torus::wrap(x as isize + 1, self.width), y, LEFT);
                self.state.swap(right, left);

                let up_right = self.index(x, y, UP_RIGHT);
                let down_left =
                    self.index(x, torus::wrap(y as isize + 1, self.height), DOWN_LEFT);
                self.state.swap(up_right, down_left);

                let down_right = self.index(x, y, DOWN_RIGHT);
                let up_left = self.index(
                    torus::wrap(x as isize + 1, self.width),
                    torus::wrap(y as isize - 1, self.height),
                    UP_LEFT,
                );
                self.state.swap(down_right, up_left);
            }
        }
    }

    fn vertex_probability_at(&self, x: usize, y: usize) -> f64 {
        (0..SLOT_COUNT)
            .map(|d| {
                let a = self.state[self.index(x, y, d)];
                a * a
            })
            .sum()
    }
}

impl WalkSimulator for TriangleWalk {
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
                for d in MOVING {
                    amplitude_sum += self.state[self.index(x, y, d)];
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
        let walk = TriangleWalk::new(5, 5, Coin::Akr).unwrap();
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn unmarked_walk_is_a_fixed_point() {
        let mut walk = TriangleWalk::new(4, 6, Coin::Grover).unwrap();
        walk.run(20).unwrap();
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn diagonal_shift_wraps_both_axes() {
        let mut walk = TriangleWalk::new(3, 3, Coin::Akr).unwrap();

        // DownRight at (2, 0) must land in UpLeft at (0, 2).
        let i = walk.index(2, 0, DOWN_RIGHT);
        walk.state[i] = 0.5;
        walk.shift();
        let j = walk.index(0, 2, UP_LEFT);
        assert!((walk.state[j] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn search_preserves_unitarity() {
        let mut walk = TriangleWalk::with_self_loop(6, 6, Coin::Grover, 0.1).unwrap();
        walk.mark_vertex(Vertex::new(0, 0)).unwrap();
        for _ in 0..30 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        }
    }
}
