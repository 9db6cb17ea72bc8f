use std::collections::HashSet;

use crate::core::torus;
use crate::core::{Coin, Vertex, WalkError, WalkSimulator};

/// Walk directions on the rectangular lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
    /// The lackadaisical self-loop. Never moved by Shift; carries zero
    /// amplitude whenever the self-loop weight is 0.
    SelfLoop = 4,
}

// Direction shortcuts for internal indexing
const LEFT: usize = Direction::Left as usize;
const RIGHT: usize = Direction::Right as usize;
const UP: usize = Direction::Up as usize;
const DOWN: usize = Direction::Down as usize;
const SELF: usize = Direction::SelfLoop as usize;

/// Number of moving directions (the self-loop is extra).
const DIRECTION_COUNT: usize = 4;

/// Storage slots per vertex, self-loop included.
const SLOT_COUNT: usize = DIRECTION_COUNT + 1;

/// Coined quantum walk on a two-dimensional rectangular grid with periodic
/// boundaries (a torus).
///
/// The lackadaisical variant is a configuration, not a subtype: construct
/// with [`with_self_loop`](RectangleWalk::with_self_loop) and a weight
/// `l > 0` to attach a weighted self-loop to every vertex. Weight 0
/// reproduces the plain coined walk trajectory exactly.
#[derive(Debug, Clone)]
pub struct RectangleWalk {
    height: usize,
    width: usize,
    coin: Coin,
    self_loop_weight: f64,
    /// Amplitude per (vertex, direction) slot, row-major by vertex.
    state: Vec<f64>,
    marked: HashSet<Vertex>,
    t: usize,
}

impl RectangleWalk {
    /// Creates a walk on a `height` x `width` torus in the uniform initial
    /// state, with no self-loop.
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

        // Uniform initial state: 1/sqrt((4 + l)*H*W) on each moving
        // direction, scaled by sqrt(l) on the self-loop.
        let amplitude = walk.initial_amplitude();
        let self_amplitude = amplitude * self_loop_weight.sqrt();
        for y in 0..height {
            for x in 0..width {
                for d in [LEFT, RIGHT, UP, DOWN] {
                    let i = walk.index(x, y, d);
                    walk.state[i] = amplitude;
                }
                let i = walk.index(x, y, SELF);
                walk.state[i] = self_amplitude;
            }
        }

        Ok(walk)
    }

    /// Lattice height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Lattice width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Coin policy, fixed at construction.
    pub fn coin(&self) -> Coin {
        self.coin
    }

    /// Self-loop weight `l`, fixed at construction.
    pub fn self_loop_weight(&self) -> f64 {
        self.self_loop_weight
    }

    /// Marked vertices in unspecified order.
    pub fn marked_vertices(&self) -> Vec<Vertex> {
        self.marked.iter().copied().collect()
    }

    /// Amplitude of a single (vertex, direction) slot. The rendering hook.
    pub fn vertex_amplitude(&self, v: Vertex, direction: Direction) -> Result<f64, WalkError> {
        self.check_position(v)?;
        Ok(self.state[self.index(v.x, v.y, direction as usize)])
    }

    /// Probability contribution of a single (vertex, direction) slot.
    pub fn direction_probability(&self, v: Vertex, direction: Direction) -> Result<f64, WalkError> {
        let a = self.vertex_amplitude(v, direction)?;
        Ok(a * a)
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

    /// Oracle reflection: negate every amplitude slot of each marked vertex.
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
                    // D for unmarked, I for marked
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

    /// Grover diffusion about the local average:
    /// `C = 2|s_c><s_c| - I` with
    /// `|s_c> = 1/sqrt(4+l) (|left> + |right> + |up> + |down> + sqrt(l)|self>)`.
    fn grover_coin(&mut self, x: usize, y: usize) {
        let l = self.self_loop_weight;
        let sqrt_l = l.sqrt();

        let sum = self.state[self.index(x, y, LEFT)]
            + self.state[self.index(x, y, RIGHT)]
            + self.state[self.index(x, y, UP)]
            + self.state[self.index(x, y, DOWN)]
            + sqrt_l * self.state[self.index(x, y, SELF)];

        let scaled = 2.0 * sum / (DIRECTION_COUNT as f64 + l);

        for d in [LEFT, RIGHT, UP, DOWN] {
            let i = self.index(x, y, d);
            self.state[i] = scaled - self.state[i];
        }
        let i = self.index(x, y, SELF);
        self.state[i] = sqrt_l * scaled - self.state[i];
    }

    /// Flip-flop shift: exchange amplitudes across each undirected edge.
    fn shift(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                // |x, y, Right> <=> |x+1, y, Left>
                let right = self.index(x, y, RIGHT);
                let left = self.index(torus::wrap(x as isize + 1, self.width), y, LEFT);
                self.state.swap(right, left);

                // |x, y, Up> <=> |x, y+1, Down>
                let up = self.index(x, y, UP);
                let down = self.index(x, torus::wrap(y as isize + 1, self.height), DOWN);
                self.state.swap(up, down);
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

impl WalkSimulator for RectangleWalk {
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
                amplitude_sum += self.state[self.index(x, y, LEFT)]
                    + self.state[self.index(x, y, RIGHT)]
                    + self.state[self.index(x, y, UP)]
                    + self.state[self.index(x, y, DOWN)]
                    + sqrt_l * self.state[self.index(x, y, SELF)];
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
