// src/lib.rs

//! `qwalk` - Discrete-time quantum walk search simulators
//!
//! This library simulates coined and staggered quantum walks searching for
//! marked vertices on toroidal 2D lattices, arbitrary undirected graphs,
//! hypercubes and binary NAND trees. Amplitudes are real, which is enough
//! for the Grover-style coins used throughout.

pub mod core;
pub mod graph;
pub mod grid2d;
pub mod hypercube;
pub mod nandtree;

// Re-export the most common types for easier top-level use
pub use core::{Coin, Vertex, WalkError, WalkSimulator};
pub use graph::{Graph, GraphWalk};
pub use grid2d::{HoneycombWalk, RectangleWalk, StaggeredRectangleWalk, TriangleWalk};
pub use hypercube::HypercubeWalk;
pub use nandtree::NandTreeWalk;

// Example 1: Searching a rectangular torus
// Marks one vertex of an 8x8 grid and watches its probability grow past
// the uniform baseline.
/// ```
/// use qwalk::{Coin, RectangleWalk, Vertex, WalkError, WalkSimulator};
///
/// fn main() -> Result<(), WalkError> {
///     let mut walk = RectangleWalk::new(8, 8, Coin::Akr)?;
///     walk.mark_vertex(Vertex::new(3, 5))?;
///
///     let baseline = walk.marked_vertex_probability();
///     let mut peak = baseline;
///     for _ in 0..12 {
///         walk.run(1)?;
///         peak = peak.max(walk.marked_vertex_probability());
///     }
///
///     assert!(peak > baseline);
///     assert!((walk.total_probability() - 1.0).abs() < 1e-9);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Exact one-step search on the 1-cube
// With vertex 0 marked, a single step drives the overlap with the uniform
// state to zero while half the probability sits on the target.
/// ```
/// use qwalk::{Coin, HypercubeWalk, WalkError, WalkSimulator};
///
/// fn main() -> Result<(), WalkError> {
///     let mut walk = HypercubeWalk::new(1, Coin::Grover)?;
///     walk.mark_vertex(0)?;
///     walk.run(1)?;
///
///     assert!(walk.scalar_product().abs() < 1e-9);
///     assert!((walk.vertex_probability(0)? - 0.5).abs() < 1e-9);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
