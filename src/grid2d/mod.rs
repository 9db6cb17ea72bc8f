//! Quantum walk search on two-dimensional lattices with periodic
//! boundaries.

pub mod honeycomb;
pub mod patterns;
pub mod rectangle;
pub mod staggered;
pub mod triangle;

pub use honeycomb::HoneycombWalk;
pub use rectangle::RectangleWalk;
pub use staggered::StaggeredRectangleWalk;
pub use triangle::TriangleWalk;
