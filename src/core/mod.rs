//! Core data structures and types

// Declare modules within core
pub mod coin;
pub mod error;
pub mod simulator;
pub(crate) mod torus;
pub mod vertex;

// Re-export public types for convenient access via `qwalk::core::TypeName`
pub use coin::Coin;
pub use error::WalkError;
pub use simulator::WalkSimulator;
pub use vertex::Vertex;
