//! Error handling logic

use std::fmt;

/// Error types for walk construction and marking operations.
///
/// Everything else in the crate is deterministic numeric computation with no
/// failure modes; any error listed here aborts the operation with no state
/// change.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum WalkError {
    /// A vertex coordinate or index lies outside the topology's domain.
    PositionOutOfRange {
        /// Which coordinate failed and its valid range
        message: String,
    },

    /// A construction parameter is unusable (zero-sized lattice, negative
    /// self-loop weight, tessellation-size mismatch, ...).
    InvalidParameter {
        /// Which parameter failed and why
        message: String,
    },

    /// The graph engine cannot initialize a uniform state over zero edges.
    EmptyGraph {
        /// Initialization failure message
        message: String,
    },
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::PositionOutOfRange { message } => {
                write!(f, "Position Out Of Range: {}", message)
            }
            WalkError::InvalidParameter { message } => {
                write!(f, "Invalid Parameter: {}", message)
            }
            WalkError::EmptyGraph { message } => write!(f, "Empty Graph: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for WalkError {}
