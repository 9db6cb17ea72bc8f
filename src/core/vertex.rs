use std::fmt;

/// A vertex of a two-dimensional lattice, identified by its grid coordinates.
///
/// Equality and hashing are structural, so vertices can be used as set and
/// map keys. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    /// Horizontal coordinate, `0 <= x < width`.
    pub x: usize,
    /// Vertical coordinate, `0 <= y < height`.
    pub y: usize,
}

impl Vertex {
    /// Creates a vertex at `(x, y)`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Vertex {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}
