//! Generators for commonly used sets of marked vertices.
//!
//! Each helper returns plain vertex lists so the same pattern can be fed
//! into any of the grid walks through [`WalkSimulator::mark_vertex`].
//!
//! [`WalkSimulator::mark_vertex`]: crate::core::WalkSimulator::mark_vertex

use std::collections::HashSet;

use rand::{Rng, RngExt};

use crate::core::{Vertex, WalkError};

/// A filled `x_count` x `y_count` block of vertices starting at
/// `(x_start, y_start)`, with the given stride between picked vertices on
/// each axis.
pub fn rect(
    x_count: usize,
    y_count: usize,
    x_step: usize,
    y_step: usize,
    x_start: usize,
    y_start: usize,
) -> Result<Vec<Vertex>, WalkError> {
    if x_step == 0 || y_step == 0 {
        return Err(WalkError::InvalidParameter {
            message: format!("Steps must be positive, got ({x_step}, {y_step})"),
        });
    }

    let mut vertices = Vec::with_capacity(x_count * y_count);
    for y_i in 0..y_count {
        for x_i in 0..x_count {
            vertices.push(Vertex::new(x_start + x_i * x_step, y_start + y_i * y_step));
        }
    }
    Ok(vertices)
}

/// A filled `k` x `k` square starting at `(x_start, y_start)`.
pub fn square(k: usize, x_start: usize, y_start: usize) -> Result<Vec<Vertex>, WalkError> {
    rect(k, k, 1, 1, x_start, y_start)
}

/// The boundary of a `k` x `k` square starting at `(x_start, y_start)`,
/// listed in ring order starting from the top-left corner.
pub fn perimeter(k: usize, x_start: usize, y_start: usize) -> Result<Vec<Vertex>, WalkError> {
    if k < 2 {
        return Err(WalkError::InvalidParameter {
            message: format!("Perimeter needs side length of at least 2, got {k}"),
        });
    }

    let mut vertices = Vec::with_capacity(4 * (k - 1));
    for i in 0..k - 1 {
        vertices.push(Vertex::new(x_start + i, y_start));
    }
    for i in 0..k - 1 {
        vertices.push(Vertex::new(x_start + k - 1, y_start + i));
    }
    for i in 0..k - 1 {
        vertices.push(Vertex::new(x_start + k - 1 - i, y_start + k - 1));
    }
    for i in 0..k - 1 {
        vertices.push(Vertex::new(x_start, y_start + k - 1 - i));
    }
    Ok(vertices)
}

/// Every other vertex of the perimeter of a `k` x `k` square, walking the
/// ring from the top-left corner. `k` must be even so the dashes close up
/// where the walk started.
pub fn dashed_perimeter(
    k: usize,
    x_start: usize,
    y_start: usize,
) -> Result<Vec<Vertex>, WalkError> {
    if k % 2 != 0 {
        return Err(WalkError::InvalidParameter {
            message: format!("Dashed perimeter needs an even side length, got {k}"),
        });
    }

    let ring = perimeter(k, x_start, y_start)?;
    Ok(ring.into_iter().step_by(2).collect())
}

/// `count` distinct vertices drawn uniformly from a `height` x `width`
/// grid.
pub fn random_vertices<R: Rng>(
    count: usize,
    height: usize,
    width: usize,
    rng: &mut R,
) -> Result<Vec<Vertex>, WalkError> {
    if count > height * width {
        return Err(WalkError::InvalidParameter {
            message: format!(
                "Cannot pick {count} distinct vertices from a {height}x{width} grid"
            ),
        });
    }

    let mut picked = HashSet::new();
    let mut vertices = Vec::with_capacity(count);
    while vertices.len() < count {
        let v = Vertex::new(rng.random_range(0..width), rng.random_range(0..height));
        if picked.insert(v) {
            vertices.push(v);
        }
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn rect_applies_start_and_stride() {
        let vertices = rect(2, 3, 2, 1, 4, 1).unwrap();
        assert_eq!(vertices.len(), 6);
        assert!(vertices.contains(&Vertex::new(4, 1)));
        assert!(vertices.contains(&Vertex::new(6, 3)));
        assert!(!vertices.contains(&Vertex::new(5, 1)));
    }

    #[test]
    fn perimeter_has_no_duplicates() {
        let vertices = perimeter(4, 0, 0).unwrap();
        assert_eq!(vertices.len(), 12);
        let unique: HashSet<_> = vertices.iter().collect();
        assert_eq!(unique.len(), 12);
        assert!(vertices.contains(&Vertex::new(0, 3)));
        assert!(!vertices.contains(&Vertex::new(1, 1)));
    }

    #[test]
    fn dashed_perimeter_takes_alternate_vertices() {
        let vertices = dashed_perimeter(4, 1, 1).unwrap();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0], Vertex::new(1, 1));

        assert!(matches!(
            dashed_perimeter(5, 0, 0),
            Err(WalkError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn random_vertices_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let vertices = random_vertices(10, 5, 6, &mut rng).unwrap();
        assert_eq!(vertices.len(), 10);
        let unique: HashSet<_> = vertices.iter().collect();
        assert_eq!(unique.len(), 10);
        for v in &vertices {
            assert!(v.x < 6 && v.y < 5);
        }

        assert!(matches!(
            random_vertices(26, 5, 5, &mut rng),
            Err(WalkError::InvalidParameter { .. })
        ));
    }
}
