//! Random graph generators for walk experiments.

use rand::{Rng, RngExt};

use crate::core::WalkError;
use crate::graph::Graph;

/// Erdos-Renyi `G(n, p)` graph: every vertex pair is connected
/// independently with probability `p`.
pub fn erdos_renyi<R: Rng>(
    vertex_count: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph, WalkError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(WalkError::InvalidParameter {
            message: format!("Edge probability must be in [0, 1], got {p}"),
        });
    }

    let mut graph = Graph::new(vertex_count)?;
    for i in 0..vertex_count {
        for j in 0..i {
            if rng.random::<f64>() < p {
                graph.add_edge(i, j)?;
            }
        }
    }
    Ok(graph)
}

/// Barabasi-Albert preferential attachment graph: starting from a complete
/// graph on `m + 1` vertices, each further vertex attaches to `m` distinct
/// existing vertices picked with probability proportional to their degree.
pub fn barabasi_albert<R: Rng>(
    vertex_count: usize,
    m: usize,
    rng: &mut R,
) -> Result<Graph, WalkError> {
    if m == 0 {
        return Err(WalkError::InvalidParameter {
            message: "Attachment count must be positive".to_string(),
        });
    }
    if vertex_count <= m {
        return Err(WalkError::InvalidParameter {
            message: format!(
                "Need more than {m} vertices for attachment count {m}, got {vertex_count}"
            ),
        });
    }

    let mut graph = Graph::new(vertex_count)?;

    // Each edge contributes both endpoints, so sampling this list uniformly
    // is degree-proportional sampling.
    let mut endpoints = Vec::new();
    for i in 0..=m {
        for j in 0..i {
            graph.add_edge(i, j)?;
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for v in m + 1..vertex_count {
        let mut targets = Vec::with_capacity(m);
        while targets.len() < m {
            let candidate = endpoints[rng.random_range(0..endpoints.len())];
            if !targets.contains(&candidate) {
                targets.push(candidate);
            }
        }
        for &target in &targets {
            graph.add_edge(v, target)?;
            endpoints.push(v);
            endpoints.push(target);
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn erdos_renyi_respects_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(11);

        let empty = erdos_renyi(8, 0.0, &mut rng).unwrap();
        assert_eq!(empty.edge_count(), 0);

        let complete = erdos_renyi(8, 1.0, &mut rng).unwrap();
        assert_eq!(complete.edge_count(), 8 * 7 / 2);

        assert!(matches!(
            erdos_renyi(8, 1.5, &mut rng),
            Err(WalkError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn barabasi_albert_has_expected_edge_count() {
        let mut rng = StdRng::seed_from_u64(23);
        let graph = barabasi_albert(30, 2, &mut rng).unwrap();

        // Seed triangle plus 2 edges per later vertex.
        assert_eq!(graph.edge_count(), 3 + 2 * 27);
        for v in 0..30 {
            assert!(graph.degree(v).unwrap() >= 2);
        }

        assert!(matches!(
            barabasi_albert(2, 2, &mut rng),
            Err(WalkError::InvalidParameter { .. })
        ));
    }
}
