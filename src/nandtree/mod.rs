//! Staggered quantum walk evaluating a balanced binary NAND tree.
//!
//! The walker lives on a complete binary tree of the given depth plus a
//! tail vertex attached to the root. All amplitude starts on the tail, and
//! the overlap of the state with the tail after running distinguishes trees
//! with marked leaves from trees without.

use crate::core::{WalkError, WalkSimulator};

/// Staggered walk on a depth-`d` binary tree with a tail vertex.
#[derive(Debug, Clone)]
pub struct NandTreeWalk {
    depth: usize,
    // amplitudes[i] holds the 2^i nodes at depth i, root at depth 0
    amplitudes: Vec<Vec<f64>>,
    tail: f64,
    marked_leaves: Vec<bool>,
    t: usize,
}

impl NandTreeWalk {
    /// Creates a walk on a tree of the given depth. The initial state is
    /// fully concentrated on the tail.
    pub fn new(depth: usize) -> Result<Self, WalkError> {
        if depth == 0 {
            return Err(WalkError::InvalidParameter {
                message: "Tree depth must be positive".to_string(),
            });
        }
        if depth >= usize::BITS as usize - 1 {
            return Err(WalkError::InvalidParameter {
                message: format!("Tree depth {depth} is too large to index"),
            });
        }

        Ok(Self {
            depth,
            amplitudes: (0..=depth).map(|i| vec![0.0; 1 << i]).collect(),
            tail: 1.0,
            marked_leaves: vec![false; 1 << depth],
            t: 0,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn leaf_count(&self) -> usize {
        self.marked_leaves.len()
    }

    /// Amplitude of the tree node `node` at depth `node_depth`.
    pub fn node_amplitude(&self, node_depth: usize, node: usize) -> Result<f64, WalkError> {
        if node_depth > self.depth {
            return Err(WalkError::PositionOutOfRange {
                message: format!("Depth {} is outside [0, {}]", node_depth, self.depth),
            });
        }
        if node >= self.amplitudes[node_depth].len() {
            return Err(WalkError::PositionOutOfRange {
                message: format!(
                    "Node {} is outside [0, {}) at depth {}",
                    node,
                    self.amplitudes[node_depth].len(),
                    node_depth
                ),
            });
        }
        Ok(self.amplitudes[node_depth][node])
    }

    /// Probability of finding the walker on the tail vertex.
    pub fn tail_probability(&self) -> f64 {
        self.tail * self.tail
    }

    /// Probability of finding the walker anywhere in the tree.
    pub fn tree_probability(&self) -> f64 {
        self.amplitudes
            .iter()
            .flatten()
            .map(|a| a * a)
            .sum()
    }

    fn check_leaf(&self, leaf: usize) -> Result<(), WalkError> {
        if leaf >= self.marked_leaves.len() {
            return Err(WalkError::PositionOutOfRange {
                message: format!("Leaf {} is outside [0, {})", leaf, self.marked_leaves.len()),
            });
        }
        Ok(())
    }

    fn query(&mut self) {
        let leaves = &mut self.amplitudes[self.depth];
        for (leaf, amplitude) in leaves.iter_mut().enumerate() {
            if self.marked_leaves[leaf] {
                *amplitude = -*amplitude;
            }
        }
    }

    /// Reflection mixing the tail with the root. The coefficients depend on
    /// the leaf count so the tree walk implements the NAND evaluation.
    fn tessellate_tail(&mut self) {
        let n = self.marked_leaves.len() as f64;
        let a = 2.0 / n.sqrt() - 1.0;
        let b = 2.0 * (1.0 / n.sqrt() - 1.0 / n).sqrt();

        let tail = self.tail;
        let root = self.amplitudes[0][0];
        self.tail = a * tail + b * root;
        self.amplitudes[0][0] = b * tail - a * root;
    }

    /// Grover diffusion over a parent and its two children.
    fn tessellate(&mut self, node_depth: usize, node: usize) {
        let parent = self.amplitudes[node_depth][node];
        let left = self.amplitudes[node_depth + 1][2 * node];
        let right = self.amplitudes[node_depth + 1][2 * node + 1];
        let scaled = 2.0 * (parent + left + right) / 3.0;

        self.amplitudes[node_depth][node] = scaled - parent;
        self.amplitudes[node_depth + 1][2 * node] = scaled - left;
        self.amplitudes[node_depth + 1][2 * node + 1] = scaled - right;
    }

    fn tessellate_depths(&mut self, start: usize) {
        for node_depth in (start..self.depth).step_by(2) {
            for node in 0..1 << node_depth {
                self.tessellate(node_depth, node);
            }
        }
    }
}

impl WalkSimulator for NandTreeWalk {
    type Position = usize;

    fn vertex_count(&self) -> usize {
        // Tree nodes plus the tail.
        1 << (self.depth + 1)
    }

    fn current_step(&self) -> usize {
        self.t
    }

    fn run(&mut self, step_count: usize) -> Result<(), WalkError> {
        for _ in 0..step_count {
            self.query();
            // The two tessellations together cover every edge: the odd one
            // also reflects across the tail-root edge.
            self.tessellate_tail();
            self.tessellate_depths(1);
            self.tessellate_depths(0);
            self.t += 1;
        }
        Ok(())
    }

    fn mark_vertex(&mut self, leaf: usize) -> Result<(), WalkError> {
        self.check_leaf(leaf)?;
        self.marked_leaves[leaf] = true;
        Ok(())
    }

    fn unmark_vertex(&mut self, leaf: usize) -> Result<(), WalkError> {
        self.check_leaf(leaf)?;
        self.marked_leaves[leaf] = false;
        Ok(())
    }

    fn is_vertex_marked(&self, leaf: usize) -> Result<bool, WalkError> {
        self.check_leaf(leaf)?;
        Ok(self.marked_leaves[leaf])
    }

    /// Overlap with the initial state, which is the tail amplitude itself.
    fn scalar_product(&self) -> f64 {
        self.tail
    }

    fn vertex_probability(&self, leaf: usize) -> Result<f64, WalkError> {
        self.check_leaf(leaf)?;
        let a = self.amplitudes[self.depth][leaf];
        Ok(a * a)
    }

    fn marked_vertex_probability(&self) -> f64 {
        self.amplitudes[self.depth]
            .iter()
            .enumerate()
            .filter(|&(leaf, _)| self.marked_leaves[leaf])
            .map(|(_, a)| a * a)
            .sum()
    }

    fn total_probability(&self) -> f64 {
        self.tail_probability() + self.tree_probability()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn initial_state_sits_on_the_tail() {
        let walk = NandTreeWalk::new(3).unwrap();
        assert_eq!(walk.leaf_count(), 8);
        assert!((walk.tail_probability() - 1.0).abs() < TOLERANCE);
        assert!(walk.tree_probability().abs() < TOLERANCE);
        assert!((walk.scalar_product() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn one_step_on_the_smallest_tree_matches_the_reflection() {
        // Depth 1: the tail-root reflection has a = 2/sqrt(2) - 1 and the
        // later tessellation never touches the tail again.
        let mut walk = NandTreeWalk::new(1).unwrap();
        walk.run(1).unwrap();
        assert!((walk.scalar_product() - (2f64.sqrt() - 1.0)).abs() < TOLERANCE);
        assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn query_negates_only_marked_leaves() {
        let mut walk = NandTreeWalk::new(3).unwrap();
        walk.mark_vertex(5).unwrap();
        walk.amplitudes[3][5] = 0.7;
        walk.amplitudes[3][4] = 0.2;
        walk.query();
        assert!((walk.amplitudes[3][5] + 0.7).abs() < TOLERANCE);
        assert!((walk.amplitudes[3][4] - 0.2).abs() < TOLERANCE);
    }

    #[test]
    fn walk_stays_unitary_with_no_marked_leaves() {
        let mut walk = NandTreeWalk::new(4).unwrap();
        for _ in 0..10 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn marked_leaf_moves_the_overlap_off_the_tail() {
        let mut walk = NandTreeWalk::new(3).unwrap();
        walk.mark_vertex(5).unwrap();

        let mut min_overlap = walk.scalar_product();
        for _ in 0..20 {
            walk.run(1).unwrap();
            assert!((walk.total_probability() - 1.0).abs() < TOLERANCE);
            min_overlap = min_overlap.min(walk.scalar_product());
        }
        assert!(min_overlap < 0.9);
    }

    #[test]
    fn leaf_bookkeeping_checks_the_range() {
        let mut walk = NandTreeWalk::new(2).unwrap();
        walk.mark_vertex(3).unwrap();
        assert!(walk.is_vertex_marked(3).unwrap());
        walk.unmark_vertex(3).unwrap();
        assert!(!walk.is_vertex_marked(3).unwrap());

        assert!(matches!(
            walk.mark_vertex(4),
            Err(WalkError::PositionOutOfRange { .. })
        ));
        assert!(matches!(NandTreeWalk::new(0), Err(WalkError::InvalidParameter { .. })));
    }
}
