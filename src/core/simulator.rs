use crate::core::WalkError;

/// The contract shared by every topology engine.
///
/// A caller constructs an engine with its size parameters, marks one or more
/// vertices, then repeatedly calls [`run`](WalkSimulator::run); after each
/// call it reads the measurements. Engines never detect convergence on their
/// own; termination is caller-driven, typically by watching
/// [`scalar_product`](WalkSimulator::scalar_product) go negative or
/// [`marked_vertex_probability`](WalkSimulator::marked_vertex_probability)
/// peak.
pub trait WalkSimulator {
    /// Vertex identifier for this topology: [`Vertex`](crate::Vertex) for
    /// 2D lattices, `usize` for graphs, hypercubes and trees.
    type Position;

    /// Total number of vertices, fixed at construction.
    fn vertex_count(&self) -> usize;

    /// Number of completed Query/Coin/Shift cycles.
    fn current_step(&self) -> usize;

    /// Advances the walk by `step_count` steps. Each step applies Query,
    /// then Coin, then Shift, then increments the step counter.
    fn run(&mut self, step_count: usize) -> Result<(), WalkError>;

    /// Adds a vertex to the marked set. Marking an already-marked vertex is
    /// a no-op; marking never touches the amplitude state or step counter.
    fn mark_vertex(&mut self, position: Self::Position) -> Result<(), WalkError>;

    /// Removes a vertex from the marked set. Unmarking an unmarked vertex
    /// is a no-op.
    fn unmark_vertex(&mut self, position: Self::Position) -> Result<(), WalkError>;

    /// Queries the marked set.
    fn is_vertex_marked(&self, position: Self::Position) -> Result<bool, WalkError>;

    /// Overlap (inner product) of the current state with the initial
    /// state. For the coined and staggered walks, which start uniform and
    /// whose unmarked evolution fixes the uniform state, this stays at 1
    /// until a vertex is marked.
    fn scalar_product(&self) -> f64;

    /// Born-rule probability of measuring the given vertex: the sum of
    /// squared amplitudes over all its directions.
    fn vertex_probability(&self, position: Self::Position) -> Result<f64, WalkError>;

    /// Sum of `vertex_probability` over the marked set, the search success
    /// metric.
    fn marked_vertex_probability(&self) -> f64;

    /// Sum of `vertex_probability` over all vertices. Diagnostic only; must
    /// equal 1 within floating-point tolerance after every step.
    fn total_probability(&self) -> f64;
}
