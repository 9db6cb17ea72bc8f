/// Coin policy, selected once at construction.
///
/// Controls which per-vertex reflection the Coin phase applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coin {
    /// The [AKR05] coin: Grover diffusion at unmarked vertices, identity
    /// at marked vertices.
    #[default]
    Akr,

    /// Grover's diffusion transformation at every vertex, marked or not.
    Grover,
}
