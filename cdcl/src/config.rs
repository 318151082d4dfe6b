//! Solver configuration.

/// Configurable parameters used during solving.
pub struct SolverConfig {
    /// Multiplicative decay for the EVSIDS decision heuristic. (Default: 0.95)
    pub vsids_decay: f64,

    /// Multiplicative decay for clause activities. (Default: 0.999)
    pub clause_activity_decay: f32,

    /// Conflicts between checks for `Mid` clauses to demote to `Local`. (Default: 10000)
    pub demote_period: u64,

    /// A `Mid` clause not used as a reason in this many conflicts is demoted to `Local`.
    /// (Default: 30000)
    pub demote_window: u64,

    /// Conflicts between forgetting the least active half of `Local` clauses. (Default: 15000)
    pub forget_period: u64,

    /// Scaling factor for the Luby-sequence restart schedule, in conflicts. (Default: 128)
    pub luby_restart_interval_scale: u64,

    /// Number of decisions between phase-saving rotation cases. (Default: 4)
    pub phase_rotation_period: u64,

    /// Seed for the decision heuristic's phase-rotation RNG. Solving the same formula with the
    /// same seed is deterministic. (Default: 0)
    pub random_seed: u64,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            vsids_decay: 0.95,
            clause_activity_decay: 0.999,
            demote_period: 10_000,
            demote_window: 30_000,
            forget_period: 15_000,
            luby_restart_interval_scale: 128,
            phase_rotation_period: 4,
            random_seed: 0,
        }
    }
}
