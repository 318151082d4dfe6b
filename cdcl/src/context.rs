//! Central solver data structure.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analyze_conflict::AnalyzeConflict;
use crate::assignment::{Assignment, Trail};
use crate::clause::activity::ClauseActivity;
use crate::clause::ClauseDb;
use crate::config::SolverConfig;
use crate::decision::Vsids;
use crate::graph::ImplGraph;
use crate::model::Model;
use crate::schedule::Schedule;
use crate::state::SolverState;
use crate::watch::Watchlists;

/// Holds all data used by the solver.
///
/// Unlike some solvers that thread this through a field-splitting abstraction to let unrelated
/// borrows coexist, this solver has no concurrent or incremental use of a `Context` that would
/// need it, so its methods just take `&mut self`.
pub struct Context {
    pub analyze_conflict: AnalyzeConflict,
    pub assignment: Assignment,
    pub clause_activity: ClauseActivity,
    pub clause_db: ClauseDb,
    /// Scratch space for [`compute_glue`](crate::glue::compute_glue), indexed by decision level.
    pub glue_scratch: Vec<bool>,
    pub impl_graph: ImplGraph,
    pub model: Model,
    /// Source of randomness for phase-rotation decisions, seeded from `solver_config.random_seed`.
    pub rng: StdRng,
    pub schedule: Schedule,
    pub solver_config: SolverConfig,
    pub solver_state: SolverState,
    pub trail: Trail,
    pub vsids: Vsids,
    pub watchlists: Watchlists,
    var_count: usize,
}

impl Default for Context {
    fn default() -> Context {
        let solver_config = SolverConfig::default();
        Context {
            analyze_conflict: Default::default(),
            assignment: Default::default(),
            clause_activity: Default::default(),
            clause_db: Default::default(),
            glue_scratch: Default::default(),
            impl_graph: Default::default(),
            model: Default::default(),
            rng: StdRng::seed_from_u64(solver_config.random_seed),
            schedule: Default::default(),
            solver_config,
            solver_state: Default::default(),
            trail: Default::default(),
            vsids: Default::default(),
            watchlists: Default::default(),
            var_count: 0,
        }
    }
}

impl Context {
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        if count <= self.var_count {
            return;
        }
        self.var_count = count;
        self.analyze_conflict.set_var_count(count);
        self.assignment.set_var_count(count);
        self.impl_graph.set_var_count(count);
        self.vsids.set_var_count(count);
        self.watchlists.set_var_count(count);
    }

    /// Apply a new configuration, propagating decay changes and the RNG seed to the heuristics
    /// that cache them.
    pub fn set_config(&mut self, config: SolverConfig) {
        self.vsids.set_decay(config.vsids_decay);
        self.clause_activity.set_decay(config.clause_activity_decay);
        self.rng = StdRng::seed_from_u64(config.random_seed);
        self.solver_config = config;
    }
}
