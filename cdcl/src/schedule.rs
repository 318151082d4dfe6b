//! Scheduling of restarts, clause reduction, and progress logging.

use log::info;

use crate::clause::reduce::{demote_mids, forget_locals};
use crate::clause::{ClauseDb, Tier};
use crate::config::SolverConfig;
use crate::decision::{rotation_for, PhaseRotation};

mod luby;

use luby::LubySequence;

/// Scheduling state: conflict and restart counters driving the Luby restart sequence and the
/// periodic clause database maintenance.
#[derive(Default)]
pub struct Schedule {
    conflicts: u64,
    next_restart: u64,
    restarts: u64,
    decisions: u64,
    luby: LubySequence,
}

impl Schedule {
    pub fn conflicts(&self) -> u64 {
        self.conflicts
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Whether a restart is due at the current conflict count.
    ///
    /// `>=` rather than `==`: consecutive conflicts never pass through a decision in between, so
    /// `conflicts` can step past `next_restart` without ever landing on it exactly.
    pub fn restart_due(&self) -> bool {
        self.conflicts >= self.next_restart
    }

    /// Record that a restart happened and schedule the next one.
    pub fn record_restart(&mut self, config: &SolverConfig) {
        self.restarts += 1;
        self.next_restart += config.luby_restart_interval_scale * self.luby.advance();
    }

    /// Record that a conflict happened.
    pub fn record_conflict(&mut self) {
        self.conflicts += 1;
    }

    /// The phase rotation case active for the next decision, and advance the counter.
    pub fn phase_rotation(&mut self, config: &SolverConfig) -> PhaseRotation {
        let rotation = rotation_for(self.decisions, config.phase_rotation_period);
        self.decisions += 1;
        rotation
    }

    /// Run the clause database's periodic demotion and forgetting passes if due, and log
    /// progress every 5000 conflicts.
    pub fn maintain(&self, db: &mut ClauseDb, config: &SolverConfig, live_vars: usize) {
        if self.conflicts > 0 && self.conflicts % config.demote_period == 0 {
            demote_mids(db, config, self.conflicts);
        }
        if self.conflicts > 0 && self.conflicts % config.forget_period == 0 {
            forget_locals(db);
        }
        if self.conflicts > 0 && self.conflicts % 5000 == 0 {
            info!(
                "confl: {}k rest: {} vars: {} core: {} mid: {} local: {}",
                self.conflicts / 1000,
                self.restarts,
                live_vars,
                db.count_by_tier(Tier::Core),
                db.count_by_tier(Tier::Mid),
                db.count_by_tier(Tier::Local)
            );
        }
    }
}
