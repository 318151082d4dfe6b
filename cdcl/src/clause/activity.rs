//! Clause activity bookkeeping.
//!
//! Mirrors the EVSIDS scheme used for variable activities (see [`crate::decision`]): activities
//! accumulate a per-bump increment that grows as activities decay, and rescale together once any
//! value would get too large to keep resolution.

use crate::clause::{ClauseDb, ClauseRef};

/// Rescale all clause activities once any one of them exceeds this value.
const RESCALE_LIMIT: f64 = 1e100;
const RESCALE_FACTOR: f64 = 1e-100;

/// Global state shared by all clause activity bumps and decays.
pub struct ClauseActivity {
    /// The value added to a clause's activity on bump.
    bump: f64,
    /// The inverse of the decay factor, so repeated decay calls grow `bump` geometrically instead
    /// of shrinking every stored activity.
    inv_decay: f64,
}

impl ClauseActivity {
    pub fn new(decay: f32) -> ClauseActivity {
        let mut activity = ClauseActivity {
            bump: 1.0,
            inv_decay: 1.0,
        };
        activity.set_decay(decay);
        activity
    }

    pub fn set_decay(&mut self, decay: f32) {
        assert!(decay < 1.0);
        assert!(decay > 1.0 / 16.0);
        self.inv_decay = 1.0 / f64::from(decay);
    }
}

impl Default for ClauseActivity {
    fn default() -> ClauseActivity {
        ClauseActivity::new(crate::config::SolverConfig::default().clause_activity_decay)
    }
}

/// Increase a clause's activity by the current bump amount, rescaling everything if necessary.
pub fn bump_clause_activity(activity: &mut ClauseActivity, db: &mut ClauseDb, cref: ClauseRef) {
    let clause = db.clause_mut(cref);
    clause.activity += activity.bump;

    if clause.activity > RESCALE_LIMIT {
        rescale_clause_activities(activity, db);
    }
}

fn rescale_clause_activities(activity: &mut ClauseActivity, db: &mut ClauseDb) {
    db.rescale_activities(RESCALE_FACTOR);
    activity.bump *= RESCALE_FACTOR;
}

/// Decay clause activities by increasing the bump amount for future bumps.
pub fn decay_clause_activities(activity: &mut ClauseActivity, db: &mut ClauseDb) {
    activity.bump *= activity.inv_decay;
    if activity.bump > RESCALE_LIMIT {
        rescale_clause_activities(activity, db);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::lits;

    #[test]
    fn bump_accumulates() {
        let mut activity = ClauseActivity::default();
        let mut db = ClauseDb::default();
        let cref = db.add_learnt_clause(lits![1, 2].to_vec(), crate::clause::Tier::Local, 5, 0);

        bump_clause_activity(&mut activity, &mut db, cref);
        bump_clause_activity(&mut activity, &mut db, cref);

        assert_eq!(db.clause(cref).activity, 2.0);
    }

    #[test]
    fn decay_grows_future_bumps() {
        let mut activity = ClauseActivity::new(0.5);
        let mut db = ClauseDb::default();
        let cref = db.add_learnt_clause(lits![1, 2].to_vec(), crate::clause::Tier::Local, 5, 0);

        decay_clause_activities(&mut activity, &mut db);
        bump_clause_activity(&mut activity, &mut db, cref);

        assert_eq!(db.clause(cref).activity, 2.0);
    }
}
