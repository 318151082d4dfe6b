//! Clause database reduction: demoting stale `Mid` clauses and forgetting cold `Local` ones.

use crate::clause::{ClauseDb, ClauseRef, Tier};
use crate::config::SolverConfig;

/// Demote `Mid` clauses that have not been a reason for a conflict in the last
/// `config.demote_window` conflicts down to `Local`.
///
/// Run every `config.demote_period` conflicts.
pub fn demote_mids(db: &mut ClauseDb, config: &SolverConfig, conflicts: u64) {
    db.dedup_stale_tier_list(Tier::Mid);

    let stale: Vec<ClauseRef> = db
        .tier_refs(Tier::Mid)
        .iter()
        .copied()
        .filter(|&cref| {
            let clause = db.clause(cref);
            conflicts.saturating_sub(clause.last_conflict) > config.demote_window
        })
        .collect();

    for cref in stale {
        db.set_tier(cref, Tier::Local);
    }

    db.dedup_stale_tier_list(Tier::Mid);
}

/// Forget the least active half of `Local` clauses that are not currently a reason on the trail.
///
/// Run every `config.forget_period` conflicts.
pub fn forget_locals(db: &mut ClauseDb) {
    db.dedup_stale_tier_list(Tier::Local);

    let mut candidates: Vec<ClauseRef> = db
        .tier_refs(Tier::Local)
        .iter()
        .copied()
        .filter(|&cref| !db.clause(cref).is_reason)
        .collect();

    candidates.sort_unstable_by(|&a, &b| {
        db.clause(a)
            .activity
            .partial_cmp(&db.clause(b).activity)
            .unwrap()
    });

    let to_forget = candidates.len() / 2;
    for &cref in &candidates[..to_forget] {
        db.forget(cref);
    }

    db.dedup_stale_tier_list(Tier::Local);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::lits;

    #[test]
    fn demote_mids_moves_stale_clauses_to_local() {
        let mut db = ClauseDb::default();
        let config = SolverConfig::default();

        let fresh = db.add_learnt_clause(lits![1, 2].to_vec(), Tier::Mid, 5, 100);
        let stale = db.add_learnt_clause(lits![3, 4].to_vec(), Tier::Mid, 5, 0);

        demote_mids(&mut db, &config, 100 + config.demote_window + 1);

        assert_eq!(db.clause(fresh).tier, Tier::Mid);
        assert_eq!(db.clause(stale).tier, Tier::Local);
    }

    #[test]
    fn forget_locals_keeps_reasons_and_forgets_least_active_half() {
        let mut db = ClauseDb::default();

        db.add_learnt_clause(lits![1, 2].to_vec(), Tier::Local, 10, 0);
        let high = db.add_learnt_clause(lits![3, 4].to_vec(), Tier::Local, 10, 0);
        let reason = db.add_learnt_clause(lits![5, 6].to_vec(), Tier::Local, 10, 0);

        db.clause_mut(high).activity = 10.0;
        db.clause_mut(reason).activity = 0.0;
        db.clause_mut(reason).is_reason = true;

        forget_locals(&mut db);

        assert_eq!(db.count_by_tier(Tier::Local), 2, "half of the non-reason locals are forgotten");
        assert_eq!(db.clause(reason).lits, lits![5, 6].to_vec(), "reasons survive");
        assert_eq!(db.clause(high).lits, lits![3, 4].to_vec(), "the more active clause survives");
    }
}
