//! Loading a formula into the solver.

use crate::assignment::{enqueue_assignment, restart};
use crate::clause::ClauseDb;
use crate::context::Context;
use crate::graph::Reason;
use crate::lit::Lit;
use crate::state::SatState;
use crate::watch::Watchlists;

/// Adds a clause to the current formula.
///
/// Removes duplicated literals, ignores tautological clauses (eg. x v -x v y), handles empty
/// clauses and dispatches among unit and longer clauses.
///
/// Does not adjust the solver's variable count. If necessary that has to be done before calling
/// this.
pub fn load_clause(ctx: &mut Context, lits: &[Lit]) {
    match ctx.solver_state.sat_state {
        SatState::Unsat => return,
        SatState::Sat => ctx.solver_state.sat_state = SatState::Unknown,
        SatState::Unknown => (),
    }

    // Restart the search whenever new clauses are added, since the current trail may no longer
    // be consistent with them.
    restart(&mut ctx.assignment, &mut ctx.trail, &mut ctx.vsids);

    let mut sorted_lits = lits.to_vec();
    sorted_lits.sort_unstable();
    sorted_lits.dedup();

    // Detect tautological clauses.
    let mut last = None;
    for &lit in &sorted_lits {
        if last == Some(!lit) {
            return;
        }
        last = Some(lit);
    }

    // Remove false literals, dropping the whole clause if it is already satisfied.
    let mut simplified_lits = Vec::with_capacity(sorted_lits.len());
    for &lit in &sorted_lits {
        match ctx.assignment.lit_value(lit) {
            Some(true) => return,
            Some(false) => (),
            None => simplified_lits.push(lit),
        }
    }

    match simplified_lits[..] {
        [] => ctx.solver_state.sat_state = SatState::Unsat,
        [lit] => {
            // Recorded as a one-literal base clause so the implication graph can cite a real
            // reason for this assignment; a single literal has nothing to watch.
            let cref = ctx.clause_db.add_base_clause(vec![lit]);
            enqueue_assignment(
                &mut ctx.assignment,
                &mut ctx.impl_graph,
                &mut ctx.trail,
                lit,
                Reason::Clause(cref),
            );
        }
        _ => add_base_clause(&mut ctx.clause_db, &mut ctx.watchlists, simplified_lits),
    }
}

fn add_base_clause(db: &mut ClauseDb, watchlists: &mut Watchlists, lits: Vec<Lit>) {
    let cref = db.add_base_clause(lits);
    watchlists.watch_clause(db, cref);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Tier;
    use cdcl_formula::lits;

    fn setup(n: usize) -> Context {
        let mut ctx = Context::default();
        ctx.set_var_count(n);
        ctx
    }

    #[test]
    fn unsat_on_empty_clause() {
        let mut ctx = setup(10);

        load_clause(&mut ctx, &[]);

        assert_eq!(ctx.solver_state.sat_state, SatState::Unsat);
    }

    #[test]
    fn unit_clauses() {
        let mut ctx = setup(10);

        load_clause(&mut ctx, &lits![1]);
        assert_eq!(ctx.trail.trail().len(), 1);

        load_clause(&mut ctx, &lits![3, -3]);
        assert_eq!(ctx.trail.trail().len(), 1);

        load_clause(&mut ctx, &lits![-2]);
        assert_eq!(ctx.trail.trail().len(), 2);

        load_clause(&mut ctx, &lits![1, 1]);
        assert_eq!(ctx.trail.trail().len(), 2);

        assert_eq!(ctx.solver_state.sat_state, SatState::Unknown);

        load_clause(&mut ctx, &lits![2]);
        assert_eq!(ctx.trail.trail().len(), 2);

        assert_eq!(ctx.solver_state.sat_state, SatState::Unsat);
    }

    #[test]
    fn long_clauses() {
        let mut ctx = setup(10);

        load_clause(&mut ctx, &lits![1, 2, 3]);
        assert_eq!(ctx.clause_db.base_len(), 1);

        load_clause(&mut ctx, &lits![-2, 3, 3, 4]);
        assert_eq!(ctx.clause_db.base_len(), 2);

        load_clause(&mut ctx, &lits![4, -5, 5, 2]);
        assert_eq!(ctx.clause_db.base_len(), 2);

        assert_eq!(ctx.solver_state.sat_state, SatState::Unknown);
    }

    #[test]
    fn two_literal_clauses_are_watched_like_any_other() {
        let mut ctx = setup(10);

        load_clause(&mut ctx, &lits![1, 2]);
        assert_eq!(ctx.clause_db.base_len(), 1);
        assert_eq!(ctx.clause_db.clause(0).tier, Tier::Core);
    }
}
