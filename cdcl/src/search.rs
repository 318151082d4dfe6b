//! The core conflict-driven clause-learning search loop.

use crate::analyze_conflict::analyze_conflict;
use crate::assignment::{backtrack, enqueue_assignment};
use crate::clause::activity::decay_clause_activities;
use crate::clause::assess::select_tier;
use crate::context::Context;
use crate::decision::make_decision;
use crate::glue::compute_glue;
use crate::graph::{Conflict, Reason};
use crate::state::SatState;
use crate::watch::propagate;

/// Run a single step of the search.
///
/// Propagates all pending assignments, then either learns a clause from the resulting conflict,
/// restarts, or makes a new decision. Call repeatedly while the solver state is `Unknown`.
pub fn search_step(ctx: &mut Context) {
    let conflict = propagate(
        &mut ctx.watchlists,
        &mut ctx.clause_db,
        &mut ctx.assignment,
        &mut ctx.impl_graph,
        &mut ctx.trail,
    );

    match conflict {
        Some(conflict) => handle_conflict(ctx, conflict),
        None => decide(ctx),
    }
}

fn decide(ctx: &mut Context) {
    let rotation = ctx.schedule.phase_rotation(&ctx.solver_config);

    let decided = make_decision(
        &mut ctx.vsids,
        &mut ctx.assignment,
        &mut ctx.impl_graph,
        &mut ctx.trail,
        rotation,
        &mut ctx.rng,
    );

    if !decided {
        ctx.model.reconstruct(ctx.assignment.assignment());
        ctx.solver_state.sat_state = SatState::Sat;
    }
}

fn handle_conflict(ctx: &mut Context, conflict: Conflict) {
    ctx.schedule.record_conflict();

    if ctx.schedule.restart_due() {
        backtrack_clearing_reasons(ctx, 0);
        ctx.schedule.record_restart(&ctx.solver_config);
        return;
    }

    let current_level = ctx.trail.current_level();
    let backtrack_to = analyze_conflict(
        &mut ctx.analyze_conflict,
        &mut ctx.vsids,
        &mut ctx.clause_db,
        &mut ctx.clause_activity,
        &ctx.impl_graph,
        ctx.trail.trail(),
        current_level,
        conflict,
    );

    decay_clause_activities(&mut ctx.clause_activity, &mut ctx.clause_db);

    if ctx.analyze_conflict.clause().is_empty() {
        ctx.solver_state.sat_state = SatState::Unsat;
        return;
    }

    let learned = ctx.analyze_conflict.clause().to_vec();
    backtrack_clearing_reasons(ctx, backtrack_to);

    let asserted = learned[0];

    if learned.len() == 1 {
        enqueue_assignment(&mut ctx.assignment, &mut ctx.impl_graph, &mut ctx.trail, asserted, Reason::Unit);
    } else {
        if ctx.glue_scratch.len() < ctx.var_count() + 1 {
            ctx.glue_scratch.resize(ctx.var_count() + 1, false);
        }
        let lbd = compute_glue(&ctx.impl_graph, &mut ctx.glue_scratch, &learned);
        let tier = select_tier(lbd);
        let conflicts = ctx.schedule.conflicts();

        let cref = ctx.clause_db.add_learnt_clause(learned, tier, lbd, conflicts);
        ctx.watchlists.watch_clause(&ctx.clause_db, cref);

        enqueue_assignment(&mut ctx.assignment, &mut ctx.impl_graph, &mut ctx.trail, asserted, Reason::Clause(cref));
        ctx.clause_db.clause_mut(cref).is_reason = true;
    }

    ctx.schedule.maintain(&mut ctx.clause_db, &ctx.solver_config, ctx.var_count());
}

/// Backtrack to `level`, first clearing the `is_reason` flag of every clause that stops being a
/// reason as a result, so the clause database's forgetting pass never collects a clause that is
/// still locked by the trail.
fn backtrack_clearing_reasons(ctx: &mut Context, level: usize) {
    let current_level = ctx.trail.current_level();
    if level < current_level {
        let new_trail_len = ctx.trail.decisions()[level] as usize;
        for &lit in &ctx.trail.trail()[new_trail_len..] {
            if let Reason::Clause(cref) = ctx.impl_graph.reason(lit.var()) {
                ctx.clause_db.clause_mut(cref).is_reason = false;
            }
        }
    }

    backtrack(&mut ctx.assignment, &mut ctx.trail, &mut ctx.vsids, level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load_clause;
    use cdcl_formula::lits;

    #[test]
    fn solves_a_simple_satisfiable_formula() {
        let mut ctx = Context::default();
        ctx.set_var_count(2);

        load_clause(&mut ctx, &lits![1, 2]);
        load_clause(&mut ctx, &lits![-1, 2]);
        load_clause(&mut ctx, &lits![1, -2]);

        while ctx.solver_state.sat_state == SatState::Unknown {
            search_step(&mut ctx);
        }

        assert_eq!(ctx.solver_state.sat_state, SatState::Sat);
        assert!(ctx.model.lit_is_true(lits![1][0]));
        assert!(ctx.model.lit_is_true(lits![2][0]));
    }

    #[test]
    fn detects_unsatisfiable_formula() {
        let mut ctx = Context::default();
        ctx.set_var_count(2);

        load_clause(&mut ctx, &lits![1, 2]);
        load_clause(&mut ctx, &lits![1, -2]);
        load_clause(&mut ctx, &lits![-1, 2]);
        load_clause(&mut ctx, &lits![-1, -2]);

        while ctx.solver_state.sat_state == SatState::Unknown {
            search_step(&mut ctx);
        }

        assert_eq!(ctx.solver_state.sat_state, SatState::Unsat);
    }
}
