//! Learn a new clause by analyzing a conflict.

use std::mem::swap;

use crate::clause::activity::{bump_clause_activity, ClauseActivity};
use crate::clause::{ClauseDb, ClauseRef};
use crate::decision::Vsids;
use crate::graph::{Conflict, ImplGraph, Reason};
use crate::lit::{Lit, Var};
use crate::vec_mut_scan::VecMutScan;

/// Temporaries for conflict analysis, reused across conflicts to avoid reallocating.
#[derive(Default)]
pub struct AnalyzeConflict {
    /// The learned clause after analysis finishes. The asserting literal is always at index 0.
    clause: Vec<Lit>,
    /// Number of literals of the current clause still unresolved at the conflict's decision level.
    current_level_count: usize,
    /// Whether each variable is currently part of the clause being built.
    var_flags: Vec<bool>,
    /// Entries to clear in `var_flags` once analysis finishes.
    to_clean: Vec<Var>,
    /// Clauses resolved on during analysis, bumped for clause-activity purposes.
    involved: Vec<ClauseRef>,
}

impl AnalyzeConflict {
    pub fn set_var_count(&mut self, count: usize) {
        self.var_flags.resize(count, false);
    }

    /// The learned clause, asserting literal first.
    pub fn clause(&self) -> &[Lit] {
        &self.clause
    }
}

/// The literals that caused a propagation, excluding the propagated literal itself.
///
/// The propagated literal is always kept at index 0 of its reason clause for as long as the
/// reason is live, so excluding it is just a slice.
fn reason_lits<'a>(db: &'a ClauseDb, reason: Reason) -> &'a [Lit] {
    match reason {
        Reason::Unit => &[],
        Reason::Clause(cref) => &db.clause(cref).lits[1..],
    }
}

/// Learn a new clause by analyzing `conflict`, first-UIP style.
///
/// Returns the decision level to backjump to, which is the second-highest decision level among
/// the learned clause's literals (or 0 if the clause has a single literal).
pub fn analyze_conflict(
    analyze: &mut AnalyzeConflict,
    vsids: &mut Vsids,
    db: &mut ClauseDb,
    activity: &mut ClauseActivity,
    graph: &ImplGraph,
    trail_lits: &[Lit],
    current_level: usize,
    conflict: Conflict,
) -> usize {
    analyze.clause.clear();
    analyze.involved.clear();
    analyze.current_level_count = 0;

    if current_level == 0 {
        // A conflict at the root level means the formula is unsatisfiable: the empty clause.
        return 0;
    }

    let Conflict(conflict_cref) = conflict;
    for &lit in &db.clause(conflict_cref).lits {
        add_literal(analyze, vsids, graph, current_level, lit);
    }
    analyze.involved.push(conflict_cref);

    // Resolve away every literal at the conflict's decision level but one, walking the trail in
    // reverse chronological order. The last one remaining is the first UIP.
    for &lit in trail_lits.iter().rev() {
        let lit_present = &mut analyze.var_flags[lit.index()];
        if !*lit_present {
            continue;
        }
        *lit_present = false;
        analyze.current_level_count -= 1;

        if analyze.current_level_count == 0 {
            analyze.clause.push(!lit);
            let end = analyze.clause.len() - 1;
            analyze.clause.swap(0, end);
            break;
        }

        let reason = graph.reason(lit.var());
        if let Reason::Clause(cref) = reason {
            analyze.involved.push(cref);
        }
        for &reason_lit in reason_lits(db, reason) {
            add_literal(analyze, vsids, graph, current_level, reason_lit);
        }
    }

    minimize_clause(analyze, db, graph);

    for var in analyze.to_clean.drain(..) {
        analyze.var_flags[var.index()] = false;
    }

    for &cref in &analyze.involved {
        bump_clause_activity(activity, db, cref);
    }

    // Move the highest-level literal besides the asserting one into position 1, so backtracking
    // to the returned level does not violate the two-watched-literal invariant for this clause.
    let mut backtrack_to = 0;
    if analyze.clause.len() > 1 {
        let (prefix, rest) = analyze.clause.split_at_mut(2);
        let lit_1 = &mut prefix[1];
        backtrack_to = graph.level(lit_1.var());
        for lit in rest.iter_mut() {
            let lit_level = graph.level(lit.var());
            if lit_level > backtrack_to {
                backtrack_to = lit_level;
                swap(lit_1, lit);
            }
        }
    }

    vsids.decay();

    backtrack_to
}

/// Add a literal to the clause being built, bumping its variable's EVSIDS activity.
fn add_literal(
    analyze: &mut AnalyzeConflict,
    vsids: &mut Vsids,
    graph: &ImplGraph,
    current_level: usize,
    lit: Lit,
) {
    let lit_level = graph.level(lit.var());
    // Literals set by unit clauses (decision level 0) can never be false, so they never need to
    // appear in a learned clause.
    if lit_level > 0 && !analyze.var_flags[lit.index()] {
        vsids.bump(lit.var());

        analyze.var_flags[lit.index()] = true;
        if lit_level == current_level {
            analyze.current_level_count += 1;
        } else {
            analyze.clause.push(lit);
            analyze.to_clean.push(lit.var());
        }
    }
}

/// Remove clause literals that are subsumed by their reason clause: `lit` is redundant if every
/// other literal of its reason clause is either already present (negated) in the clause being
/// built, or fixed at level 0 (and so can never be false).
///
/// This is a single-hop check, unlike full recursive minimization: it does not follow the
/// implication graph past the literal's immediate reason.
fn minimize_clause(analyze: &mut AnalyzeConflict, db: &ClauseDb, graph: &ImplGraph) {
    let mut scan = VecMutScan::new(&mut analyze.clause);

    // The asserting literal is always kept.
    scan.next();

    while let Some(lit) = scan.next() {
        let reason = graph.reason(lit.var());
        let redundant = match reason {
            Reason::Unit => false,
            Reason::Clause(_) => reason_lits(db, reason).iter().all(|&reason_lit| {
                analyze.var_flags[reason_lit.index()] || graph.level(reason_lit.var()) == 0
            }),
        };

        if redundant {
            lit.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::{lit, var};

    #[test]
    fn root_level_conflict_yields_empty_clause() {
        let mut analyze = AnalyzeConflict::default();
        let mut vsids = Vsids::default();
        let mut db = ClauseDb::default();
        let mut activity = ClauseActivity::default();
        let graph = ImplGraph::default();

        let cref = db.add_base_clause(vec![lit!(1), lit!(2)]);
        analyze.set_var_count(2);
        vsids.set_var_count(2);

        let level =
            analyze_conflict(&mut analyze, &mut vsids, &mut db, &mut activity, &graph, &[], 0, Conflict(cref));

        assert_eq!(level, 0);
        assert!(analyze.clause().is_empty());
    }

    #[test]
    fn learns_first_uip_clause() {
        // Decision x1@1, decision x2@2, x3 forced at level 2 by (x3 ∨ ¬x1 ∨ ¬x2), conflict on
        // (¬x2 ∨ ¬x3): two level-2 literals, so resolving x3 away via its reason is required.
        let mut analyze = AnalyzeConflict::default();
        let mut vsids = Vsids::default();
        let mut db = ClauseDb::default();
        let mut activity = ClauseActivity::default();
        let mut graph = ImplGraph::default();

        analyze.set_var_count(3);
        vsids.set_var_count(3);
        graph.set_var_count(3);

        // A reason clause's propagated literal is always at index 0.
        let reason_cref = db.add_base_clause(vec![lit!(3), lit!(-1), lit!(-2)]);
        let conflict_cref = db.add_base_clause(vec![lit!(-2), lit!(-3)]);

        graph.update(var!(1), Reason::Unit, 1);
        graph.update(var!(2), Reason::Unit, 2);
        graph.update(var!(3), Reason::Clause(reason_cref), 2);

        let trail = [lit!(1), lit!(2), lit!(3)];

        let level = analyze_conflict(
            &mut analyze,
            &mut vsids,
            &mut db,
            &mut activity,
            &graph,
            &trail,
            2,
            Conflict(conflict_cref),
        );

        // Resolving away x3 via its reason pulls in ¬x1 and ¬x2; ¬x2 is already present in the
        // building clause from the conflict clause itself and is then resolved away too, leaving
        // (¬x2 ∨ ¬x1) asserting ¬x2 after backjumping to level 1.
        assert_eq!(level, 1);
        assert_eq!(analyze.clause(), &[lit!(-2), lit!(-1)]);
    }
}
