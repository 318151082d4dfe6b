//! Two-watched-literal propagation.

use crate::assignment::{enqueue_assignment, Assignment, Trail};
use crate::clause::{ClauseDb, ClauseRef};
use crate::graph::{Conflict, ImplGraph, Reason};
use crate::lit::Lit;

/// A clause watching a literal, with the other watched literal cached to short-circuit the common
/// case where the clause is already satisfied.
#[derive(Copy, Clone)]
struct Watch {
    cref: ClauseRef,
    blocking: Lit,
}

/// Per-literal watchlists.
#[derive(Default)]
pub struct Watchlists {
    watches: Vec<Vec<Watch>>,
}

impl Watchlists {
    pub fn set_var_count(&mut self, count: usize) {
        self.watches.resize_with(count * 2, Vec::new);
    }

    /// Start watching `clause[0]` and `clause[1]` for `cref`.
    pub fn watch_clause(&mut self, db: &ClauseDb, cref: ClauseRef) {
        let lits = &db.clause(cref).lits;
        debug_assert!(lits.len() >= 2);
        self.add_watch(!lits[0], cref, lits[1]);
        self.add_watch(!lits[1], cref, lits[0]);
    }

    fn add_watch(&mut self, lit: Lit, cref: ClauseRef, blocking: Lit) {
        self.watches[lit.code()].push(Watch { cref, blocking });
    }
}

/// Propagate all enqueued assignments, watching each newly-propagated literal's clauses in turn.
///
/// Returns the conflicting clause, if propagation derived a contradiction. On conflict, the
/// trail and watchlists are left exactly as they were at the point of conflict: the caller is
/// responsible for backjumping before propagating further.
pub fn propagate(
    watchlists: &mut Watchlists,
    db: &mut ClauseDb,
    assignment: &mut Assignment,
    graph: &mut ImplGraph,
    trail: &mut Trail,
) -> Option<Conflict> {
    while let Some(lit) = trail.pop_queue() {
        if let Some(conflict) = propagate_lit(watchlists, db, assignment, graph, trail, lit) {
            return Some(conflict);
        }
    }
    None
}

fn propagate_lit(
    watchlists: &mut Watchlists,
    db: &mut ClauseDb,
    assignment: &mut Assignment,
    graph: &mut ImplGraph,
    trail: &mut Trail,
    lit: Lit,
) -> Option<Conflict> {
    let false_lit = !lit;

    let mut i = 0;
    let mut j = 0;

    loop {
        // Each pass borrows `watchlists.watches[lit.code()]` only for as long as it takes to
        // either keep scanning it, find a new watch elsewhere, or determine the clause is unit.
        // The borrow must end before a new watch can be pushed into a (possibly different) list.
        let (watch, new_watch) = {
            let watches = &mut watchlists.watches[lit.code()];
            if i >= watches.len() {
                break;
            }
            let watch = watches[i];
            i += 1;

            if assignment.lit_is_true(watch.blocking) {
                watches[j] = watch;
                j += 1;
                continue;
            }

            let clause = db.clause_mut(watch.cref);
            if clause.lits[0] == false_lit {
                clause.lits.swap(0, 1);
            }
            debug_assert_eq!(clause.lits[1], false_lit);

            if clause.lits[0] != watch.blocking && assignment.lit_is_true(clause.lits[0]) {
                watches[j] = Watch {
                    cref: watch.cref,
                    blocking: clause.lits[0],
                };
                j += 1;
                continue;
            }

            let mut new_watch = None;
            for k in 2..clause.lits.len() {
                if !assignment.lit_is_false(clause.lits[k]) {
                    clause.lits.swap(1, k);
                    new_watch = Some(clause.lits[1]);
                    break;
                }
            }

            let blocking = clause.lits[0];
            (Watch { cref: watch.cref, blocking }, new_watch)
        };

        match new_watch {
            Some(new_watch) => {
                watchlists.watches[(!new_watch).code()].push(watch);
            }
            None => {
                let watches = &mut watchlists.watches[lit.code()];
                watches[j] = watch;
                j += 1;

                if assignment.lit_is_false(watch.blocking) {
                    while i < watches.len() {
                        watches[j] = watches[i];
                        i += 1;
                        j += 1;
                    }
                    watches.truncate(j);
                    return Some(Conflict(watch.cref));
                } else {
                    enqueue_assignment(assignment, graph, trail, watch.blocking, Reason::Clause(watch.cref));
                }
            }
        }
    }

    watchlists.watches[lit.code()].truncate(j);

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::lit;

    fn setup(n: usize) -> (Watchlists, ClauseDb, Assignment, ImplGraph, Trail) {
        let mut watchlists = Watchlists::default();
        let db = ClauseDb::default();
        let mut assignment = Assignment::default();
        let mut graph = ImplGraph::default();
        let trail = Trail::default();
        watchlists.set_var_count(n);
        assignment.set_var_count(n);
        graph.set_var_count(n);
        (watchlists, db, assignment, graph, trail)
    }

    #[test]
    fn unit_propagates_through_a_long_clause() {
        let (mut watchlists, mut db, mut assignment, mut graph, mut trail) = setup(3);

        let cref = db.add_base_clause(vec![lit!(1), lit!(2), lit!(3)]);
        watchlists.watch_clause(&db, cref);

        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(-1), Reason::Unit);
        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(-2), Reason::Unit);

        let conflict = propagate(&mut watchlists, &mut db, &mut assignment, &mut graph, &mut trail);
        assert!(conflict.is_none());
        assert!(assignment.lit_is_true(lit!(3)));
    }

    #[test]
    fn detects_conflict() {
        let (mut watchlists, mut db, mut assignment, mut graph, mut trail) = setup(2);

        let cref = db.add_base_clause(vec![lit!(1), lit!(2)]);
        watchlists.watch_clause(&db, cref);

        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(-1), Reason::Unit);
        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(-2), Reason::Unit);

        let conflict = propagate(&mut watchlists, &mut db, &mut assignment, &mut graph, &mut trail);
        assert!(matches!(conflict, Some(Conflict(c)) if c == cref));
    }

    #[test]
    fn blocking_literal_short_circuits_already_satisfied_clause() {
        let (mut watchlists, mut db, mut assignment, mut graph, mut trail) = setup(3);

        let cref = db.add_base_clause(vec![lit!(1), lit!(2), lit!(3)]);
        watchlists.watch_clause(&db, cref);

        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(2), Reason::Unit);
        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(-1), Reason::Unit);

        let conflict = propagate(&mut watchlists, &mut db, &mut assignment, &mut graph, &mut trail);
        assert!(conflict.is_none());
    }
}
