//! Partial assignment, trail and backtracking.

use crate::decision::Vsids;
use crate::graph::{ImplGraph, Reason};
use crate::lit::{Lit, LitIdx, Var};

/// This compares two `Option<bool>` values as bytes. Workaround for bad code generation.
fn fast_option_eq(a: Option<bool>, b: Option<bool>) -> bool {
    unsafe { std::mem::transmute::<_, u8>(a) == std::mem::transmute::<_, u8>(b) }
}

/// Current partial assignment.
#[derive(Default)]
pub struct Assignment {
    assignment: Vec<Option<bool>>,
    last_value: Vec<bool>,
}

impl Assignment {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.assignment.resize(count, None);
        self.last_value.resize(count, false);
    }

    /// Current partial assignment as slice.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    /// Value assigned to a variable.
    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.assignment[var.index()]
    }

    /// Value last assigned to a variable, used for phase saving.
    ///
    /// If the variable was never assigned this returns false.
    pub fn last_var_value(&self, var: Var) -> bool {
        self.last_value[var.index()]
    }

    /// Value assigned to a literal.
    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.index()].map(|b| b ^ lit.is_negative())
    }

    pub fn lit_is_true(&self, lit: Lit) -> bool {
        fast_option_eq(self.assignment[lit.index()], Some(lit.is_positive()))
    }

    pub fn lit_is_false(&self, lit: Lit) -> bool {
        fast_option_eq(self.assignment[lit.index()], Some(lit.is_negative()))
    }

    pub fn lit_is_unk(&self, lit: Lit) -> bool {
        fast_option_eq(self.assignment[lit.index()], None)
    }

    fn assign_lit(&mut self, lit: Lit) {
        self.assignment[lit.index()] = lit.is_positive().into()
    }
}

/// Decision and propagation history.
#[derive(Default)]
pub struct Trail {
    /// Stack of all propagated and enqueued assignments.
    trail: Vec<Lit>,
    /// Next assignment in the trail to propagate.
    queue_head_pos: usize,
    /// Decision levels as trail indices.
    decisions: Vec<LitIdx>,
}

impl Trail {
    /// Return the next assigned literal to propagate.
    pub fn queue_head(&self) -> Option<Lit> {
        self.trail.get(self.queue_head_pos).copied()
    }

    /// Return the next assigned literal to propagate and remove it from the queue.
    pub fn pop_queue(&mut self) -> Option<Lit> {
        let head = self.queue_head();
        if head.is_some() {
            self.queue_head_pos += 1;
        }
        head
    }

    /// Assigned literals in assignment order.
    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    /// Start a new decision level. Does not enqueue the decision itself.
    pub fn new_decision_level(&mut self) {
        self.decisions.push(self.trail.len() as LitIdx)
    }

    /// Current decision level.
    pub fn current_level(&self) -> usize {
        self.decisions.len()
    }

    /// Trail length at the start of each decision level, indexed by level - 1.
    pub fn decisions(&self) -> &[LitIdx] {
        &self.decisions
    }

    /// Whether all assignments are processed.
    pub fn fully_propagated(&self) -> bool {
        self.queue_head_pos == self.trail.len()
    }
}

/// Enqueue the assignment of true to a literal.
///
/// Updates the assignment, trail and implication graph, but does not perform any propagation. The
/// literal must be unassigned when calling this.
pub fn enqueue_assignment(
    assignment: &mut Assignment,
    graph: &mut ImplGraph,
    trail: &mut Trail,
    lit: Lit,
    reason: Reason,
) {
    debug_assert!(assignment.lit_value(lit).is_none());

    assignment.assign_lit(lit);
    trail.trail.push(lit);
    graph.update(lit.var(), reason, trail.decisions.len());
}

/// Undo all assignments in decision levels deeper than `level`, restoring saved phases and
/// making the freed variables available to the decision heap again.
pub fn backtrack(assignment: &mut Assignment, trail: &mut Trail, vsids: &mut Vsids, level: usize) {
    if level == trail.decisions.len() {
        return;
    }

    let new_trail_len = trail.decisions[level] as usize;

    trail.queue_head_pos = new_trail_len;
    trail.decisions.truncate(level);

    for &lit in &trail.trail[new_trail_len..] {
        vsids.make_available(lit.var());
        let var_assignment = &mut assignment.assignment[lit.index()];
        assignment.last_value[lit.index()] = *var_assignment == Some(true);
        *var_assignment = None;
    }
    trail.trail.truncate(new_trail_len);
}

/// Undo all decisions, returning to an empty trail.
pub fn restart(assignment: &mut Assignment, trail: &mut Trail, vsids: &mut Vsids) {
    backtrack(assignment, trail, vsids, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::{lit, var};

    #[test]
    fn enqueue_and_backtrack_restores_phase() {
        let mut assignment = Assignment::default();
        let mut graph = ImplGraph::default();
        let mut trail = Trail::default();
        let mut vsids = Vsids::default();

        assignment.set_var_count(2);
        graph.set_var_count(2);
        vsids.set_var_count(2);

        trail.new_decision_level();
        enqueue_assignment(&mut assignment, &mut graph, &mut trail, lit!(1), Reason::Unit);

        assert!(assignment.lit_is_true(lit!(1)));
        assert_eq!(graph.level(var!(1)), 1);

        backtrack(&mut assignment, &mut trail, &mut vsids, 0);

        assert!(assignment.lit_is_unk(lit!(1)));
        assert!(assignment.last_var_value(var!(1)));
        assert_eq!(trail.current_level(), 0);
    }
}
