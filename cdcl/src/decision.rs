//! Decision heuristics: EVSIDS variable selection with phase rotation.

pub mod vsids;

use rand::Rng;

pub use vsids::Vsids;

use crate::assignment::{enqueue_assignment, Assignment, Trail};
use crate::graph::{ImplGraph, Reason};

/// Which polarity to pick for the next decision, cycling with every
/// `config.phase_rotation_period` decisions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PhaseRotation {
    /// Use the variable's saved phase from the last time it was assigned.
    Saved,
    /// Use the opposite of the variable's saved phase.
    Negated,
    /// Always decide false.
    AlwaysFalse,
    /// Pick a random polarity.
    Random,
}

/// Map a decision count to the rotation case active for the decision at that count.
pub fn rotation_for(decisions: u64, period: u64) -> PhaseRotation {
    match decisions % period {
        0 => PhaseRotation::Saved,
        1 => PhaseRotation::Negated,
        2 => PhaseRotation::AlwaysFalse,
        _ => PhaseRotation::Random,
    }
}

/// Make a decision and enqueue it, branching on the unassigned variable with the highest EVSIDS
/// activity.
///
/// Returns `false` if no decision was made because every variable is already assigned.
pub fn make_decision(
    vsids: &mut Vsids,
    assignment: &mut Assignment,
    graph: &mut ImplGraph,
    trail: &mut Trail,
    rotation: PhaseRotation,
    rng: &mut impl Rng,
) -> bool {
    let decision_var = loop {
        match vsids.next() {
            Some(var) if assignment.var_value(var).is_some() => continue,
            Some(var) => break var,
            None => return false,
        }
    };

    let polarity = match rotation {
        PhaseRotation::Saved => assignment.last_var_value(decision_var),
        PhaseRotation::Negated => !assignment.last_var_value(decision_var),
        PhaseRotation::AlwaysFalse => false,
        PhaseRotation::Random => rng.gen(),
    };

    let decision = decision_var.lit(polarity);

    trail.new_decision_level();
    enqueue_assignment(assignment, graph, trail, decision, Reason::Unit);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rotation_cycles_through_all_cases() {
        assert_eq!(rotation_for(0, 4), PhaseRotation::Saved);
        assert_eq!(rotation_for(1, 4), PhaseRotation::Negated);
        assert_eq!(rotation_for(2, 4), PhaseRotation::AlwaysFalse);
        assert_eq!(rotation_for(3, 4), PhaseRotation::Random);
        assert_eq!(rotation_for(4, 4), PhaseRotation::Saved);
    }

    #[test]
    fn decides_until_exhausted() {
        let mut vsids = Vsids::default();
        let mut assignment = Assignment::default();
        let mut graph = ImplGraph::default();
        let mut trail = Trail::default();
        let mut rng = StdRng::seed_from_u64(0);

        vsids.set_var_count(2);
        assignment.set_var_count(2);
        graph.set_var_count(2);

        assert!(make_decision(
            &mut vsids,
            &mut assignment,
            &mut graph,
            &mut trail,
            PhaseRotation::AlwaysFalse,
            &mut rng
        ));
        assert!(make_decision(
            &mut vsids,
            &mut assignment,
            &mut graph,
            &mut trail,
            PhaseRotation::AlwaysFalse,
            &mut rng
        ));
        assert!(!make_decision(
            &mut vsids,
            &mut assignment,
            &mut graph,
            &mut trail,
            PhaseRotation::AlwaysFalse,
            &mut rng
        ));
        assert_eq!(trail.current_level(), 2);
    }
}
