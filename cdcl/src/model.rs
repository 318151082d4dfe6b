//! Satisfying assignment (model) reconstruction.

use crate::lit::{Lit, Var};

/// A satisfying assignment.
///
/// Only meaningful while the solver's state is SAT.
#[derive(Default)]
pub struct Model {
    assignment: Vec<Option<bool>>,
}

impl Model {
    /// Assignment of the model, indexed by variable.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    /// Whether a given literal is true in the model.
    pub fn lit_is_true(&self, lit: Lit) -> bool {
        self.assignment[lit.index()] == Some(lit.is_positive())
    }

    /// Replace the model with a snapshot of a solver's final assignment.
    pub fn reconstruct(&mut self, assignment: &[Option<bool>]) {
        self.assignment.clear();
        self.assignment.extend_from_slice(assignment);
    }

    /// The model as a list of satisfying literals, one per assigned variable.
    pub fn lits(&self) -> Vec<Lit> {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|polarity| Var::from_index(index).lit(polarity)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdcl_formula::lit;

    #[test]
    fn reconstructs_from_assignment() {
        let mut model = Model::default();
        model.reconstruct(&[Some(true), Some(false), None]);

        assert!(model.lit_is_true(lit!(1)));
        assert!(model.lit_is_true(lit!(-2)));
        assert_eq!(model.lits(), vec![lit!(1), lit!(-2)]);
    }
}
