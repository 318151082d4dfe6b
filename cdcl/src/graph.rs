//! Implication graph: why each assigned literal was assigned.

use crate::clause::ClauseRef;
use crate::lit::{Lit, Var};

/// Why a literal was forced onto the trail.
#[derive(Copy, Clone, Debug)]
pub enum Reason {
    /// Assigned as a decision.
    Unit,
    /// Assigned because every other literal of the referenced clause is false.
    Clause(ClauseRef),
}

/// A clause every one of whose literals is currently false.
#[derive(Copy, Clone, Debug)]
pub struct Conflict(pub ClauseRef);

struct ImplNode {
    reason: Reason,
    level: usize,
}

impl Default for ImplNode {
    fn default() -> ImplNode {
        ImplNode {
            reason: Reason::Unit,
            level: 0,
        }
    }
}

/// Tracks, for every variable, the decision level it was assigned at and the reason it was
/// assigned (if not a decision).
#[derive(Default)]
pub struct ImplGraph {
    nodes: Vec<ImplNode>,
}

impl ImplGraph {
    pub fn set_var_count(&mut self, count: usize) {
        self.nodes.resize_with(count, ImplNode::default);
    }

    pub fn reason(&self, var: Var) -> Reason {
        self.nodes[var.index()].reason
    }

    pub fn level(&self, var: Var) -> usize {
        self.nodes[var.index()].level
    }

    pub fn update(&mut self, var: Var, reason: Reason, level: usize) {
        self.nodes[var.index()] = ImplNode { reason, level };
    }
}

/// Convenience for code that only has a `Lit`, not its `Var`.
pub fn level_of(graph: &ImplGraph, lit: Lit) -> usize {
    graph.level(lit.var())
}
