//! Compute the glue level (literal block distance, LBD) of a clause.
//!
//! The glue level of a clause is the number of distinct decision levels among its literals. The
//! smallest glue level observed for a learnt clause is used as an indicator of how useful it is
//! likely to remain.

use crate::graph::ImplGraph;
use crate::lit::Lit;

/// Compute the glue level of `lits`, using `seen` as scratch space indexed by decision level.
///
/// `seen` must be all-`false` on entry and is restored to all-`false` before returning, so it can
/// be reused across calls without reallocating.
pub fn compute_glue(graph: &ImplGraph, seen: &mut [bool], lits: &[Lit]) -> u32 {
    let mut glue = 0;

    for &lit in lits {
        let level = graph.level(lit.var());
        if !seen[level] {
            seen[level] = true;
            glue += 1;
        }
    }

    for &lit in lits {
        let level = graph.level(lit.var());
        seen[level] = false;
    }

    glue
}
