//! Literals and variables.
//!
//! Re-exported from [`cdcl_formula`], which owns these primitives so the
//! DIMACS parser and the solver core agree on a single representation.
pub use cdcl_formula::lit::{Lit, LitIdx, Var};
