//! CNF formulas.
//!
//! Re-exported from [`cdcl_formula`].
pub use cdcl_formula::cnf::CnfFormula;
