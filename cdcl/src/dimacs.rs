//! DIMACS CNF parsing and writing.
//!
//! Re-exported from [`cdcl_dimacs`].
pub use cdcl_dimacs::{
    write_dimacs, write_dimacs_clauses, write_dimacs_header, DimacsHeader, DimacsParser,
    ParserError,
};
