//! Low-level types describing compiled, parameter-bound SQL statements.
//! Shared by the translation and execution crates.

pub mod sql;
