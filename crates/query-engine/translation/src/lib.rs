//! Compile a named query template, addressed by the incoming request, into a
//! batch of parameter-bound statements to be run against the database.

pub mod translation;
