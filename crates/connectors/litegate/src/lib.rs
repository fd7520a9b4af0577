//! A gateway serving named SQL queries over HTTP.
//!
//! Requests address a stored template by database (`db`), entity (`tb`) and
//! query id (`qr`), plus whatever parameters the template references. The
//! template compiles to a batch of bound statements, the batch runs as one
//! transaction, and the outcome comes back as a flat JSON document.

pub mod query;
pub mod routes;
pub mod state;
