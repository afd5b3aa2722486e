//! Staffing automation service that ranks substitute-teacher candidates for an
//! uncovered class and returns the best match.
//!
//! The selection core under [`workflows::staffing::roster`] is a pure,
//! deterministic computation over caller-supplied records; the binary wraps it
//! in a CLI and a small HTTP service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
