//! Deterministic, pure logic for run-state bookkeeping.
//!
//! Core modules must be free of I/O side effects. Time enters only as an
//! explicit `now_ms` argument.

pub mod backlog;
pub mod cycles;
pub mod scope;
pub mod types;
