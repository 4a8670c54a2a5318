//! Filesystem helpers for spool state and project documents.

pub mod config;
pub mod guidelines;
pub mod paths;
pub mod run_state;
