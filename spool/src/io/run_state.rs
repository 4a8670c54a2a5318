//! Run state storage (`.blockspool/run-state.json`).
//!
//! Reads fail open: a missing, unreadable or malformed file yields the
//! zero-state. Writes are plain overwrites; a crash mid-write can leave a
//! truncated file, which the next read then treats as malformed and resets.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Error, Result};
use tracing::debug;

use crate::core::types::{RawRunState, RunState};

/// What was found at the state path.
///
/// Callers that only need the public contract use [`StateLoad::into_state`];
/// the other variants are kept for diagnostics.
#[derive(Debug)]
pub enum StateLoad {
    /// A well-formed record (missing fields already defaulted).
    Found(RunState),
    /// No file at the path.
    Missing,
    /// The file exists but could not be read or decoded.
    Invalid(Error),
}

impl StateLoad {
    /// Collapse to the fail-open result: anything but `Found` is the zero-state.
    pub fn into_state(self) -> RunState {
        match self {
            StateLoad::Found(state) => state,
            StateLoad::Missing | StateLoad::Invalid(_) => RunState::default(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StateLoad::Found(_))
    }
}

/// Load run state from disk, keeping the found/missing/invalid distinction.
pub fn load_run_state(path: &Path) -> StateLoad {
    debug!(path = %path.display(), "loading run state");
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "run state missing");
            return StateLoad::Missing;
        }
        Err(err) => {
            let err = Error::new(err).context(format!("read run state {}", path.display()));
            debug!(error = %format!("{err:#}"), "run state unreadable");
            return StateLoad::Invalid(err);
        }
    };
    match parse_run_state(&contents)
        .with_context(|| format!("parse run state {}", path.display()))
    {
        Ok(state) => {
            debug!(
                total_cycles = state.total_cycles,
                deferred = state.deferred_proposals.len(),
                "run state loaded"
            );
            StateLoad::Found(state)
        }
        Err(err) => {
            debug!(error = %format!("{err:#}"), "run state invalid");
            StateLoad::Invalid(err)
        }
    }
}

/// Load run state, falling back to the zero-state on any read problem.
pub fn read_run_state(path: &Path) -> RunState {
    load_run_state(path).into_state()
}

/// Overwrite the state file, creating parent directories as needed.
pub fn write_run_state(path: &Path, state: &RunState) -> Result<()> {
    debug!(
        path = %path.display(),
        total_cycles = state.total_cycles,
        deferred = state.deferred_proposals.len(),
        "writing run state"
    );
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut buf = serde_json::to_string_pretty(state).context("serialize run state")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write run state {}", path.display()))
}

/// Decode a state record, defaulting any missing top-level fields.
///
/// A record of the wrong shape (not an object, wrong field types) is an error.
fn parse_run_state(contents: &str) -> Result<RunState> {
    let raw: RawRunState = serde_json::from_str(contents)?;
    Ok(raw.materialize())
}
