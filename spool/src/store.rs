//! Read-modify-write operations over a repository's run state.
//!
//! [`RunStateStore`] is an explicit handle bound to one repository root.
//! Every mutating call re-reads the file, applies a [`crate::core`] rule and
//! rewrites the whole record. There is no locking: concurrent processes race
//! and the last writer wins.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::core::backlog::{self, is_expired};
use crate::core::cycles::{self, DEFAULT_DOCS_AUDIT_INTERVAL};
use crate::core::types::{DeferredProposal, RunState};
use crate::io::paths::SpoolPaths;
use crate::io::run_state::{StateLoad, load_run_state, write_run_state};

/// Handle to `.blockspool/run-state.json` under one repository root.
#[derive(Debug, Clone)]
pub struct RunStateStore<C = SystemClock> {
    paths: SpoolPaths,
    clock: C,
}

impl RunStateStore<SystemClock> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, SystemClock)
    }
}

impl<C: Clock> RunStateStore<C> {
    pub fn with_clock(root: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            paths: SpoolPaths::new(root),
            clock,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.paths.run_state_path
    }

    /// Load with the found/missing/invalid distinction intact.
    pub fn load(&self) -> StateLoad {
        load_run_state(self.path())
    }

    /// Current state; the zero-state when the file is missing or corrupt.
    pub fn read(&self) -> RunState {
        self.load().into_state()
    }

    pub fn write(&self, state: &RunState) -> Result<()> {
        write_run_state(self.path(), state)
    }

    /// Count one completed cycle and persist.
    pub fn record_cycle(&self) -> Result<RunState> {
        let now = self.clock.now_ms();
        let mut state = self.read();
        backlog::prune_expired(&mut state, now);
        cycles::advance_cycle(&mut state, now);
        self.write(&state)?;
        debug!(total_cycles = state.total_cycles, "cycle recorded");
        Ok(state)
    }

    /// Whether at least `interval` cycles passed since the last docs audit.
    pub fn is_docs_audit_due(&self, interval: u64) -> bool {
        cycles::docs_audit_due(&self.read(), interval)
    }

    /// [`Self::is_docs_audit_due`] with [`DEFAULT_DOCS_AUDIT_INTERVAL`].
    pub fn is_docs_audit_due_default(&self) -> bool {
        self.is_docs_audit_due(DEFAULT_DOCS_AUDIT_INTERVAL)
    }

    /// Mark the docs audit as done at the current cycle count.
    ///
    /// Call only after the audit actually ran.
    pub fn record_docs_audit(&self) -> Result<()> {
        let mut state = self.read();
        backlog::prune_expired(&mut state, self.clock.now_ms());
        cycles::mark_docs_audit(&mut state);
        debug!(cycle = state.last_docs_audit_cycle, "docs audit recorded");
        self.write(&state)
    }

    /// Queue `proposal` unless one with the same title is already queued.
    ///
    /// Returns `true` when the proposal was added. The file is only
    /// rewritten when the backlog changed.
    pub fn defer_proposal(&self, proposal: DeferredProposal) -> Result<bool> {
        let mut state = self.read();
        let pruned = backlog::prune_expired(&mut state, self.clock.now_ms());
        let title = proposal.title.clone();
        let inserted = backlog::insert_unique(&mut state, proposal);
        debug!(title = %title, inserted, pruned, "defer proposal");
        if inserted || pruned > 0 {
            self.write(&state)?;
        }
        Ok(inserted)
    }

    /// Remove and return queued proposals that fit `scope`.
    ///
    /// Expired proposals are dropped whether or not they match. The file is
    /// only rewritten when something was removed.
    pub fn pop_deferred_for_scope(&self, scope: &str) -> Result<Vec<DeferredProposal>> {
        let mut state = self.read();
        let take = backlog::take_in_scope(&mut state, scope, self.clock.now_ms());
        debug!(
            scope,
            matched = take.matched.len(),
            pruned = take.pruned,
            remaining = state.deferred_proposals.len(),
            "pop deferred proposals"
        );
        if take.changed() {
            self.write(&state)?;
        }
        Ok(take.matched)
    }

    /// Non-expired backlog in deferral order, without modifying the file.
    pub fn pending_deferred(&self) -> Vec<DeferredProposal> {
        let now = self.clock.now_ms();
        self.read()
            .deferred_proposals
            .into_iter()
            .filter(|proposal| !is_expired(proposal, now))
            .collect()
    }
}
