//! Deferred-proposal backlog rules: expiry, idempotent insert, scoped pop.
//!
//! All functions take `now_ms` explicitly so results depend only on inputs.

use super::scope::{normalize_scope, proposal_in_scope};
use super::types::{DeferredProposal, RunState};

/// Maximum age of a deferred proposal (7 days).
pub const DEFERRED_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// A proposal is expired once it is strictly older than [`DEFERRED_TTL_MS`].
pub fn is_expired(proposal: &DeferredProposal, now_ms: i64) -> bool {
    now_ms.saturating_sub(proposal.deferred_at) > DEFERRED_TTL_MS
}

/// Drop expired proposals in place, returning how many were removed.
pub fn prune_expired(state: &mut RunState, now_ms: i64) -> usize {
    let before = state.deferred_proposals.len();
    state
        .deferred_proposals
        .retain(|proposal| !is_expired(proposal, now_ms));
    before - state.deferred_proposals.len()
}

/// Append `proposal` unless its title is already queued.
///
/// Returns `true` when the backlog grew.
pub fn insert_unique(state: &mut RunState, proposal: DeferredProposal) -> bool {
    if state
        .deferred_proposals
        .iter()
        .any(|existing| existing.title == proposal.title)
    {
        return false;
    }
    state.deferred_proposals.push(proposal);
    true
}

/// Outcome of [`take_in_scope`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopedTake {
    /// Proposals removed because they matched, in deferral order.
    pub matched: Vec<DeferredProposal>,
    /// Number of expired proposals dropped along the way.
    pub pruned: usize,
}

impl ScopedTake {
    /// Whether the stored backlog differs from before the take.
    pub fn changed(&self) -> bool {
        !self.matched.is_empty() || self.pruned > 0
    }
}

/// Split the backlog into matched (returned), expired (dropped) and kept.
pub fn take_in_scope(state: &mut RunState, scope: &str, now_ms: i64) -> ScopedTake {
    let scope = normalize_scope(scope);
    let mut take = ScopedTake::default();
    let mut kept = Vec::with_capacity(state.deferred_proposals.len());

    for proposal in state.deferred_proposals.drain(..) {
        if is_expired(&proposal, now_ms) {
            take.pruned += 1;
        } else if proposal_in_scope(&proposal, scope) {
            take.matched.push(proposal);
        } else {
            kept.push(proposal);
        }
    }

    state.deferred_proposals = kept;
    take
}
