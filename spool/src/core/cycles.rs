//! Cycle counting and the periodic docs-audit schedule.

use super::types::RunState;

/// Cycles between docs audits when the caller does not configure one.
pub const DEFAULT_DOCS_AUDIT_INTERVAL: u64 = 3;

/// Count one completed cycle at `now_ms`. The counter saturates at `u64::MAX`.
pub fn advance_cycle(state: &mut RunState, now_ms: i64) {
    state.total_cycles = state.total_cycles.saturating_add(1);
    state.last_run_at = now_ms;
}

/// Cycles completed since the last recorded docs audit.
///
/// Saturates at zero if a hand-edited file puts the audit ahead of the total.
pub fn cycles_since_docs_audit(state: &RunState) -> u64 {
    state
        .total_cycles
        .saturating_sub(state.last_docs_audit_cycle)
}

pub fn docs_audit_due(state: &RunState, interval: u64) -> bool {
    cycles_since_docs_audit(state) >= interval
}

/// Mark the audit as done at the current cycle count.
pub fn mark_docs_audit(state: &mut RunState) {
    state.last_docs_audit_cycle = state.total_cycles;
}
