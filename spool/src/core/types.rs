//! Persisted run-state records.
//!
//! These types define the on-disk contract of `.blockspool/run-state.json`.
//! Field names are serialized exactly as existing state files spell them, so
//! top-level counters are camelCase while proposal fields are snake_case
//! (except `deferredAt`).

use serde::{Deserialize, Serialize};

/// Cycle counters and the deferred-proposal backlog for one repository.
///
/// Decoded only through [`RawRunState`], which tolerates missing fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    /// Completed automation cycles (incremented once per `record_cycle`).
    pub total_cycles: u64,
    /// Value of `total_cycles` when the last docs audit was recorded.
    pub last_docs_audit_cycle: u64,
    /// Epoch milliseconds of the most recent `record_cycle`.
    pub last_run_at: i64,
    /// Backlog in deferral order.
    pub deferred_proposals: Vec<DeferredProposal>,
}

/// A unit of work set aside because it fell outside the active scope.
///
/// Never mutated once stored: it is either popped, pruned, or left alone.
/// Fields missing from a stored entry decode as empty/zero; a missing
/// `deferredAt` therefore reads as already expired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeferredProposal {
    pub category: String,
    /// Uniqueness key within the backlog.
    pub title: String,
    pub description: String,
    pub files: Vec<String>,
    pub allowed_paths: Vec<String>,
    pub confidence: f64,
    pub impact_score: f64,
    /// Scope that was active when the proposal was deferred.
    pub original_scope: String,
    /// Epoch milliseconds at deferral time.
    #[serde(rename = "deferredAt")]
    pub deferred_at: i64,
}

impl DeferredProposal {
    /// Paths used for scope matching: `files` when present, else `allowed_paths`.
    pub fn effective_paths(&self) -> &[String] {
        if self.files.is_empty() {
            &self.allowed_paths
        } else {
            &self.files
        }
    }
}

/// Shape-tolerant decode target for a state file.
///
/// Every field is optional; [`RawRunState::materialize`] substitutes defaults
/// for whatever the file omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunState {
    pub total_cycles: Option<u64>,
    pub last_docs_audit_cycle: Option<u64>,
    pub last_run_at: Option<i64>,
    pub deferred_proposals: Option<Vec<DeferredProposal>>,
}

impl RawRunState {
    pub fn materialize(self) -> RunState {
        RunState {
            total_cycles: self.total_cycles.unwrap_or(0),
            last_docs_audit_cycle: self.last_docs_audit_cycle.unwrap_or(0),
            last_run_at: self.last_run_at.unwrap_or(0),
            deferred_proposals: self.deferred_proposals.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn proposal(files: &[&str], allowed: &[&str]) -> DeferredProposal {
        DeferredProposal {
            allowed_paths: allowed.iter().map(|s| s.to_string()).collect(),
            ..crate::test_support::proposal("t", files, 0)
        }
    }

    #[test]
    fn effective_paths_prefers_files() {
        let p = proposal(&["a.rs"], &["lib/"]);
        assert_eq!(p.effective_paths(), ["a.rs".to_string()]);
    }

    #[test]
    fn effective_paths_falls_back_to_allowed_paths() {
        let p = proposal(&[], &["lib"]);
        assert_eq!(p.effective_paths(), ["lib".to_string()]);
    }

    /// Missing top-level fields are defaulted one by one instead of
    /// discarding the record.
    #[test]
    fn partial_record_materializes_defaults() {
        let raw: RawRunState = serde_json::from_str(r#"{"totalCycles": 7}"#).expect("parse");
        let state = raw.materialize();
        assert_eq!(
            state,
            RunState {
                total_cycles: 7,
                ..RunState::default()
            }
        );
    }

    /// A stored proposal missing fields keeps the rest of the record.
    #[test]
    fn proposal_missing_fields_are_defaulted() {
        let raw: RawRunState = serde_json::from_str(
            r#"{"totalCycles": 2, "deferredProposals": [{"title": "old", "files": ["a"], "deferredAt": 5}]}"#,
        )
        .expect("parse");
        let state = raw.materialize();
        assert_eq!(state.total_cycles, 2);
        assert_eq!(
            state.deferred_proposals,
            vec![DeferredProposal {
                title: "old".to_string(),
                files: vec!["a".to_string()],
                deferred_at: 5,
                ..DeferredProposal::default()
            }]
        );
    }

    #[test]
    fn wrong_typed_proposal_field_is_rejected() {
        let parsed = serde_json::from_str::<RawRunState>(
            r#"{"deferredProposals": [{"title": "t", "files": "a.rs"}]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn proposal_uses_mixed_case_keys() {
        let json = serde_json::to_value(proposal(&["a"], &[])).expect("serialize");
        assert!(json.get("deferredAt").is_some());
        assert!(json.get("allowed_paths").is_some());
        assert!(json.get("impact_score").is_some());
    }
}
