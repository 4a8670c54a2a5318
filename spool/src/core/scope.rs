//! Scope normalization and path matching for deferred proposals.

use super::types::DeferredProposal;

/// Strip glob/slash suffixes so `pkg/**`, `pkg/*`, `pkg/` and `pkg` compare equal.
///
/// Each suffix is removed at most once, in the order `**`, `*`, `/`.
pub fn normalize_scope(scope: &str) -> &str {
    let scope = scope.strip_suffix("**").unwrap_or(scope);
    let scope = scope.strip_suffix('*').unwrap_or(scope);
    scope.strip_suffix('/').unwrap_or(scope)
}

/// True when `path` is the scope itself or lives underneath it.
pub fn path_in_scope(path: &str, normalized_scope: &str) -> bool {
    path == normalized_scope
        || path
            .strip_prefix(normalized_scope)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether a proposal may run under `normalized_scope`.
///
/// An empty scope or a proposal without any paths matches everything.
pub fn proposal_in_scope(proposal: &DeferredProposal, normalized_scope: &str) -> bool {
    if normalized_scope.is_empty() {
        return true;
    }
    proposal
        .effective_paths()
        .iter()
        .all(|path| path_in_scope(path, normalized_scope))
}
