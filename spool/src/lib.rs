//! Run-state persistence and project guidelines for an agent automation loop.
//!
//! Two leaf services, both rooted at a repository directory:
//!
//! - **[`store::RunStateStore`]**: cycle counters, the docs-audit schedule and
//!   a scope-filtered backlog of deferred proposals, persisted in
//!   `.blockspool/run-state.json`. Reads fail open to the zero-state.
//! - **[`io::guidelines`]**: finds `CLAUDE.md` / `AGENTS.md`, caps its size
//!   and wraps it for prompt embedding.
//!
//! Pure rules live in [`core`]; filesystem access is confined to [`io`] and
//! [`store`].

pub mod clock;
pub mod core;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::clock::{Clock, SystemClock};
pub use crate::core::types::{DeferredProposal, RunState};
pub use crate::io::guidelines::{
    Backend, GuidelinesOptions, GuidelinesSource, ProjectGuidelines,
    format_guidelines_for_prompt, load_guidelines,
};
pub use crate::store::RunStateStore;
