//! Test-only helpers: fixed clocks, temp repositories and proposal builders.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::clock::Clock;
use crate::core::types::DeferredProposal;
use crate::store::RunStateStore;

/// A clock frozen at a fixed epoch-millisecond instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(i64);

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self(now_ms)
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Create a deterministic proposal touching `files`, deferred at `deferred_at`.
pub fn proposal(title: &str, files: &[&str], deferred_at: i64) -> DeferredProposal {
    DeferredProposal {
        category: "refactor".to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        files: files.iter().map(|f| f.to_string()).collect(),
        allowed_paths: Vec::new(),
        confidence: 80.0,
        impact_score: 5.0,
        original_scope: "src/**".to_string(),
        deferred_at,
    }
}

/// Create a proposal that only declares `allowed_paths`.
pub fn proposal_with_allowed(title: &str, allowed: &[&str], deferred_at: i64) -> DeferredProposal {
    DeferredProposal {
        files: Vec::new(),
        allowed_paths: allowed.iter().map(|p| p.to_string()).collect(),
        ..proposal(title, &[], deferred_at)
    }
}

/// Temporary repository root for exercising file-backed behavior.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp repo")?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run-state store for this repo with a frozen clock.
    pub fn store_at(&self, now_ms: i64) -> RunStateStore<FixedClock> {
        RunStateStore::with_clock(self.path(), FixedClock::new(now_ms))
    }

    /// Write a file relative to the repo root, creating parent directories.
    pub fn write_file(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }
}

/// Install a test-friendly tracing subscriber (idempotent).
pub fn init_tracing() {
    let _ = crate::logging::try_init_with_writer(tracing_subscriber::fmt::TestWriter::new);
}
