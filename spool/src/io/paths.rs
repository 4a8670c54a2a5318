//! Canonical locations under `.blockspool/`.

use std::path::{Path, PathBuf};

/// Directory (relative to the repository root) owned by this crate.
pub const SPOOL_DIR: &str = ".blockspool";

/// All canonical paths within `.blockspool/` for a repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolPaths {
    pub root: PathBuf,
    pub spool_dir: PathBuf,
    pub run_state_path: PathBuf,
    pub config_path: PathBuf,
}

impl SpoolPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let spool_dir = root.join(SPOOL_DIR);
        Self {
            run_state_path: spool_dir.join("run-state.json"),
            config_path: spool_dir.join("config.toml"),
            spool_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
