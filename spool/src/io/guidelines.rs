//! Project guidelines loader (`CLAUDE.md` / `AGENTS.md`) for prompt embedding.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Result, anyhow};
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SystemClock};

const GUIDELINES_TEMPLATE: &str = include_str!("prompts/guidelines.md");

/// Character ceiling for embedded guidelines.
pub const MAX_GUIDELINES_CHARS: usize = 4000;
/// Appended after content cut at [`MAX_GUIDELINES_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n\n[truncated]";

const CLAUDE_CANDIDATES: &[&str] = &["CLAUDE.md"];
const CODEX_CANDIDATES: &[&str] = &["AGENTS.md"];

/// Agent runtime whose guidelines file is preferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Claude,
    Codex,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Claude => "claude",
            Backend::Codex => "codex",
        }
    }

    /// Filenames searched first for this backend.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Backend::Claude => CLAUDE_CANDIDATES,
            Backend::Codex => CODEX_CANDIDATES,
        }
    }

    /// Filenames searched when none of [`Backend::candidates`] exist.
    pub fn fallback_candidates(self) -> &'static [&'static str] {
        match self {
            Backend::Claude => CODEX_CANDIDATES,
            Backend::Codex => CLAUDE_CANDIDATES,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(Backend::Claude),
            "codex" => Ok(Backend::Codex),
            other => Err(anyhow!("unknown backend '{other}' (expected claude or codex)")),
        }
    }
}

/// Where guidelines come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GuidelinesSource {
    /// Search the backend's well-known filenames, then the other backend's.
    #[default]
    Auto,
    /// Read exactly this path (relative to the root); no fallback.
    Custom(PathBuf),
    /// Never load guidelines.
    Disabled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidelinesOptions {
    pub backend: Backend,
    pub source: GuidelinesSource,
}

/// Guidelines text ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectGuidelines {
    /// File contents, cut to [`MAX_GUIDELINES_CHARS`] plus marker when longer.
    pub content: String,
    /// Path the content was read from, relative to the repository root.
    pub source: String,
    /// Epoch milliseconds at load time.
    pub loaded_at: i64,
}

/// Load the best-matching guidelines document under `root`.
///
/// Returns `None` when disabled, when no candidate exists, or when every
/// existing candidate fails to read.
pub fn load_guidelines(root: &Path, options: &GuidelinesOptions) -> Option<ProjectGuidelines> {
    load_guidelines_with_clock(root, options, &SystemClock)
}

pub fn load_guidelines_with_clock(
    root: &Path,
    options: &GuidelinesOptions,
    clock: &impl Clock,
) -> Option<ProjectGuidelines> {
    let (source, content) = match &options.source {
        GuidelinesSource::Disabled => {
            debug!("guidelines disabled");
            return None;
        }
        GuidelinesSource::Custom(rel) => {
            let source = rel.to_string_lossy().into_owned();
            let content = read_candidate(root, &source)?;
            (source, content)
        }
        GuidelinesSource::Auto => {
            let backend = options.backend;
            backend
                .candidates()
                .iter()
                .chain(backend.fallback_candidates())
                .find_map(|name| read_candidate(root, name).map(|c| (name.to_string(), c)))?
        }
    };

    debug!(source = %source, chars = content.chars().count(), "guidelines loaded");
    Some(ProjectGuidelines {
        content: truncate_content(content),
        source,
        loaded_at: clock.now_ms(),
    })
}

/// Wrap guidelines in a delimited block that names their source.
pub fn format_guidelines_for_prompt(guidelines: &ProjectGuidelines) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("guidelines", GUIDELINES_TEMPLATE)?;
    let rendered = env.get_template("guidelines")?.render(context! {
        source => guidelines.source.as_str(),
        content => guidelines.content.as_str(),
    })?;
    Ok(rendered)
}

fn read_candidate(root: &Path, rel: &str) -> Option<String> {
    let path = root.join(rel);
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "guidelines unreadable");
            None
        }
    }
}

fn truncate_content(content: String) -> String {
    match content.char_indices().nth(MAX_GUIDELINES_CHARS) {
        Some((cut, _)) => {
            let mut truncated = content;
            truncated.truncate(cut);
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => content,
    }
}
