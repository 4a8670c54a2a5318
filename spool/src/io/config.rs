//! Spool configuration stored under `.blockspool/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::guidelines::{Backend, GuidelinesOptions, GuidelinesSource};
use crate::core::cycles::DEFAULT_DOCS_AUDIT_INTERVAL;

/// Spool configuration (TOML).
///
/// Edited by humans; missing fields default to the built-in values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpoolConfig {
    /// Cycles between docs audits.
    pub docs_audit_interval: u64,

    pub guidelines: GuidelinesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GuidelinesConfig {
    /// Set to `false` to never embed guidelines.
    pub enabled: bool,
    /// Which backend's guidelines filename is preferred.
    pub backend: Backend,
    /// Read exactly this root-relative file instead of searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for GuidelinesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: Backend::default(),
            path: None,
        }
    }
}

impl Default for SpoolConfig {
    fn default() -> Self {
        Self {
            docs_audit_interval: DEFAULT_DOCS_AUDIT_INTERVAL,
            guidelines: GuidelinesConfig::default(),
        }
    }
}

impl SpoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.docs_audit_interval == 0 {
            return Err(anyhow!("docs_audit_interval must be > 0"));
        }
        if let Some(path) = &self.guidelines.path
            && path.trim().is_empty()
        {
            return Err(anyhow!("guidelines.path must not be empty when set"));
        }
        Ok(())
    }

    /// Loader options derived from the `[guidelines]` table.
    pub fn guidelines_options(&self) -> GuidelinesOptions {
        let source = match (&self.guidelines.path, self.guidelines.enabled) {
            (_, false) => GuidelinesSource::Disabled,
            (Some(path), true) => GuidelinesSource::Custom(PathBuf::from(path)),
            (None, true) => GuidelinesSource::Auto,
        };
        GuidelinesOptions {
            backend: self.guidelines.backend,
            source,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SpoolConfig::default()`.
pub fn load_config(path: &Path) -> Result<SpoolConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        return Ok(SpoolConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SpoolConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn write_config(path: &Path, cfg: &SpoolConfig) -> Result<()> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SpoolConfig::default());
        assert_eq!(cfg.docs_audit_interval, 3);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(".blockspool").join("config.toml");
        let cfg = SpoolConfig {
            docs_audit_interval: 5,
            guidelines: GuidelinesConfig {
                enabled: true,
                backend: Backend::Codex,
                path: Some("docs/AGENTS.md".to_string()),
            },
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[guidelines]\nbackend = \"codex\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.docs_audit_interval, DEFAULT_DOCS_AUDIT_INTERVAL);
        assert_eq!(cfg.guidelines.backend, Backend::Codex);
        assert!(cfg.guidelines.enabled);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "docs_audit_interval = 0\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("docs_audit_interval"));
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[guidelines]\nbackend = \"gemini\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn guidelines_options_follow_config() {
        let mut cfg = SpoolConfig::default();
        assert_eq!(cfg.guidelines_options().source, GuidelinesSource::Auto);

        cfg.guidelines.path = Some("RULES.md".to_string());
        assert_eq!(
            cfg.guidelines_options().source,
            GuidelinesSource::Custom(PathBuf::from("RULES.md"))
        );

        cfg.guidelines.enabled = false;
        assert_eq!(cfg.guidelines_options().source, GuidelinesSource::Disabled);
    }
}
