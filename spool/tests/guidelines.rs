//! Guidelines discovery and prompt formatting against real files.

use pretty_assertions::assert_eq;
use spool::io::config::{GuidelinesConfig, SpoolConfig};
use spool::io::guidelines::{MAX_GUIDELINES_CHARS, TRUNCATION_MARKER};
use spool::test_support::TestRepo;
use spool::{
    Backend, GuidelinesOptions, GuidelinesSource, format_guidelines_for_prompt, load_guidelines,
};

#[test]
fn disabled_returns_none_even_with_claude_md() {
    let repo = TestRepo::new().expect("repo");
    repo.write_file("CLAUDE.md", "# Rules\n").expect("write");

    let options = GuidelinesOptions {
        backend: Backend::Claude,
        source: GuidelinesSource::Disabled,
    };
    assert_eq!(load_guidelines(repo.path(), &options), None);
}

#[test]
fn codex_backend_falls_back_to_claude_md() {
    let repo = TestRepo::new().expect("repo");
    repo.write_file("CLAUDE.md", "Prefer small PRs.").expect("write");

    let options = GuidelinesOptions {
        backend: Backend::Codex,
        source: GuidelinesSource::Auto,
    };
    let loaded = load_guidelines(repo.path(), &options).expect("guidelines");
    assert_eq!(loaded.content, "Prefer small PRs.");
    assert_eq!(loaded.source, "CLAUDE.md");
}

#[test]
fn claude_backend_falls_back_to_agents_md() {
    let repo = TestRepo::new().expect("repo");
    repo.write_file("AGENTS.md", "Run tests first.").expect("write");

    let loaded = load_guidelines(repo.path(), &GuidelinesOptions::default()).expect("guidelines");
    assert_eq!(loaded.source, "AGENTS.md");
}

#[test]
fn long_content_is_truncated_to_budget_plus_marker() {
    let repo = TestRepo::new().expect("repo");
    let body = "abcdefghij".repeat(450);
    repo.write_file("CLAUDE.md", &body).expect("write");

    let loaded = load_guidelines(repo.path(), &GuidelinesOptions::default()).expect("guidelines");
    assert_eq!(
        loaded.content,
        format!("{}{}", &body[..MAX_GUIDELINES_CHARS], TRUNCATION_MARKER)
    );
}

#[test]
fn config_selects_custom_guidelines_file() {
    let repo = TestRepo::new().expect("repo");
    repo.write_file("CLAUDE.md", "root rules").expect("write");
    repo.write_file("docs/team.md", "team rules").expect("write");

    let config = SpoolConfig {
        guidelines: GuidelinesConfig {
            path: Some("docs/team.md".to_string()),
            ..GuidelinesConfig::default()
        },
        ..SpoolConfig::default()
    };
    let loaded = load_guidelines(repo.path(), &config.guidelines_options()).expect("guidelines");
    let prompt = format_guidelines_for_prompt(&loaded).expect("format");

    assert!(prompt.starts_with("<project-guidelines>\n"));
    assert!(prompt.contains("<!-- Source: docs/team.md -->"));
    assert!(prompt.contains("team rules"));
    assert!(!prompt.contains("root rules"));
    assert!(prompt.ends_with("</project-guidelines>"));
}
