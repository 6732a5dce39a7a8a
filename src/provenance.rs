//! Provenance fragment and git branch discovery
//!
//! The generated document names the script, template and profile that
//! produced it, linked relative to the repository at the current branch.
//! Branch discovery may fail (detached HEAD, no git); it falls back to CI
//! environment variables and finally a literal default, never aborting
//! the run.

use std::process::Command;

use crate::entity::clean;
use crate::vocab::{BRANCH_ENV_VARS, DEFAULT_BRANCH, REPO_URL_BASE};

/// Resolve the branch name from the environment chain, then the default
fn branch_from_env() -> String {
    BRANCH_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
}

/// Discover the current git branch
///
/// Detached HEAD and subprocess failure both fall through to the
/// environment chain; a failure only warns.
pub fn current_branch() -> String {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let branch = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if branch.is_empty() || branch == "HEAD" {
                branch_from_env()
            } else {
                branch
            }
        }
        _ => {
            eprintln!("Warning: Could not determine git branch, using fallback");
            branch_from_env()
        }
    }
}

/// Build the provenance sentence fragment
///
/// All three artifacts are linked relative to the repository URL at the
/// given branch.
pub fn provenance_fragment(branch: &str, template_path: &str, profile_path: &str) -> String {
    let repo_url = format!("{}/{}", REPO_URL_BASE, clean(branch));
    format!(
        "This document was compiled using [rocrate-profile-docs]({repo}/src/bin/generate_docs.rs), \
         based on [{template}]({repo}/{template}) \
         using a profile defined in [{profile}]({repo}/{profile}).",
        repo = repo_url,
        template = clean(template_path),
        profile = clean(profile_path),
    )
}
