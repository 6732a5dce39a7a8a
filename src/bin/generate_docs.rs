//! Documentation generator CLI
//!
//! Loads a profile crate, renders its documentation through a markdown
//! template and writes the result next to the profile (or wherever
//! requested).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use rocrate_profile_tools::{
    current_branch, generate_docs, load_document, DocInputs, EntityGraph, ProfileError, RuleSet,
};

const DEFAULT_PROFILE: &str = "profiles/ro-crate/profile-crate/ro-crate-metadata.json";
const DEFAULT_TEMPLATE: &str = "profiles/ro-crate/profile-text.md";
const DEFAULT_OUTPUT_NAME: &str = "profile-documentation.md";

#[derive(Parser)]
#[command(name = "rocrate-profile-docs")]
#[command(about = "Generate documentation from an RO-Crate profile crate")]
#[command(version)]
struct Cli {
    /// Path or URL of the profile crate metadata
    #[arg(default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Path of the markdown template
    #[arg(default_value = DEFAULT_TEMPLATE)]
    template: PathBuf,

    /// Output file (default: profile-documentation.md next to the profile)
    output: Option<PathBuf>,
}

/// Default output location: same directory as the profile
fn default_output(profile: &str) -> PathBuf {
    if rocrate_profile_tools::is_url(profile) {
        return PathBuf::from(DEFAULT_OUTPUT_NAME);
    }
    Path::new(profile)
        .parent()
        .map(|dir| dir.join(DEFAULT_OUTPUT_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME))
}

fn run(cli: Cli) -> Result<(), ProfileError> {
    let doc = load_document(&cli.profile)?;
    let graph = EntityGraph::from_document(&doc)?;
    let rules = RuleSet::parse(&graph);

    eprintln!("Reading template from: {}", cli.template.display());
    let template = fs::read_to_string(&cli.template).map_err(|e| ProfileError::LoadError {
        path: cli.template.display().to_string(),
        reason: e.to_string(),
    })?;

    let branch = current_branch();
    let rendered = generate_docs(
        &graph,
        &rules,
        &DocInputs {
            template: &template,
            template_path: &cli.template.display().to_string(),
            profile_path: &cli.profile,
            branch: &branch,
        },
    )?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.profile));
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, rendered)?;
    eprintln!("Documentation generated successfully: {}", output.display());
    Ok(())
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    if let Err(e) = run(cli) {
        eprintln!("Error generating documentation: {}", e);
        std::process::exit(1);
    }
}
