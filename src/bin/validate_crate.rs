//! Crate validation CLI
//!
//! Validates a target RO-Crate against a profile crate. Exit codes:
//! 0 on a clean run, 2 when findings exist, 1 on load or usage failure.

use clap::Parser;

use rocrate_profile_tools::{load_document, EntityGraph, ProfileError, RuleSet, ValidationReport};

#[derive(Parser)]
#[command(name = "rocrate-validate")]
#[command(about = "Validate an RO-Crate against a profile crate")]
#[command(version)]
struct Cli {
    /// Print the full structured result as JSON
    #[arg(long)]
    json: bool,

    /// Path or URL of the target crate to validate
    target: String,

    /// Path or URL of the profile crate
    profile: String,
}

fn run(cli: &Cli) -> Result<ValidationReport, ProfileError> {
    let target_doc = load_document(&cli.target)?;
    let profile_doc = load_document(&cli.profile)?;

    let target = EntityGraph::from_document(&target_doc)?;
    let profile = EntityGraph::from_document(&profile_doc)?;

    let rules = RuleSet::parse(&profile);
    Ok(rules.validate_crate(&target))
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Validation failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if report.is_clean() {
        if !cli.json {
            println!("Validation passed: No issues found.");
        }
        return;
    }

    if !cli.json {
        for issue in &report.error {
            println!("[{}] {}", issue.level.to_uppercase(), issue.message);
        }
    }
    std::process::exit(2);
}
