//! RO-Crate Profile Tools
//!
//! This library generates cross-referenced markdown documentation from an
//! RO-Crate *profile crate* and validates arbitrary target crates against
//! it.
//!
//! # Overview
//!
//! A profile crate describes a metadata shape: `rdfs:Class` and
//! `rdf:Property` entities with SHACL-style count constraints, plus
//! DefinedTermSet, ItemList and example resources. Documentation
//! generation runs as a single pass:
//!
//! 1. Index the profile's entities by type and reverse edge ([`graph`])
//! 2. Parse class and property rules ([`rules`])
//! 3. Build markdown fragments per section ([`sections`], [`tables`]),
//!    threading the examples-by-class cross-reference from example
//!    extraction into class rendering
//! 4. Substitute the fragments into a `${rules.KEY}` template
//!    ([`template`])
//!
//! Validation reuses the parsed rules: each class rule counts its
//! instances in the target crate and checks its required properties,
//! collecting findings as data rather than errors.
//!
//! # Usage
//!
//! ```ignore
//! use rocrate_profile_tools::{load_document, DocInputs, EntityGraph, RuleSet};
//!
//! let doc = load_document("profiles/ro-crate/profile-crate/ro-crate-metadata.json")?;
//! let graph = EntityGraph::from_document(&doc)?;
//! let rules = RuleSet::parse(&graph);
//!
//! let rendered = rocrate_profile_tools::generate_docs(&graph, &rules, &DocInputs {
//!     template: "# Profile\n${rules.all}",
//!     template_path: "profile-text.md",
//!     profile_path: "profile-crate/ro-crate-metadata.json",
//!     branch: "main",
//! })?;
//! ```

pub mod anchor;
pub mod docgen;
pub mod entity;
pub mod error;
pub mod graph;
pub mod load;
pub mod provenance;
pub mod rules;
pub mod sections;
pub mod tables;
pub mod template;
pub mod vocab;

// Re-export main types for convenience
pub use crate::anchor::anchor;
pub use crate::docgen::{generate_docs, DocInputs};
pub use crate::error::ProfileError;
pub use crate::graph::EntityGraph;
pub use crate::load::{is_url, load_document, parse_document};
pub use crate::provenance::current_branch;
pub use crate::rules::{ClassRule, Issue, PropertyRule, RuleSet, ValidationReport};
pub use crate::template::{render, Fragments};
