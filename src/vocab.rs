//! Vocabulary definitions for profile crates
//!
//! JSON-LD keys, type names and role URIs used by profile crates,
//! plus the fixed locations the documentation generator links to.

/// Role URI marking a ResourceDescriptor as an example resource
pub const EXAMPLE_ROLE: &str = "http://www.w3.org/ns/dx/prof/role/example";

/// Type of entities describing profile resources (examples among them)
pub const RESOURCE_DESCRIPTOR_TYPE: &str = "ResourceDescriptor";

/// Type of class rule entities
pub const CLASS_TYPE: &str = "rdfs:Class";

/// Type of property rule entities
pub const PROPERTY_TYPE: &str = "rdf:Property";

/// Type of controlled-vocabulary entities
pub const DEFINED_TERM_SET_TYPE: &str = "DefinedTermSet";

/// Type of ordered-collection entities
pub const ITEM_LIST_TYPE: &str = "ItemList";

/// SHACL minimum-count constraint key
pub const MIN_COUNT: &str = "sh:minCount";

/// SHACL maximum-count constraint key
pub const MAX_COUNT: &str = "sh:maxCount";

/// Reverse edge connecting a property rule to the classes it applies to
pub const DOMAIN_INCLUDES: &str = "domainIncludes";

/// Permitted value types of a property rule
pub const RANGE_INCLUDES: &str = "rangeIncludes";

/// Reverse edge connecting a term to its term set
pub const IN_DEFINED_TERM_SET: &str = "inDefinedTermSet";

/// Link from a profile entity to the base definition it specializes
pub const SPECIALIZATION_OF: &str = "prov:specializationOf";

/// Root data entity type name (identifies the root class rule)
pub const ROOT_ENTITY_TYPE: &str = "Dataset";

/// Repository URL base for provenance links (branch segment appended)
pub const REPO_URL_BASE: &str =
    "https://github.com/language-research-technology/rocrate-profile-tools/blob";

/// Environment variables consulted when git branch detection fails,
/// in order of preference
pub const BRANCH_ENV_VARS: [&str; 3] = ["GITHUB_REF_NAME", "CI_COMMIT_REF_NAME", "BRANCH_NAME"];

/// Branch name used when detection and the environment chain both fail
pub const DEFAULT_BRANCH: &str = "main";

/// Standard metadata descriptor filename
pub const METADATA_DESCRIPTOR_ID: &str = "ro-crate-metadata.json";
