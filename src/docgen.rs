//! Documentation generation session
//!
//! Assembles the fragment map for one profile crate and renders the final
//! document. All state lives in this single pass; nothing persists between
//! runs, so repeated invocations over the same inputs are idempotent
//! (branch name aside).

use crate::error::ProfileError;
use crate::graph::EntityGraph;
use crate::provenance::provenance_fragment;
use crate::rules::RuleSet;
use crate::sections::{
    build_examples, build_item_lists, build_root_requirements, build_term_sets, ExamplesOfType,
};
use crate::tables::{build_classes, build_property_index};
use crate::template::{render, Fragments, KEY_EXAMPLES, KEY_PROVENANCE, KEY_ROOT_DATA_ENTITY};

/// Inputs for one generation run beyond the loaded profile itself
#[derive(Debug, Clone)]
pub struct DocInputs<'a> {
    /// Template text with `${rules.KEY}` placeholders
    pub template: &'a str,
    /// Template location, for the provenance link
    pub template_path: &'a str,
    /// Profile location, for the provenance link
    pub profile_path: &'a str,
    /// Branch segment of the repository URL
    pub branch: &'a str,
}

/// Generate the documentation for a profile crate
///
/// Section order matters in one place: example extraction fills the
/// cross-reference accumulator that class rendering reads, so examples run
/// strictly first.
pub fn generate_docs(
    graph: &EntityGraph,
    rules: &RuleSet,
    inputs: &DocInputs<'_>,
) -> Result<String, ProfileError> {
    let mut fragments = Fragments::new();
    let mut cross = ExamplesOfType::default();

    fragments.insert(KEY_ROOT_DATA_ENTITY, build_root_requirements(rules));

    let examples = build_examples(graph, rules, &mut cross)?;
    fragments.insert(KEY_EXAMPLES, examples);

    build_term_sets(graph, &mut fragments);
    build_item_lists(graph, &mut fragments)?;

    build_classes(graph, rules, &cross, &mut fragments);
    build_property_index(graph, &mut fragments);

    fragments.insert(
        KEY_PROVENANCE,
        provenance_fragment(inputs.branch, inputs.template_path, inputs.profile_path),
    );

    Ok(render(inputs.template, &fragments))
}
