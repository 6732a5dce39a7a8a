//! Documentation section builders
//!
//! Root-entity requirements, example extraction with class cross-linking,
//! and the term-set and item-list sections. Each builder consumes the
//! entity graph (and parsed rules where needed) and produces a markdown
//! fragment; example extraction additionally fills the cross-reference
//! accumulator consumed later by class rendering.

use indexmap::IndexMap;
use serde_json::Value;

use crate::anchor::anchor;
use crate::entity::{clean, description, display_label, extract_id, is_http_uri, ref_id, values};
use crate::error::ProfileError;
use crate::graph::EntityGraph;
use crate::rules::RuleSet;
use crate::template::{Fragments, KEY_ALL_DEFINED_TERM_SETS, KEY_ALL_ITEM_LISTS};
use crate::vocab::{
    DEFINED_TERM_SET_TYPE, EXAMPLE_ROLE, IN_DEFINED_TERM_SET, ITEM_LIST_TYPE,
    RESOURCE_DESCRIPTOR_TYPE,
};

/// Placeholder rendered for a term set or item list with no members
pub const NO_TERMS_PLACEHOLDER: &str = "*No terms defined for this term set*\n\n";

/// Cross-reference accumulator: class id -> example part links
///
/// Filled during example extraction, read during class rendering. A part
/// may match any number of classes; every match is recorded, but a part
/// never appears twice under the same class.
#[derive(Debug, Default)]
pub struct ExamplesOfType {
    links: IndexMap<String, Vec<String>>,
}

impl ExamplesOfType {
    pub fn record(&mut self, class_id: &str, link_line: String) {
        let bucket = self.links.entry(class_id.to_string()).or_default();
        if !bucket.contains(&link_line) {
            bucket.push(link_line);
        }
    }

    /// Render the accumulated examples listing for a class, if any
    pub fn section_for(&self, class_id: &str) -> Option<String> {
        self.links.get(class_id).map(|lines| {
            let mut section = String::from("#### Examples\n");
            for line in lines {
                section.push_str(line);
            }
            section
        })
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Bullet list of the root class rule's required properties
///
/// An absent root rule, or one without required properties, yields an
/// empty fragment rather than an error.
pub fn build_root_requirements(rules: &RuleSet) -> String {
    let Some(root) = rules.root_class_rule() else {
        return String::new();
    };

    let required: Vec<&str> = root
        .properties
        .iter()
        .filter(|p| p.required())
        .map(|p| p.label.as_str())
        .collect();

    if required.is_empty() {
        return String::new();
    }

    let mut out = String::from("- MUST include the following properties:\n");
    for name in required {
        out.push_str(&format!("  * {}\n", clean(name)));
    }
    out
}

/// Extract example resources and cross-link their parts to class rules
///
/// Walks ResourceDescriptor entities carrying the example role in
/// encounter order. Numbering is 1-based and sequential. Each artifact and
/// each artifact part gets its own anchored section with a raw entity dump;
/// parts are additionally classified against every class rule and recorded
/// in the cross-reference accumulator. Must run before class rendering.
pub fn build_examples(
    graph: &EntityGraph,
    rules: &RuleSet,
    cross: &mut ExamplesOfType,
) -> Result<String, ProfileError> {
    let mut summary = String::new();
    let mut example_count = 0usize;

    for resource in graph.of_type(RESOURCE_DESCRIPTOR_TYPE) {
        let is_example = values(resource, "hasRole")
            .into_iter()
            .any(|role| ref_id(role) == Some(EXAMPLE_ROLE));
        if !is_example {
            continue;
        }

        example_count += 1;
        let example_name = format!("Example-{}: {}", example_count, display_label(resource));
        let example_anchor = anchor(&example_name);
        summary.push_str(&format!("<a id=\"{}\"></a>\n\n", example_anchor));
        summary.push_str(&format!("## {}\n\n", example_name));

        for artifact_ref in values(resource, "hasArtifact") {
            let artifact = graph.resolve(artifact_ref);
            let artifact_name = format!("Artifact: {}", display_label(artifact));
            let artifact_anchor = anchor(&artifact_name);
            summary.push_str(&format!(
                "\n### <a id=\"{}\"></a> {}\n\n",
                artifact_anchor, artifact_name
            ));
            summary.push_str(&format!(
                "<pre>\n {}\n</pre>\n\n",
                serde_json::to_string_pretty(artifact)?
            ));

            for part_ref in values(artifact, "hasPart") {
                let part = graph.resolve(part_ref);
                let Some(part_id) = extract_id(part) else {
                    continue;
                };
                let part_name = format!("Example-{}: {}", example_count, part_id);
                let part_anchor = anchor(&part_name);
                summary.push_str(&format!(
                    "\n#### <a id=\"{}\"></a>{}\n\n",
                    part_anchor, part_name
                ));
                summary.push_str(&format!(
                    "<pre>\n {}\n</pre>\n\n",
                    serde_json::to_string_pretty(part)?
                ));

                // Non-exclusive classification: record under every class
                // rule the part satisfies.
                for rule in rules.classes.values() {
                    if rule.matches(part) {
                        cross.record(
                            &rule.id,
                            format!("-  [{}](#{})\n\n", part_name, part_anchor),
                        );
                    }
                }
            }
        }
    }

    if summary.is_empty() {
        summary = "No examples defined.\n\n".to_string();
    }
    Ok(summary)
}

/// Render every DefinedTermSet entity and register its fragments
///
/// Members are resolved through the reverse inDefinedTermSet edge and
/// sorted ascending by display label. An empty set renders the explicit
/// no-terms placeholder so the template never shows a malformed table.
pub fn build_term_sets(graph: &EntityGraph, fragments: &mut Fragments) {
    fragments.append(KEY_ALL_DEFINED_TERM_SETS, "## Defined Term Sets\n\n");

    for term_set in graph.of_type(DEFINED_TERM_SET_TYPE) {
        let set_id = extract_id(term_set).unwrap_or_default();
        let set_name = format!("Defined Term Set: {}", display_label(term_set));
        let set_anchor = anchor(&set_name);

        let mut summary = format!("### <a id=\"{}\"></a>{}\n\n", set_anchor, clean(&set_name));
        summary.push_str(&format!("ID: {}\n\n", clean(set_id)));
        summary.push_str(&format!("{}\n\n", clean(&description(term_set))));

        let mut terms = graph.referencing(IN_DEFINED_TERM_SET, set_id);
        if terms.is_empty() {
            summary.push_str(NO_TERMS_PLACEHOLDER);
        } else {
            terms.sort_by_key(|t| display_label(t).to_lowercase());

            for term in terms {
                let term_id = extract_id(term).unwrap_or_default();
                let term_name = format!("Defined Term: {}", display_label(term));
                let term_anchor = anchor(&term_name);
                let link = if is_http_uri(term_id) {
                    format!(
                        " <a href=\"{}\" target=\"_blank\" rel=\"noopener\">\u{24d8}</a>",
                        clean(term_id)
                    )
                } else {
                    String::new()
                };
                summary.push_str(&format!(
                    "### <a id=\"{}\"></a>{}{}\n",
                    term_anchor,
                    clean(&term_name),
                    link
                ));
                summary.push_str(&format!("ID: {}\n\n", clean(term_id)));
                summary.push_str(&format!("{}\n\n", clean(&description(term))));
            }
        }
        summary.push('\n');

        fragments.insert(set_id, summary.clone());
        fragments.append(KEY_ALL_DEFINED_TERM_SETS, &summary);
    }
}

/// Render every ItemList entity and register its fragments
///
/// Two passes per list: a linked table-of-contents over the sorted
/// elements, then one anchored full-record section per element. The
/// summary pass reads as a contents block regardless of record size.
pub fn build_item_lists(graph: &EntityGraph, fragments: &mut Fragments) -> Result<(), ProfileError> {
    fragments.append(KEY_ALL_ITEM_LISTS, "## Item Lists\n\n");

    for list in graph.of_type(ITEM_LIST_TYPE) {
        let list_id = extract_id(list).unwrap_or_default();
        let list_name = format!("Item List: {}", display_label(list));
        let list_anchor = anchor(&list_name);

        let mut summary = format!(
            "### <a id=\"{}\"></a>{}\n\n",
            list_anchor,
            clean(&list_name)
        );
        summary.push_str(&format!("{}\n\n", clean(&description(list))));

        let mut items: Vec<&Value> = values(list, "itemListElement")
            .into_iter()
            .map(|v| graph.resolve(v))
            .collect();

        if items.is_empty() {
            summary.push_str(NO_TERMS_PLACEHOLDER);
        } else {
            items.sort_by_key(|i| display_label(i).to_lowercase());

            for item in &items {
                let item_id = extract_id(item).unwrap_or_default();
                summary.push_str(&format!(
                    "-  [{}](#{})\n ",
                    clean(&display_label(item)),
                    anchor(item_id)
                ));
            }
            summary.push_str("<hr/>\n\n");

            for item in &items {
                let item_id = extract_id(item).unwrap_or_default();
                summary.push_str(&format!(
                    "### <a id=\"{}\"></a><pre>\n {}\n</pre>\n\n",
                    anchor(item_id),
                    serde_json::to_string_pretty(item)?
                ));
                summary.push_str(&format!("ID: {}\n\n", clean(item_id)));
            }
        }

        fragments.insert(list_id, summary.clone());
        fragments.append(KEY_ALL_ITEM_LISTS, &summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Fragments;
    use serde_json::json;

    fn example_profile() -> EntityGraph {
        EntityGraph::from_graph(vec![
            json!({
                "@id": "#Book",
                "@type": "rdfs:Class",
                "name": "Book"
            }),
            json!({
                "@id": "#Work",
                "@type": "rdfs:Class",
                "name": "CreativeWork"
            }),
            json!({
                "@id": "#example-1",
                "@type": "ResourceDescriptor",
                "name": "A sample crate",
                "hasRole": {"@id": "http://www.w3.org/ns/dx/prof/role/example"},
                "hasArtifact": {"@id": "#artifact-1"}
            }),
            json!({
                "@id": "#artifact-1",
                "name": "sample metadata",
                "hasPart": [
                    {"@id": "#part-book"},
                    {"@id": "#part-person"}
                ]
            }),
            json!({
                "@id": "#part-book",
                "@type": ["Book", "CreativeWork"],
                "title": "Sample"
            }),
            json!({
                "@id": "#part-person",
                "@type": "Person",
                "name": "Nobody"
            }),
        ])
    }

    #[test]
    fn test_examples_cross_link_all_matching_classes() {
        let graph = example_profile();
        let rules = RuleSet::parse(&graph);
        let mut cross = ExamplesOfType::default();

        let summary = build_examples(&graph, &rules, &mut cross).unwrap();

        assert!(summary.contains("## Example-1: A sample crate"));
        assert!(summary.contains("Artifact: sample metadata"));

        // the two-typed part is recorded under both classes, once each
        let book_section = cross.section_for("#Book").unwrap();
        let work_section = cross.section_for("#Work").unwrap();
        assert!(book_section.contains("#part-book"));
        assert!(work_section.contains("#part-book"));
        assert_eq!(book_section.matches("#part-book").count(), 1);

        // the unmatched part is recorded nowhere
        assert!(!book_section.contains("#part-person"));
        assert!(cross.section_for("#Person").is_none());
    }

    #[test]
    fn test_no_examples_placeholder() {
        let graph = EntityGraph::from_graph(vec![json!({
            "@id": "#r",
            "@type": "ResourceDescriptor",
            "hasRole": {"@id": "http://www.w3.org/ns/dx/prof/role/specification"}
        })]);
        let rules = RuleSet::parse(&graph);
        let mut cross = ExamplesOfType::default();

        let summary = build_examples(&graph, &rules, &mut cross).unwrap();
        assert_eq!(summary, "No examples defined.\n\n");
        assert!(cross.is_empty());
    }

    #[test]
    fn test_example_numbering_is_sequential() {
        let graph = EntityGraph::from_graph(vec![
            json!({
                "@id": "#e1",
                "@type": "ResourceDescriptor",
                "name": "first",
                "hasRole": {"@id": "http://www.w3.org/ns/dx/prof/role/example"}
            }),
            json!({
                "@id": "#skip",
                "@type": "ResourceDescriptor",
                "name": "not an example",
                "hasRole": {"@id": "http://www.w3.org/ns/dx/prof/role/guidance"}
            }),
            json!({
                "@id": "#e2",
                "@type": "ResourceDescriptor",
                "name": "second",
                "hasRole": {"@id": "http://www.w3.org/ns/dx/prof/role/example"}
            }),
        ]);
        let rules = RuleSet::parse(&graph);
        let mut cross = ExamplesOfType::default();

        let summary = build_examples(&graph, &rules, &mut cross).unwrap();
        assert!(summary.contains("## Example-1: first"));
        assert!(summary.contains("## Example-2: second"));
        assert!(!summary.contains("not an example"));
    }

    #[test]
    fn test_term_sets_sorted_caseless() {
        let graph = EntityGraph::from_graph(vec![
            json!({
                "@id": "#licences",
                "@type": "DefinedTermSet",
                "name": "Licences",
                "description": "Available licences"
            }),
            json!({
                "@id": "https://example.org/terms/zebra",
                "@type": "DefinedTerm",
                "name": "zebra",
                "inDefinedTermSet": {"@id": "#licences"}
            }),
            json!({
                "@id": "#apple",
                "@type": "DefinedTerm",
                "name": "Apple",
                "inDefinedTermSet": {"@id": "#licences"}
            }),
        ]);
        let mut fragments = Fragments::new();
        build_term_sets(&graph, &mut fragments);

        let set = fragments.get("#licences").unwrap();
        let apple_pos = set.find("Defined Term: Apple").unwrap();
        let zebra_pos = set.find("Defined Term: zebra").unwrap();
        assert!(apple_pos < zebra_pos);

        // http-identified term gets the outbound affordance
        assert!(set.contains("href=\"https://example.org/terms/zebra\""));

        let aggregate = fragments.get(KEY_ALL_DEFINED_TERM_SETS).unwrap();
        assert!(aggregate.starts_with("## Defined Term Sets\n\n"));
        assert!(aggregate.contains("Defined Term Set: Licences"));
    }

    #[test]
    fn test_empty_term_set_placeholder() {
        let graph = EntityGraph::from_graph(vec![json!({
            "@id": "#empty-set",
            "@type": "DefinedTermSet",
            "name": "Empty"
        })]);
        let mut fragments = Fragments::new();
        build_term_sets(&graph, &mut fragments);

        let set = fragments.get("#empty-set").unwrap();
        assert!(set.contains("*No terms defined for this term set*"));
        assert!(!set.contains("| Term |"));
    }

    #[test]
    fn test_item_list_two_pass_rendering() {
        let graph = EntityGraph::from_graph(vec![
            json!({
                "@id": "#list",
                "@type": "ItemList",
                "name": "Repositories",
                "description": "Known repositories",
                "itemListElement": [
                    {"@id": "#repo-b"},
                    {"@id": "#repo-a"}
                ]
            }),
            json!({"@id": "#repo-a", "name": "Alpha"}),
            json!({"@id": "#repo-b", "name": "Beta"}),
        ]);
        let mut fragments = Fragments::new();
        build_item_lists(&graph, &mut fragments).unwrap();

        let list = fragments.get("#list").unwrap();
        // sorted TOC first, separator, then full records
        let toc_alpha = list.find("[Alpha](#repo-a)").unwrap();
        let toc_beta = list.find("[Beta](#repo-b)").unwrap();
        let hr = list.find("<hr/>").unwrap();
        assert!(toc_alpha < toc_beta);
        assert!(toc_beta < hr);
        assert!(list[hr..].contains("<pre>"));
        assert!(list[hr..].contains("ID: #repo-a"));
    }

    #[test]
    fn test_empty_item_list_placeholder() {
        let graph = EntityGraph::from_graph(vec![json!({
            "@id": "#list",
            "@type": "ItemList",
            "name": "Nothing"
        })]);
        let mut fragments = Fragments::new();
        build_item_lists(&graph, &mut fragments).unwrap();
        assert!(fragments
            .get("#list")
            .unwrap()
            .contains("*No terms defined for this term set*"));
    }

    #[test]
    fn test_root_requirements() {
        let graph = EntityGraph::from_graph(vec![
            json!({
                "@id": "#Root",
                "@type": "rdfs:Class",
                "name": "Dataset"
            }),
            json!({
                "@id": "#name",
                "@type": "rdf:Property",
                "name": "name",
                "sh:minCount": 1,
                "domainIncludes": {"@id": "#Root"}
            }),
            json!({
                "@id": "#optional",
                "@type": "rdf:Property",
                "name": "keywords",
                "domainIncludes": {"@id": "#Root"}
            }),
        ]);
        let rules = RuleSet::parse(&graph);
        let out = build_root_requirements(&rules);

        assert!(out.contains("MUST include the following properties"));
        assert!(out.contains("  * name\n"));
        assert!(!out.contains("keywords"));
    }

    #[test]
    fn test_root_requirements_absent_rule() {
        let graph = EntityGraph::from_graph(vec![json!({
            "@id": "#Book",
            "@type": "rdfs:Class",
            "name": "Book"
        })]);
        let rules = RuleSet::parse(&graph);
        assert_eq!(build_root_requirements(&rules), "");
    }
}
