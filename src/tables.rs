//! Class and property table rendering
//!
//! Produces the class documentation (cardinality narrative, cardinality
//! table, property table, accumulated examples) and the alphabetical
//! property index. Classes reach their properties through the reverse
//! domainIncludes edge; no inheritance is modeled.

use crate::anchor::anchor;
use crate::entity::{clean, description, display_label, extract_id, is_http_uri, ref_id, values};
use crate::graph::EntityGraph;
use crate::rules::{ClassRule, RuleSet};
use crate::sections::ExamplesOfType;
use crate::template::{Fragments, KEY_ALL};
use crate::vocab::{DOMAIN_INCLUDES, PROPERTY_TYPE, SPECIALIZATION_OF};

/// Link a type id to its class documentation anchor when the id names a
/// known entity, otherwise render the id as plain text
fn class_link(graph: &EntityGraph, id: &str) -> String {
    match graph.get(id) {
        Some(entity) => {
            let label = display_label(entity);
            format!(
                "<a href=\"#{}\">{}</a>",
                anchor(&format!("Class: {}", label)),
                clean(&label)
            )
        }
        None => clean(id),
    }
}

/// Render a property's permitted ranges as a comma-separated cell
///
/// Known range ids link to the class documentation; unknown ids render as
/// plain text; no declared range defaults to "Text".
fn range_cell(graph: &EntityGraph, ranges: &[String]) -> String {
    if ranges.is_empty() {
        return "Text".to_string();
    }
    ranges
        .iter()
        .map(|id| class_link(graph, id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cardinality narrative for a class rule
///
/// Tier policy: no minimum -> MAY, minimum of zero -> SHOULD, positive
/// minimum -> MUST with the instance count; a positive maximum appends a
/// MAY upper-bound note.
fn cardinality_narrative(rule: &ClassRule) -> String {
    let mut out = match rule.min_count {
        None => "Instances of this type MAY be present in the crate.\n\n".to_string(),
        Some(0) => "Instances of this type SHOULD be present in the crate.\n\n".to_string(),
        Some(min) => format!(
            "At least {} instances of this type MUST be present in the crate.\n\n",
            min
        ),
    };
    if let Some(max) = rule.max_count {
        if max > 0 {
            out.push_str(&format!(
                "A maximum of {} instances of this type MAY be present in the crate.\n\n",
                max
            ));
        }
    }
    out
}

fn count_cell(count: Option<i64>) -> String {
    count.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Render every class rule and append the result to the `all` aggregate
///
/// Consumes the cross-reference accumulator filled by example extraction,
/// so examples must already be processed when this runs.
pub fn build_classes(
    graph: &EntityGraph,
    rules: &RuleSet,
    cross: &ExamplesOfType,
    fragments: &mut Fragments,
) {
    fragments.append(
        KEY_ALL,
        "## Types of entities (specializations of Classes) and expected Properties\n\n",
    );

    for rule in rules.classes.values() {
        let class_name = format!("Class: {}", rule.label);
        let mut summary = format!(
            "\n### <a id=\"{}\"></a> {}\n\n",
            anchor(&class_name),
            clean(&class_name)
        );
        summary.push_str(&format!("{}\n\n", clean(&rule.description)));
        summary.push_str(&cardinality_narrative(rule));

        summary.push_str("| Min Count | Max Count |\n");
        summary.push_str("| --------- | --------- |\n");
        summary.push_str(&format!(
            "| {} | {} |\n\n",
            count_cell(rule.min_count),
            count_cell(rule.max_count)
        ));

        summary.push_str("| Property | Required | Description | Range | Value |\n");
        summary.push_str("| -------- | -------- | ----------- | ----- | ----- |\n");

        if !rule.specializes.is_empty() {
            summary.push_str(&format!(
                "| @type | Yes |  |  | {} |\n",
                clean(&rule.specializes.join(", "))
            ));
        }

        if rule.properties.is_empty() {
            summary.push_str("\n*No properties defined for this class*\n\n");
        } else {
            // Required properties first, alphabetical within each group
            let mut props = rule.properties.clone();
            props.sort_by(|a, b| {
                b.required()
                    .cmp(&a.required())
                    .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
            });

            for prop in &props {
                let prop_anchor = anchor(&format!("Property: {}", prop.label));
                summary.push_str(&format!(
                    "| <a href=\"#{}\">{}</a> | {} | {} | {} | {} |\n",
                    prop_anchor,
                    clean(&prop.label),
                    if prop.required() { "Yes" } else { "No" },
                    clean(&prop.description),
                    range_cell(graph, &prop.ranges),
                    clean(prop.fixed_value.as_deref().unwrap_or_default())
                ));
            }
        }

        summary.push('\n');

        if let Some(examples) = cross.section_for(&rule.id) {
            summary.push_str(&format!("### Examples of Type\n{}\n", examples));
        }

        fragments.insert(rule.id.clone(), summary.clone());
        fragments.append(KEY_ALL, &summary);
    }
}

/// Render the alphabetical all-properties index and append it to `all`
///
/// One anchored section per rdf:Property entity, with range and domain
/// ids resolved to local anchors when the id names a known entity.
pub fn build_property_index(graph: &EntityGraph, fragments: &mut Fragments) {
    let mut summary = "## All Properties\n\n".to_string();

    let mut properties = graph.of_type(PROPERTY_TYPE);
    properties.sort_by_key(|p| display_label(p).to_lowercase());

    for prop in properties {
        let prop_id = extract_id(prop).unwrap_or_default();
        let prop_name = format!("Property: {}", display_label(prop));
        let prop_anchor = anchor(&prop_name);

        // Outbound link to the base definition this property specializes
        let base_id = values(prop, SPECIALIZATION_OF)
            .into_iter()
            .find_map(ref_id)
            .unwrap_or_default();
        let link = if is_http_uri(base_id) {
            format!(
                " <a href=\"{}\" target=\"_blank\" rel=\"noopener\">\u{24d8}</a>",
                clean(base_id)
            )
        } else {
            String::new()
        };

        let ranges: Vec<String> = values(prop, "rangeIncludes")
            .into_iter()
            .filter_map(ref_id)
            .map(String::from)
            .collect();

        let domains = values(prop, DOMAIN_INCLUDES)
            .into_iter()
            .filter_map(ref_id)
            .map(|id| class_link(graph, id))
            .collect::<Vec<_>>()
            .join(", ");

        summary.push_str(&format!(
            "### <a id=\"{}\"></a> {}{}\n\n",
            prop_anchor,
            clean(&prop_name),
            link
        ));
        summary.push_str(&format!("ID: {}\n\n", clean(prop_id)));
        summary.push_str("| Description | Range | Occurs in Domain(s) |\n");
        summary.push_str("| ----------- | ----------- | ----------- |\n");
        summary.push_str(&format!(
            "| {} | {} | {} |\n",
            clean(&description(prop)),
            range_cell(graph, &ranges),
            domains
        ));
    }

    fragments.append(KEY_ALL, &summary);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book_profile() -> EntityGraph {
        EntityGraph::from_graph(vec![
            json!({
                "@id": "#Book",
                "@type": "rdfs:Class",
                "name": "Book",
                "description": "A published book",
                "sh:minCount": 1,
                "prov:specializationOf": {"@id": "https://schema.org/Book"}
            }),
            json!({
                "@id": "#title",
                "@type": "rdf:Property",
                "name": "title",
                "description": "The book title",
                "sh:minCount": 1,
                "domainIncludes": {"@id": "#Book"}
            }),
            json!({
                "@id": "#author",
                "@type": "rdf:Property",
                "name": "author",
                "domainIncludes": {"@id": "#Book"},
                "rangeIncludes": {"@id": "#Person"}
            }),
            json!({
                "@id": "#Person",
                "@type": "rdfs:Class",
                "name": "Person"
            }),
        ])
    }

    #[test]
    fn test_book_class_section_end_to_end() {
        let graph = book_profile();
        let rules = RuleSet::parse(&graph);
        let cross = ExamplesOfType::default();
        let mut fragments = Fragments::new();

        build_classes(&graph, &rules, &cross, &mut fragments);

        let book = fragments.get("#Book").unwrap();
        assert!(book.contains("At least 1 instances of this type MUST be present"));
        assert!(book.contains("| 1 | N/A |"));

        // exactly one required row, and it sorts before the optional one
        assert_eq!(book.matches("| Yes |").count(), 2); // @type row + title
        let title_pos = book.find(">title</a>").unwrap();
        let author_pos = book.find(">author</a>").unwrap();
        assert!(title_pos < author_pos);
    }

    #[test]
    fn test_cardinality_tiers() {
        let graph = EntityGraph::from_graph(vec![
            json!({"@id": "#may", "@type": "rdfs:Class", "name": "May"}),
            json!({"@id": "#should", "@type": "rdfs:Class", "name": "Should", "sh:minCount": 0}),
            json!({
                "@id": "#bounded",
                "@type": "rdfs:Class",
                "name": "Bounded",
                "sh:minCount": 2,
                "sh:maxCount": 5
            }),
        ]);
        let rules = RuleSet::parse(&graph);
        let cross = ExamplesOfType::default();
        let mut fragments = Fragments::new();
        build_classes(&graph, &rules, &cross, &mut fragments);

        assert!(fragments
            .get("#may")
            .unwrap()
            .contains("MAY be present in the crate"));
        assert!(fragments
            .get("#should")
            .unwrap()
            .contains("SHOULD be present in the crate"));
        let bounded = fragments.get("#bounded").unwrap();
        assert!(bounded.contains("At least 2 instances of this type MUST be present"));
        assert!(bounded.contains("A maximum of 5 instances of this type MAY be present"));
        assert!(bounded.contains("| 2 | 5 |"));
    }

    #[test]
    fn test_range_resolution() {
        let graph = book_profile();
        let rules = RuleSet::parse(&graph);
        let cross = ExamplesOfType::default();
        let mut fragments = Fragments::new();
        build_classes(&graph, &rules, &cross, &mut fragments);

        let book = fragments.get("#Book").unwrap();
        // known range id resolves to a class anchor
        assert!(book.contains("<a href=\"#class-person\">Person</a>"));
        // undeclared range defaults to Text (title row)
        assert!(book.contains("| Text |"));
    }

    #[test]
    fn test_no_properties_placeholder() {
        let graph = EntityGraph::from_graph(vec![json!({
            "@id": "#Lonely",
            "@type": "rdfs:Class",
            "name": "Lonely"
        })]);
        let rules = RuleSet::parse(&graph);
        let cross = ExamplesOfType::default();
        let mut fragments = Fragments::new();
        build_classes(&graph, &rules, &cross, &mut fragments);

        assert!(fragments
            .get("#Lonely")
            .unwrap()
            .contains("*No properties defined for this class*"));
    }

    #[test]
    fn test_examples_of_type_appended() {
        let graph = book_profile();
        let rules = RuleSet::parse(&graph);
        let mut cross = ExamplesOfType::default();
        cross.record("#Book", "-  [Example-1: #b](#example-1-b)\n\n".to_string());

        let mut fragments = Fragments::new();
        build_classes(&graph, &rules, &cross, &mut fragments);

        let book = fragments.get("#Book").unwrap();
        assert!(book.contains("### Examples of Type"));
        assert!(book.contains("[Example-1: #b](#example-1-b)"));
        // classes without recorded examples get no such section
        assert!(!fragments.get("#Person").unwrap().contains("Examples of Type"));
    }

    #[test]
    fn test_property_index_alphabetical() {
        let graph = book_profile();
        let mut fragments = Fragments::new();
        build_property_index(&graph, &mut fragments);

        let index = fragments.get(KEY_ALL).unwrap();
        assert!(index.contains("## All Properties"));
        let author_pos = index.find("Property: author").unwrap();
        let title_pos = index.find("Property: title").unwrap();
        assert!(author_pos < title_pos);

        // domain resolves back to the class anchor
        assert!(index.contains("<a href=\"#class-book\">Book</a>"));
    }
}
