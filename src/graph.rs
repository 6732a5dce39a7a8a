//! Entity graph with type and reverse-edge indexes
//!
//! Wraps a loaded crate's @graph and provides the lookups the documentation
//! builders need: id resolution, type buckets in encounter order, and
//! reverse edges (who references this entity through a given property).

use std::collections::HashMap;

use serde_json::Value;

use crate::entity::{extract_id, extract_types, ref_id};
use crate::error::ProfileError;

/// Indexed view over one loaded crate
///
/// All indexes are built once at construction; entities are immutable
/// afterwards. Reverse edges are a secondary index keyed by property name
/// and target id so lookbacks never rescan the graph.
#[derive(Debug)]
pub struct EntityGraph {
    entities: Vec<Value>,
    by_id: HashMap<String, usize>,
    by_type: HashMap<String, Vec<usize>>,
    reverse: HashMap<(String, String), Vec<usize>>,
}

impl EntityGraph {
    /// Build a graph from a crate's @graph array
    pub fn from_graph(entities: Vec<Value>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_type: HashMap<String, Vec<usize>> = HashMap::new();
        let mut reverse: HashMap<(String, String), Vec<usize>> = HashMap::new();

        for (idx, entity) in entities.iter().enumerate() {
            if let Some(id) = extract_id(entity) {
                // First entity wins on duplicate ids
                by_id.entry(id.to_string()).or_insert(idx);
            }

            // A multi-typed entity lands in every one of its buckets;
            // a typeless entity lands in none but stays resolvable by id.
            for type_name in extract_types(entity) {
                by_type.entry(type_name).or_default().push(idx);
            }

            if let Some(obj) = entity.as_object() {
                for (key, value) in obj {
                    if key == "@id" || key == "@type" {
                        continue;
                    }
                    let refs = match value {
                        Value::Array(arr) => arr.iter().filter_map(ref_id).collect(),
                        v => ref_id(v).into_iter().collect::<Vec<_>>(),
                    };
                    for target in refs {
                        reverse
                            .entry((key.clone(), target.to_string()))
                            .or_default()
                            .push(idx);
                    }
                }
            }
        }

        Self {
            entities,
            by_id,
            by_type,
            reverse,
        }
    }

    /// Build a graph from a full crate document (extracts @graph)
    pub fn from_document(doc: &Value) -> Result<Self, ProfileError> {
        let graph = doc
            .get("@graph")
            .and_then(|g| g.as_array())
            .ok_or(ProfileError::MissingGraph)?;
        Ok(Self::from_graph(graph.clone()))
    }

    /// Look up an entity by @id
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.by_id.get(id).map(|&idx| &self.entities[idx])
    }

    /// All entities of a type, in encounter order
    pub fn of_type(&self, type_name: &str) -> Vec<&Value> {
        self.by_type
            .get(type_name)
            .map(|indexes| indexes.iter().map(|&idx| &self.entities[idx]).collect())
            .unwrap_or_default()
    }

    /// Entities whose `property` references `target_id` (reverse edge)
    pub fn referencing(&self, property: &str, target_id: &str) -> Vec<&Value> {
        self.reverse
            .get(&(property.to_string(), target_id.to_string()))
            .map(|indexes| indexes.iter().map(|&idx| &self.entities[idx]).collect())
            .unwrap_or_default()
    }

    /// Resolve a reference value to its full entity, if known
    ///
    /// Inline nested entities and unknown ids fall back to the value itself.
    pub fn resolve<'a>(&'a self, value: &'a Value) -> &'a Value {
        ref_id(value)
            .and_then(|id| self.get(id))
            .unwrap_or(value)
    }

    /// Iterate all entities in graph order
    pub fn entities(&self) -> impl Iterator<Item = &Value> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_graph() -> EntityGraph {
        EntityGraph::from_graph(vec![
            json!({
                "@id": "#book-class",
                "@type": "rdfs:Class",
                "name": "Book"
            }),
            json!({
                "@id": "#title",
                "@type": "rdf:Property",
                "name": "title",
                "domainIncludes": {"@id": "#book-class"}
            }),
            json!({
                "@id": "#term-a",
                "@type": ["DefinedTerm", "rdfs:Class"],
                "inDefinedTermSet": {"@id": "#set"}
            }),
            json!({
                "@id": "#untyped"
            }),
        ])
    }

    #[test]
    fn test_type_buckets_encounter_order() {
        let graph = sample_graph();
        let classes = graph.of_type("rdfs:Class");
        assert_eq!(classes.len(), 2);
        assert_eq!(extract_id(classes[0]), Some("#book-class"));
        assert_eq!(extract_id(classes[1]), Some("#term-a"));

        // multi-typed entity appears in both buckets
        assert_eq!(graph.of_type("DefinedTerm").len(), 1);
    }

    #[test]
    fn test_untyped_entity_still_resolvable() {
        let graph = sample_graph();
        assert!(graph.get("#untyped").is_some());
        for (_, bucket) in graph.by_type.iter() {
            assert!(!bucket
                .iter()
                .any(|&i| extract_id(&graph.entities[i]) == Some("#untyped")));
        }
    }

    #[test]
    fn test_reverse_edges() {
        let graph = sample_graph();
        let props = graph.referencing("domainIncludes", "#book-class");
        assert_eq!(props.len(), 1);
        assert_eq!(extract_id(props[0]), Some("#title"));

        let members = graph.referencing("inDefinedTermSet", "#set");
        assert_eq!(members.len(), 1);

        assert!(graph.referencing("domainIncludes", "#missing").is_empty());
    }

    #[test]
    fn test_resolve_reference() {
        let graph = sample_graph();
        let reference = json!({"@id": "#book-class"});
        let resolved = graph.resolve(&reference);
        assert_eq!(resolved.get("name"), Some(&json!("Book")));

        // unknown ids fall back to the inline value
        let unknown = json!({"@id": "#nope", "name": "inline"});
        assert_eq!(graph.resolve(&unknown).get("name"), Some(&json!("inline")));
    }

    #[test]
    fn test_from_document() {
        let doc = json!({
            "@context": "https://w3id.org/ro/crate/1.1/context",
            "@graph": [{"@id": "./", "@type": "Dataset"}]
        });
        let graph = EntityGraph::from_document(&doc).unwrap();
        assert_eq!(graph.len(), 1);

        let bad = json!({"@context": {}});
        assert!(matches!(
            EntityGraph::from_document(&bad),
            Err(ProfileError::MissingGraph)
        ));
    }
}
