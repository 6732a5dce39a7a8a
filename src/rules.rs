//! Profile rule parsing and crate conformance checking
//!
//! A profile crate declares its schema as `rdfs:Class` and `rdf:Property`
//! entities carrying SHACL-style count constraints. This module parses those
//! entities into rule structures and checks an arbitrary target crate
//! against them. Findings are data, never panics: each check appends an
//! issue with a level and message to the report.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::entity::{
    description, display_label, extract_id, extract_types, first_str, int_value, local_name,
    ref_id, values,
};
use crate::graph::EntityGraph;
use crate::vocab::{
    CLASS_TYPE, DOMAIN_INCLUDES, MAX_COUNT, MIN_COUNT, RANGE_INCLUDES, ROOT_ENTITY_TYPE,
    SPECIALIZATION_OF,
};

/// A profile-declared field with cardinality and range constraints
#[derive(Debug, Clone)]
pub struct PropertyRule {
    pub id: String,
    pub label: String,
    pub description: String,
    pub min_count: Option<i64>,
    /// Ids of permitted range types
    pub ranges: Vec<String>,
    /// Fixed value the property must carry, if any
    pub fixed_value: Option<String>,
}

impl PropertyRule {
    pub fn from_entity(entity: &Value) -> Self {
        let fixed_value = first_str(entity, "schema:value")
            .or_else(|| first_str(entity, "value"))
            .map(String::from);

        Self {
            id: extract_id(entity).unwrap_or_default().to_string(),
            label: display_label(entity),
            description: description(entity),
            min_count: int_value(entity, MIN_COUNT),
            ranges: values(entity, RANGE_INCLUDES)
                .into_iter()
                .filter_map(ref_id)
                .map(String::from)
                .collect(),
            fixed_value,
        }
    }

    /// Required iff a minimum count is declared and positive
    pub fn required(&self) -> bool {
        matches!(self.min_count, Some(n) if n > 0)
    }
}

/// A profile-declared entity type with cardinality bounds
#[derive(Debug, Clone)]
pub struct ClassRule {
    pub id: String,
    pub label: String,
    pub description: String,
    pub min_count: Option<i64>,
    pub max_count: Option<i64>,
    /// Ids of the base definitions this class specializes
    pub specializes: Vec<String>,
    /// Type names an instance may carry to count as this class
    pub target_types: Vec<String>,
    /// Property rules attached via the reverse domainIncludes edge
    pub properties: Vec<PropertyRule>,
}

impl ClassRule {
    fn from_entity(entity: &Value, graph: &EntityGraph) -> Self {
        let id = extract_id(entity).unwrap_or_default().to_string();
        let label = display_label(entity);
        let specializes: Vec<String> = values(entity, SPECIALIZATION_OF)
            .into_iter()
            .filter_map(ref_id)
            .map(String::from)
            .collect();

        // An instance matches when its @type carries the class label, the
        // class id (or its local name), or the local name of any
        // specialized base type.
        let mut target_types = vec![label.clone()];
        for candidate in std::iter::once(id.as_str()).chain(specializes.iter().map(String::as_str))
        {
            for name in [candidate, local_name(candidate)] {
                if !name.is_empty() && !target_types.iter().any(|t| t == name) {
                    target_types.push(name.to_string());
                }
            }
        }

        let properties = graph
            .referencing(DOMAIN_INCLUDES, &id)
            .into_iter()
            .map(PropertyRule::from_entity)
            .collect();

        Self {
            id,
            label,
            description: description(entity),
            min_count: int_value(entity, MIN_COUNT),
            max_count: int_value(entity, MAX_COUNT),
            specializes,
            target_types,
            properties,
        }
    }

    /// Classify an arbitrary entity as an instance of this class
    ///
    /// Non-exclusive: an entity may match any number of class rules.
    pub fn matches(&self, entity: &Value) -> bool {
        extract_types(entity)
            .iter()
            .any(|t| self.target_types.iter().any(|target| target == t))
    }
}

/// All rules parsed from one profile crate
#[derive(Debug)]
pub struct RuleSet {
    /// Class id -> rule, in profile encounter order
    pub classes: IndexMap<String, ClassRule>,
    root_class_id: Option<String>,
}

impl RuleSet {
    /// Parse class and property rules from a loaded profile crate
    ///
    /// Must run before any resolution; the result is read-only thereafter.
    pub fn parse(graph: &EntityGraph) -> Self {
        let mut classes = IndexMap::new();
        for entity in graph.of_type(CLASS_TYPE) {
            let rule = ClassRule::from_entity(entity, graph);
            if !rule.id.is_empty() {
                classes.insert(rule.id.clone(), rule);
            }
        }

        // The root class rule is the one describing the crate's root data
        // entity. A profile without one simply has no root requirements.
        let root_class_id = classes
            .values()
            .find(|rule| rule.target_types.iter().any(|t| t == ROOT_ENTITY_TYPE))
            .map(|rule| rule.id.clone());

        Self {
            classes,
            root_class_id,
        }
    }

    /// The profile's designated root-entity class rule, if any
    pub fn root_class_rule(&self) -> Option<&ClassRule> {
        self.root_class_id
            .as_deref()
            .and_then(|id| self.classes.get(id))
    }

    /// Check a target crate against this rule set
    ///
    /// Single synchronous pass; all findings are collected, none abort.
    pub fn validate_crate(&self, target: &EntityGraph) -> ValidationReport {
        let mut report = ValidationReport::default();

        for rule in self.classes.values() {
            let instances: Vec<&Value> =
                target.entities().filter(|e| rule.matches(e)).collect();
            let count = instances.len() as i64;

            match rule.min_count {
                Some(min) if min > 0 && count < min => {
                    report.push_error(format!(
                        "Expected at least {} instances of {}, found {}",
                        min, rule.label, count
                    ));
                }
                Some(0) if count == 0 => {
                    report.push_warning(format!(
                        "Instances of {} SHOULD be present but none were found",
                        rule.label
                    ));
                }
                _ => {}
            }

            if let Some(max) = rule.max_count {
                if max > 0 && count > max {
                    report.push_error(format!(
                        "Expected at most {} instances of {}, found {}",
                        max, rule.label, count
                    ));
                }
            }

            for instance in instances {
                let instance_id = extract_id(instance).unwrap_or("<no id>");
                for prop in &rule.properties {
                    let present = values(instance, &prop.label);
                    if prop.required() && present.is_empty() {
                        report.push_error(format!(
                            "Entity {} is missing required property {} ({})",
                            instance_id, prop.label, rule.label
                        ));
                        continue;
                    }
                    if let Some(fixed) = &prop.fixed_value {
                        let matches_fixed = present.iter().any(|v| {
                            v.as_str() == Some(fixed.as_str())
                                || ref_id(v) == Some(fixed.as_str())
                        });
                        if !present.is_empty() && !matches_fixed {
                            report.push_error(format!(
                                "Entity {} property {} must have value {}",
                                instance_id, prop.label, fixed
                            ));
                        }
                    }
                }
            }
        }

        report
    }
}

/// A single validation finding
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub level: String,
    pub message: String,
}

/// Result of validating one target crate
///
/// The field is named `error` to match the report shape consumed by
/// downstream tooling; warnings carry `level: "warning"` within it.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub error: Vec<Issue>,
}

impl ValidationReport {
    fn push_error(&mut self, message: String) {
        self.error.push(Issue {
            level: "error".to_string(),
            message,
        });
    }

    fn push_warning(&mut self, message: String) {
        self.error.push(Issue {
            level: "warning".to_string(),
            message,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_empty()
    }
}
