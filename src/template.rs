//! Fragment map and placeholder substitution
//!
//! Documentation sections register named markdown fragments; the template
//! references them as `${rules.KEY}`. Missing keys render as empty strings
//! so optional sections never break the document.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{rules\.([^}]+)\}").expect("placeholder pattern is valid"));

/// Semantic key for the combined class and property documentation
pub const KEY_ALL: &str = "all";
/// Semantic key for the examples section
pub const KEY_EXAMPLES: &str = "examples";
/// Aggregate key collecting every term-set fragment in processing order
pub const KEY_ALL_DEFINED_TERM_SETS: &str = "allDefinedTermSets";
/// Aggregate key collecting every item-list fragment in processing order
pub const KEY_ALL_ITEM_LISTS: &str = "allItemLists";
/// Semantic key for the root-entity requirements bullet list
pub const KEY_ROOT_DATA_ENTITY: &str = "rootDataEntity";
/// Semantic key for the provenance sentence
pub const KEY_PROVENANCE: &str = "provenance";

/// Named markdown fragments produced during one generation run
///
/// Keys are either semantic (`all`, `examples`, ...) or entity ids.
/// Insertion order is preserved; `insert` is write-once, aggregates grow
/// through `append`.
#[derive(Debug, Default)]
pub struct Fragments {
    map: IndexMap<String, String>,
}

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fragment; the first writer for a key wins
    pub fn insert(&mut self, key: impl Into<String>, fragment: impl Into<String>) {
        self.map.entry(key.into()).or_insert_with(|| fragment.into());
    }

    /// Append to an aggregate fragment, creating it if absent
    pub fn append(&mut self, key: impl Into<String>, fragment: &str) {
        self.map.entry(key.into()).or_default().push_str(fragment);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }
}

/// Substitute `${rules.KEY}` placeholders with registered fragments
///
/// Unregistered keys substitute the empty string.
pub fn render(template: &str, fragments: &Fragments) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            fragments.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
