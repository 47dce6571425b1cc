//! Per-chapter link maps.
//!
//! Keys are globally unique by convention, not by enforcement: chapters
//! prefix their keys with their own nav id (e.g. `tdse-1d.utils`). The
//! seed bundle is a JSON document using the same camelCase category
//! names chapters use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The four link maps a chapter contributes.
///
/// All categories are optional in serialized form; a missing category is
/// an empty map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkBundle {
    /// External links to outside resources.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ext_links: BTreeMap<String, String>,
    /// Links to API documentation.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub api_links: BTreeMap<String, String>,
    /// Cross-links to other pages or chapters in the gallery.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cross_links: BTreeMap<String, String>,
    /// Links to source repositories or files.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub github_links: BTreeMap<String, String>,
}

impl LinkBundle {
    /// Parse a bundle from a JSON document (the base links seed).
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Parse`] for malformed JSON.
    pub fn from_json(content: &str) -> Result<Self, BundleError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(BundleError::Parse)
    }

    /// Merge another bundle into this one, category by category.
    ///
    /// A shallow union per category: `other`'s entries overwrite
    /// existing keys. Overwrites are logged at debug level but raise no
    /// error.
    pub fn merge_from(&mut self, other: &Self) {
        merge_category(&mut self.ext_links, &other.ext_links, "ext");
        merge_category(&mut self.api_links, &other.api_links, "api");
        merge_category(&mut self.cross_links, &other.cross_links, "cross");
        merge_category(&mut self.github_links, &other.github_links, "github");
    }

    /// Total number of entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ext_links.len() + self.api_links.len() + self.cross_links.len() + self.github_links.len()
    }

    /// Whether all categories are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn merge_category(
    into: &mut BTreeMap<String, String>,
    from: &BTreeMap<String, String>,
    category: &str,
) {
    for (key, value) in from {
        if into.insert(key.clone(), value.clone()).is_some() {
            tracing::debug!(category, key = %key, "link key overwritten by later bundle");
        }
    }
}

/// Error type for bundle parsing.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// JSON parsing error.
    #[error("invalid links document: {0}")]
    Parse(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bundle(cross: &[(&str, &str)]) -> LinkBundle {
        LinkBundle {
            cross_links: cross
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_empty_document() {
        let parsed = LinkBundle::from_json("").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_camel_case_categories() {
        let json = r#"{
            "extLinks": { "w3nest": "https://w3nest.org" },
            "crossLinks": { "contribute": "@nav/contribute" }
        }"#;
        let parsed = LinkBundle::from_json(json).unwrap();
        assert_eq!(
            parsed.ext_links.get("w3nest"),
            Some(&"https://w3nest.org".to_owned())
        );
        assert_eq!(
            parsed.cross_links.get("contribute"),
            Some(&"@nav/contribute".to_owned())
        );
        assert!(parsed.api_links.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(LinkBundle::from_json("{ nope").is_err());
    }

    #[test]
    fn test_merge_union() {
        let mut acc = bundle(&[("a.one", "@nav/a/one")]);
        acc.merge_from(&bundle(&[("b.two", "@nav/b/two")]));

        assert_eq!(acc.cross_links.len(), 2);
        assert_eq!(acc.cross_links.get("a.one"), Some(&"@nav/a/one".to_owned()));
        assert_eq!(acc.cross_links.get("b.two"), Some(&"@nav/b/two".to_owned()));
    }

    #[test]
    fn test_merge_last_wins() {
        let mut acc = bundle(&[("shared", "first")]);
        acc.merge_from(&bundle(&[("shared", "second")]));

        assert_eq!(acc.cross_links.get("shared"), Some(&"second".to_owned()));
        assert_eq!(acc.cross_links.len(), 1);
    }

    #[test]
    fn test_merge_categories_independent() {
        let mut acc = LinkBundle::default();
        acc.ext_links.insert("key".to_owned(), "https://ext".to_owned());
        let mut other = LinkBundle::default();
        other.api_links.insert("key".to_owned(), "@nav/api".to_owned());

        acc.merge_from(&other);
        assert_eq!(acc.ext_links.get("key"), Some(&"https://ext".to_owned()));
        assert_eq!(acc.api_links.get("key"), Some(&"@nav/api".to_owned()));
    }
}
