//! Extension rules and file-name matching.
//!
//! Each rule is keyed by the extension string without a leading dot and
//! carries two flags: whether the rule takes part in filtering at all, and
//! whether matching is case sensitive. The rule set is an owned map with
//! discrete update methods; dialogs mutate it through these methods only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-extension flags, persisted as a two-element pair `[selected, case_sensitive]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(bool, bool)", into = "(bool, bool)")]
pub struct ExtensionRule {
    /// Only selected rules participate in filtering.
    pub selected: bool,
    /// Exact byte equality instead of lowercased comparison.
    pub case_sensitive: bool,
}

impl From<(bool, bool)> for ExtensionRule {
    fn from((selected, case_sensitive): (bool, bool)) -> Self {
        Self { selected, case_sensitive }
    }
}

impl From<ExtensionRule> for (bool, bool) {
    fn from(rule: ExtensionRule) -> Self {
        (rule.selected, rule.case_sensitive)
    }
}

/// Ordered map of extension → rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionSet(BTreeMap<String, ExtensionRule>);

impl ExtensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in allow-list used before any user configuration exists.
    pub fn default_set() -> Self {
        let mut set = Self::new();
        for ext in ["png", "jpg", "jpeg", "tiff", "tif", "gif", "bmp", "raw", "eps"] {
            set.insert(ext, false);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionRule)> {
        self.0.iter().map(|(ext, rule)| (ext.as_str(), rule))
    }

    /// Insert (or overwrite) an extension as selected.
    pub fn insert(&mut self, ext: &str, case_sensitive: bool) {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() {
            return;
        }
        self.0.insert(
            ext.to_string(),
            ExtensionRule { selected: true, case_sensitive },
        );
    }

    /// Remove exactly this key, if present.
    pub fn remove(&mut self, ext: &str) {
        self.0.remove(ext);
    }

    /// Remove every key that matches case-insensitively.
    pub fn remove_all(&mut self, ext: &str) {
        let lower = ext.to_lowercase();
        self.0.retain(|key, _| key.to_lowercase() != lower);
    }

    /// Unselect everything, then re-select the named keys. Unknown names are
    /// ignored; case-sensitivity flags are left as they were.
    pub fn select_only<S: AsRef<str>>(&mut self, selected: &[S]) {
        for rule in self.0.values_mut() {
            rule.selected = false;
        }
        for ext in selected {
            if let Some(rule) = self.0.get_mut(ext.as_ref()) {
                rule.selected = true;
            }
        }
    }

    /// Whether `filename` carries an extension some selected rule accepts.
    ///
    /// The extension is the substring after the last `.` of the name (empty
    /// when there is no dot). Returns false for an empty rule set.
    pub fn matches(&self, filename: &str) -> bool {
        let ext = match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        };
        let ext_lower = ext.to_lowercase();

        self.0.iter().any(|(rule_ext, rule)| {
            rule.selected
                && if rule.case_sensitive {
                    rule_ext == ext
                } else {
                    rule_ext.to_lowercase() == ext_lower
                }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(rules: &[(&str, bool)]) -> ExtensionSet {
        let mut set = ExtensionSet::new();
        for (ext, cs) in rules {
            set.insert(ext, *cs);
        }
        set
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = ExtensionSet::new();
        assert!(!set.matches("photo.jpg"));
        assert!(!set.matches(""));
    }

    #[test]
    fn test_case_insensitive_matches_any_casing() {
        let set = set_of(&[("jpg", false)]);
        assert!(set.matches("a.jpg"));
        assert!(set.matches("a.JPG"));
        assert!(set.matches("a.Jpg"));
        assert!(!set.matches("a.jpeg"));
    }

    #[test]
    fn test_case_sensitive_requires_exact_match() {
        let set = set_of(&[("JPG", true)]);
        assert!(set.matches("a.JPG"));
        assert!(!set.matches("a.jpg"));
    }

    #[test]
    fn test_unselected_rule_does_not_match() {
        let mut set = ExtensionSet::new();
        set.insert("png", false);
        set.select_only::<&str>(&[]);
        assert!(!set.matches("a.png"));
    }

    #[test]
    fn test_extension_is_after_last_dot() {
        let set = set_of(&[("gz", false)]);
        assert!(set.matches("archive.tar.gz"));
        assert!(!set.matches("archive.gz.tar"));
    }

    #[test]
    fn test_no_dot_means_empty_extension() {
        let set = set_of(&[("jpg", false)]);
        assert!(!set.matches("README"));
        // A rule for the empty extension would match dot-less names.
        let mut set = ExtensionSet::new();
        set.0.insert(
            String::new(),
            ExtensionRule { selected: true, case_sensitive: false },
        );
        assert!(set.matches("README"));
    }

    #[test]
    fn test_select_only_preserves_case_flags() {
        let mut set = ExtensionSet::new();
        set.insert("png", true);
        set.insert("jpg", false);
        set.select_only(&["png", "nonexistent"]);

        let rules: BTreeMap<_, _> = set.iter().map(|(e, r)| (e.to_string(), *r)).collect();
        assert!(rules["png"].selected);
        assert!(rules["png"].case_sensitive);
        assert!(!rules["jpg"].selected);
        assert!(!rules["jpg"].case_sensitive);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_is_exact_remove_all_is_not() {
        let mut set = ExtensionSet::new();
        set.insert("jpg", false);
        set.insert("JPG", true);

        let mut exact = set.clone();
        exact.remove("jpg");
        assert_eq!(exact.len(), 1);

        set.remove_all("Jpg");
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_strips_leading_dot_and_ignores_empty() {
        let mut set = ExtensionSet::new();
        set.insert(".png", false);
        assert!(set.matches("a.png"));
        set.insert("", false);
        set.insert(" . ", false);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_rule_round_trips_as_flag_pair() {
        let rule = ExtensionRule { selected: true, case_sensitive: false };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, "[true,false]");
        let back: ExtensionRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
