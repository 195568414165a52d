//! Title-prefix auto-labeling.
//!
//! A title such as `BUG: crash on save` gets the `bug` label. Prefixes are
//! matched case-insensitively at the start of the title and must be
//! followed by a colon. The title itself is never rewritten.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Issue;

/// A single prefix rule: titles matching `pattern` receive `label`.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pattern: Regex,
    label: String,
}

impl LabelRule {
    /// Build a rule from a list of prefix keywords.
    ///
    /// The keywords become an anchored, case-insensitive alternation followed by `:`.
    ///
    /// # Panics
    ///
    /// Never for keyword input: every keyword is escaped before compiling.
    #[must_use]
    pub fn new(prefixes: &[&str], label: impl Into<String>) -> Self {
        let alternation = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("(?i)^({alternation}):"))
            .expect("escaped keyword alternation is a valid regex");
        Self {
            pattern,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

static DEFAULT_RULES: Lazy<Vec<LabelRule>> = Lazy::new(|| {
    vec![
        LabelRule::new(&["BUG", "FIX", "BUGFIX"], "bug"),
        LabelRule::new(&["FEAT", "FEATURE"], "feature"),
        LabelRule::new(&["DOCS", "DOCUMENTATION"], "documentation"),
        LabelRule::new(&["REFACTOR"], "refactor"),
        LabelRule::new(&["TEST", "TESTS"], "testing"),
        LabelRule::new(&["CHORE"], "chore"),
    ]
});

/// The built-in rule table, in evaluation order.
#[must_use]
pub fn default_rules() -> &'static [LabelRule] {
    &DEFAULT_RULES
}

/// Applies an ordered rule list to issues.
#[derive(Debug, Clone, Copy)]
pub struct Labeler<'a> {
    rules: &'a [LabelRule],
}

impl Default for Labeler<'static> {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl<'a> Labeler<'a> {
    #[must_use]
    pub const fn new(rules: &'a [LabelRule]) -> Self {
        Self { rules }
    }

    /// Labels every matching rule would add for `title`, in rule order.
    pub fn labels_for(&self, title: &str) -> impl Iterator<Item = &'a str> {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(title))
            .map(LabelRule::label)
    }

    /// Merge the labels derived from the title into the issue and re-sort.
    pub fn apply(&self, issue: &mut Issue) {
        let derived: Vec<String> = self.labels_for(&issue.title).map(String::from).collect();
        issue.labels.extend(derived);
        normalize_labels(&mut issue.labels);
    }
}

/// Auto-label an issue with the default rules.
pub fn auto_label(issue: &mut Issue) {
    Labeler::default().apply(issue);
}

/// Sort labels ascending (byte order) and drop duplicates.
pub fn normalize_labels(labels: &mut Vec<String>) {
    labels.sort();
    labels.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::now;
    use proptest::prelude::*;

    fn labeled(title: &str) -> Vec<String> {
        let mut issue = Issue::new(1, title, now());
        auto_label(&mut issue);
        issue.labels
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(labeled("BUG: crash on save"), vec!["bug"]);
        assert_eq!(labeled("fix: off by one"), vec!["bug"]);
        assert_eq!(labeled("BugFix: typo"), vec!["bug"]);
        assert_eq!(labeled("feat: export"), vec!["feature"]);
        assert_eq!(labeled("FEATURE: import"), vec!["feature"]);
        assert_eq!(labeled("Docs: readme"), vec!["documentation"]);
        assert_eq!(labeled("DOCUMENTATION: guide"), vec!["documentation"]);
        assert_eq!(labeled("refactor: split module"), vec!["refactor"]);
        assert_eq!(labeled("TEST: cover parser"), vec!["testing"]);
        assert_eq!(labeled("tests: more"), vec!["testing"]);
        assert_eq!(labeled("chore: bump deps"), vec!["chore"]);
    }

    #[test]
    fn test_prefix_must_be_anchored_and_colon_terminated() {
        assert!(labeled("Crash: BUG: nested").is_empty());
        assert!(labeled("BUG crash without colon").is_empty());
        assert!(labeled(" BUG: leading space").is_empty());
        assert!(labeled("BUGS: plural is not a keyword").is_empty());
        assert!(labeled("FEATURES: neither").is_empty());
    }

    #[test]
    fn test_title_is_not_stripped() {
        let mut issue = Issue::new(1, "BUG: crash", now());
        auto_label(&mut issue);
        assert_eq!(issue.title, "BUG: crash");
    }

    #[test]
    fn test_merges_with_existing_labels() {
        let mut issue = Issue::new(1, "FEAT: export", now());
        issue.labels = vec!["ui".to_string(), "feature".to_string(), "api".to_string()];
        auto_label(&mut issue);
        assert_eq!(issue.labels, vec!["api", "feature", "ui"]);
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let mut labels = vec!["bug".to_string(), "UI".to_string(), "api".to_string()];
        normalize_labels(&mut labels);
        assert_eq!(labels, vec!["UI", "api", "bug"]);
    }

    #[test]
    fn test_custom_rules() {
        let rules = vec![
            LabelRule::new(&["PERF"], "performance"),
            LabelRule::new(&["PERF", "SPEED"], "speed"),
        ];
        let mut issue = Issue::new(1, "perf: faster load", now());
        Labeler::new(&rules).apply(&mut issue);
        assert_eq!(issue.labels, vec!["performance", "speed"]);
    }

    #[test]
    fn test_keywords_are_escaped() {
        let rule = LabelRule::new(&["C++"], "cpp");
        assert!(rule.matches("c++: templates"));
        assert!(!rule.matches("cc: nope"));
    }

    proptest! {
        #[test]
        fn prop_labeling_is_idempotent(
            title in "(BUG|fix|Feat|docs|TEST|chore|misc)?:? ?[a-z ]{0,20}",
            existing in proptest::collection::vec("[a-zA-Z]{1,6}", 0..5),
        ) {
            let mut once = Issue::new(1, title, now());
            once.labels = existing;
            auto_label(&mut once);
            let mut twice = once.clone();
            auto_label(&mut twice);
            prop_assert_eq!(&once.labels, &twice.labels);

            let mut sorted = once.labels.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(once.labels, sorted);
        }
    }
}
