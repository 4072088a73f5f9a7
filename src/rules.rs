//! Keyword rules: word groups, filter words and the ordered-rule matcher.
//!
//! A rule document is JSON:
//!
//! {
//!   "groups": [
//!     {"normal": ["世界杯"]},
//!     {"required": ["足球"], "normal": ["赛事", "比赛"], "key": "足球赛事"}
//!   ],
//!   "filters": ["虚假"]
//! }
//!
//! Matching is two-level. Filter words are a hard veto: any filter word
//! appearing in a title (case-insensitive substring) excludes it from every
//! group. Otherwise groups are evaluated in declared order; a group matches
//! iff all required words are present AND (normal words empty OR at least
//! one present). The FIRST matching group wins: a title is attributed to
//! exactly one group, so the declared order is the authoritative tie-break.
//!
//! Validation happens at load time, not at match time: a group with neither
//! required nor normal words is rejected, and group keys must be unique
//! (duplicate keys would silently merge two rules' counts downstream).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One configured keyword rule. `group_key` doubles as the human label and
/// the statistics map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordGroup {
    pub required: Vec<String>,
    pub normal: Vec<String>,
    pub group_key: String,
}

/// Outcome of evaluating one title against the full rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A filter word vetoed the title.
    Filtered,
    /// The group at this index (declared order) claimed the title.
    Matched(usize),
    /// No filter hit and no group matched.
    NoMatch,
}

/// Validated rule set: ordered groups plus the filter word list.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub groups: Vec<WordGroup>,
    pub filter_words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    groups: Vec<RawGroup>,
    #[serde(default)]
    filters: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    normal: Vec<String>,
    /// Explicit label; derived from the word lists when absent.
    #[serde(default)]
    key: Option<String>,
}

impl RuleSet {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rules {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("parse rules {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: RuleFile = serde_json::from_str(text).context("parse rules json")?;
        Self::from_parts(file.groups, file.filters)
    }

    fn from_parts(raw_groups: Vec<RawGroup>, filters: Vec<String>) -> Result<Self> {
        let mut groups = Vec::with_capacity(raw_groups.len());
        let mut seen_keys: HashSet<String> = HashSet::new();

        for (i, raw) in raw_groups.into_iter().enumerate() {
            let required = clean_words(raw.required);
            let normal = clean_words(raw.normal);
            if required.is_empty() && normal.is_empty() {
                return Err(anyhow!(
                    "word group #{} has neither required nor normal words",
                    i + 1
                ));
            }

            let group_key = match raw.key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
                Some(k) => k,
                // Derived label: normal words when present, else required.
                None if !normal.is_empty() => normal.join("/"),
                None => required.join("/"),
            };
            if !seen_keys.insert(group_key.clone()) {
                return Err(anyhow!("duplicate group key {:?}", group_key));
            }

            groups.push(WordGroup {
                required,
                normal,
                group_key,
            });
        }

        Ok(Self {
            groups,
            filter_words: clean_words(filters),
        })
    }

    /// Evaluate a title: filter veto first, then first matching group in
    /// declared order.
    pub fn evaluate(&self, title: &str) -> MatchOutcome {
        let title_lower = title.to_lowercase();

        for word in &self.filter_words {
            if title_lower.contains(&word.to_lowercase()) {
                return MatchOutcome::Filtered;
            }
        }

        for (i, group) in self.groups.iter().enumerate() {
            if group_matches(&title_lower, group) {
                return MatchOutcome::Matched(i);
            }
        }

        MatchOutcome::NoMatch
    }

    pub fn matched_group(&self, title: &str) -> Option<&WordGroup> {
        match self.evaluate(title) {
            MatchOutcome::Matched(i) => Some(&self.groups[i]),
            _ => None,
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        matches!(self.evaluate(title), MatchOutcome::Matched(_))
    }
}

fn group_matches(title_lower: &str, group: &WordGroup) -> bool {
    let required_ok = group
        .required
        .iter()
        .all(|w| title_lower.contains(&w.to_lowercase()));
    if !required_ok {
        return false;
    }
    group.normal.is_empty()
        || group
            .normal
            .iter()
            .any(|w| title_lower.contains(&w.to_lowercase()))
}

/// Trim words and drop empties; an empty word would match every title.
fn clean_words(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_keys_prefer_normal_words() {
        let rules = RuleSet::from_json_str(
            r#"{"groups": [
                {"normal": ["世界杯", "欧冠"]},
                {"required": ["足球"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(rules.groups[0].group_key, "世界杯/欧冠");
        assert_eq!(rules.groups[1].group_key, "足球");
    }

    #[test]
    fn degenerate_and_duplicate_groups_rejected() {
        let err = RuleSet::from_json_str(r#"{"groups": [{"required": [" "]}]}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("neither required nor normal"), "{}", err);

        let err = RuleSet::from_json_str(
            r#"{"groups": [
                {"normal": ["世界杯"], "key": "体育"},
                {"required": ["足球"], "key": "体育"}
            ]}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("duplicate group key"), "{}", err);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let rules = RuleSet::from_json_str(
            r#"{"groups": [{"required": ["nba"], "normal": ["季后赛", "总决赛"]}]}"#,
        )
        .unwrap();
        assert!(rules.matches("NBA总决赛今晚开打"));
        assert!(!rules.matches("NBA今日休赛"));
    }
}
