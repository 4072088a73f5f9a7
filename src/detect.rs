//! NewTitleDetector — diff the most recent snapshot against the union of all
//! earlier snapshots of the day, per source.
//!
//! Fewer than 2 snapshots means no history yet: every title of the single
//! snapshot (if any) counts as new. Detection is exact string match on the
//! title; sources are keyed by display alias, like the decoded files.

use std::collections::{BTreeMap, BTreeSet};

use crate::codec::DecodedSnapshot;
use crate::metrics;

pub type NewTitles = BTreeMap<String, BTreeSet<String>>;

pub fn detect_new(snapshots: &[(String, DecodedSnapshot)]) -> NewTitles {
    let mut new_titles = NewTitles::new();

    let Some(((_, latest), earlier)) = snapshots.split_last() else {
        return new_titles;
    };

    // Union of every title seen before the latest snapshot, per alias.
    let mut history: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (_, snapshot) in earlier {
        for section in &snapshot.sections {
            let seen = history.entry(section.alias.as_str()).or_default();
            for parsed in &section.titles {
                seen.insert(parsed.title.as_str());
            }
        }
    }

    let mut found = 0u64;
    for section in &latest.sections {
        let seen = history.get(section.alias.as_str());
        let fresh: BTreeSet<String> = section
            .titles
            .iter()
            .filter(|t| seen.map_or(true, |s| !s.contains(t.title.as_str())))
            .map(|t| t.title.clone())
            .collect();
        found += fresh.len() as u64;
        new_titles.insert(section.alias.clone(), fresh);
    }

    metrics::record_new_titles(found);
    new_titles
}

/// Convenience lookup over the detector output.
pub fn is_new(new_titles: &NewTitles, alias: &str, title: &str) -> bool {
    new_titles
        .get(alias)
        .map_or(false, |titles| titles.contains(title))
}
