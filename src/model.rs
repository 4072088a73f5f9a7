//! Core data model: per-snapshot title records and their merged, day-level
//! aggregate view.
//!
//! Ownership is strictly sequential: a FetchBatch is built once per run,
//! encoded into exactly one snapshot file, and never mutated afterwards.
//! AggregatedTitleInfo values belong to the per-day aggregation fold.

use serde::{Deserialize, Serialize};

/// One distinct title observed at one or more positions within a single
/// snapshot. Ranks keep insertion order and never repeat; a title promoted
/// or demoted between poll ticks of one fetch keeps every observed position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    pub title: String,
    pub ranks: Vec<u32>,
    pub url: Option<String>,
    pub mobile_url: Option<String>,
}

impl TitleRecord {
    pub fn new(
        title: impl Into<String>,
        rank: u32,
        url: Option<String>,
        mobile_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            ranks: vec![rank],
            url,
            mobile_url,
        }
    }

    /// Append a rank unless already present (ordered-set semantics).
    pub fn push_rank(&mut self, rank: u32) {
        if !self.ranks.contains(&rank) {
            self.ranks.push(rank);
        }
    }

    pub fn min_rank(&self) -> Option<u32> {
        self.ranks.iter().copied().min()
    }
}

/// Titles captured from one source in one fetch cycle, in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSnapshot {
    pub source_id: String,
    pub alias: String,
    pub time_label: String,
    pub titles: Vec<TitleRecord>,
}

impl SourceSnapshot {
    pub fn new(
        source_id: impl Into<String>,
        alias: impl Into<String>,
        time_label: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            alias: alias.into(),
            time_label: time_label.into(),
            titles: Vec::new(),
        }
    }

    /// Record a sighting of `title` at `rank`. A repeated title collects the
    /// extra rank; url/mobile_url stick from the first sighting.
    pub fn record(&mut self, title: &str, rank: u32, url: Option<&str>, mobile_url: Option<&str>) {
        if let Some(rec) = self.titles.iter_mut().find(|r| r.title == title) {
            rec.push_rank(rank);
            return;
        }
        self.titles.push(TitleRecord::new(
            title,
            rank,
            url.filter(|s| !s.is_empty()).map(str::to_string),
            mobile_url.filter(|s| !s.is_empty()).map(str::to_string),
        ));
    }

    pub fn get(&self, title: &str) -> Option<&TitleRecord> {
        self.titles.iter().find(|r| r.title == title)
    }
}

/// A source whose fetch failed; recorded alongside the snapshots so the
/// encoded file and the report can list it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSource {
    pub source_id: String,
    pub alias: String,
}

/// Everything one fetch cycle produced: one SourceSnapshot per successful
/// source plus the failure list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchBatch {
    pub snapshots: Vec<SourceSnapshot>,
    pub failures: Vec<FailedSource>,
}

impl FetchBatch {
    /// Live id -> alias table for this batch (successful and failed sources).
    pub fn alias_map(&self) -> std::collections::BTreeMap<String, String> {
        let mut map = std::collections::BTreeMap::new();
        for s in &self.snapshots {
            map.insert(s.source_id.clone(), s.alias.clone());
        }
        for f in &self.failures {
            map.insert(f.source_id.clone(), f.alias.clone());
        }
        map
    }

    pub fn title_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.titles.len()).sum()
    }
}

/// Merged view of one title across every snapshot of the same day.
///
/// Built by folding chronological sightings: first sighting pins first_time
/// and the initial rank; every later sighting overwrites last_time, bumps
/// occurrences and unions any unseen rank. The first non-empty url wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedTitleInfo {
    pub first_time: String,
    pub last_time: String,
    pub occurrences: u32,
    pub ranks: Vec<u32>,
    pub url: Option<String>,
    pub mobile_url: Option<String>,
}

impl AggregatedTitleInfo {
    pub fn first_sighting(
        time_label: &str,
        rank: u32,
        url: Option<String>,
        mobile_url: Option<String>,
    ) -> Self {
        Self {
            first_time: time_label.to_string(),
            last_time: time_label.to_string(),
            occurrences: 1,
            ranks: vec![rank],
            url,
            mobile_url,
        }
    }

    pub fn fold_sighting(
        &mut self,
        time_label: &str,
        rank: u32,
        url: Option<&str>,
        mobile_url: Option<&str>,
    ) {
        self.last_time = time_label.to_string();
        self.occurrences += 1;
        if !self.ranks.contains(&rank) {
            self.ranks.push(rank);
        }
        if self.url.is_none() {
            self.url = url.filter(|s| !s.is_empty()).map(str::to_string);
        }
        if self.mobile_url.is_none() {
            self.mobile_url = mobile_url.filter(|s| !s.is_empty()).map(str::to_string);
        }
    }

    /// Display string for the observation window: "<first> ~ <last>", or just
    /// the single label when the title was only ever seen once that day.
    pub fn time_span(&self) -> String {
        if self.first_time == self.last_time {
            self.first_time.clone()
        } else {
            format!("{} ~ {}", self.first_time, self.last_time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_dedups_titles_and_ranks() {
        let mut snap = SourceSnapshot::new("soccer", "足球频道", "09时05分");
        snap.record("甲", 1, Some("https://a"), None);
        snap.record("乙", 2, None, None);
        snap.record("甲", 7, Some("https://ignored"), Some("https://m"));
        snap.record("甲", 7, None, None);

        assert_eq!(snap.titles.len(), 2);
        let rec = snap.get("甲").unwrap();
        assert_eq!(rec.ranks, vec![1, 7]);
        assert_eq!(rec.url.as_deref(), Some("https://a"));
        // url/mobile stick from the first sighting of the title
        assert_eq!(rec.mobile_url, None);
        assert_eq!(rec.min_rank(), Some(1));
    }

    #[test]
    fn aggregated_fold_tracks_span_and_occurrences() {
        let mut info = AggregatedTitleInfo::first_sighting("09时00分", 3, None, None);
        info.fold_sighting("10时00分", 3, Some("https://u"), None);
        info.fold_sighting("11时30分", 7, None, None);

        assert_eq!(info.occurrences, 3);
        assert_eq!(info.ranks, vec![3, 7]);
        assert_eq!(info.first_time, "09时00分");
        assert_eq!(info.last_time, "11时30分");
        assert_eq!(info.url.as_deref(), Some("https://u"));
        assert_eq!(info.time_span(), "09时00分 ~ 11时30分");

        let single = AggregatedTitleInfo::first_sighting("09时00分", 1, None, None);
        assert_eq!(single.time_span(), "09时00分");
    }
}
