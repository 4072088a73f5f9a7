//! FrequencyEngine — keyword statistics over one fetch cycle's titles,
//! annotated with the day-level aggregate and new-title flags.
//!
//! Every configured group appears in the output, zero-hit groups included,
//! so configured-but-silent rules stay visible. Ordering is descending by
//! count with a stable sort: tied groups keep their declared order.

use serde::Serialize;
use std::collections::HashSet;

use crate::aggregate::AggregatedDay;
use crate::config::Config;
use crate::detect::{self, NewTitles};
use crate::metrics;
use crate::model::FetchBatch;
use crate::rules::{MatchOutcome, RuleSet};

/// One matched title with its display metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TitleHit {
    pub title: String,
    pub source_alias: String,
    /// Merged rank list: the day aggregate's when available, else the raw
    /// per-snapshot ranks. May be empty: "no rank observed" stays explicit
    /// here and only the rendering layer picks a display for it.
    pub ranks: Vec<u32>,
    /// "<first> ~ <last>" observation window, single label when they agree,
    /// empty when no aggregate is available.
    pub time_span: String,
    pub occurrences: u32,
    pub is_new: bool,
    pub url: Option<String>,
    pub mobile_url: Option<String>,
}

/// Statistics for one configured word group.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyStat {
    pub group_key: String,
    pub count: u32,
    /// count / total titles seen × 100, rounded to 2 decimals; 0 when the
    /// total is zero or below the configured minimum.
    pub percentage: f64,
    pub titles: Vec<TitleHit>,
}

/// Compute per-group statistics for one fetch cycle.
///
/// `batch` supplies the titles (live fetch results, or the latest decoded
/// snapshot re-shaped into a batch); `aggregated` and `new_titles` are
/// optional day-level annotations. Returns the stats plus the total number
/// of (source, title) pairs seen.
pub fn compute_stats(
    batch: &FetchBatch,
    rules: &RuleSet,
    aggregated: Option<&AggregatedDay>,
    new_titles: Option<&NewTitles>,
    cfg: &Config,
) -> (Vec<FrequencyStat>, usize) {
    let mut counts = vec![0u32; rules.groups.len()];
    let mut hits: Vec<Vec<TitleHit>> = vec![Vec::new(); rules.groups.len()];
    let mut total = 0usize;
    let mut attributed: HashSet<(String, String)> = HashSet::new();

    for snap in &batch.snapshots {
        for rec in &snap.titles {
            total += 1;

            // At most one group per title per source.
            let key = (snap.alias.clone(), rec.title.clone());
            if attributed.contains(&key) {
                continue;
            }

            let idx = match rules.evaluate(&rec.title) {
                MatchOutcome::Matched(idx) => idx,
                MatchOutcome::Filtered => {
                    metrics::record_title_filtered();
                    continue;
                }
                MatchOutcome::NoMatch => continue,
            };
            metrics::record_title_matched();
            attributed.insert(key);

            let info = aggregated.and_then(|day| day.info(&snap.alias, &rec.title));
            let ranks = info
                .map(|i| i.ranks.clone())
                .unwrap_or_else(|| rec.ranks.clone());

            counts[idx] += 1;
            hits[idx].push(TitleHit {
                title: rec.title.clone(),
                source_alias: snap.alias.clone(),
                ranks,
                time_span: info.map(|i| i.time_span()).unwrap_or_default(),
                occurrences: info.map(|i| i.occurrences).unwrap_or(1),
                is_new: new_titles.map_or(false, |n| detect::is_new(n, &snap.alias, &rec.title)),
                url: rec.url.clone(),
                mobile_url: rec.mobile_url.clone(),
            });
        }
    }

    let mut stats: Vec<FrequencyStat> = rules
        .groups
        .iter()
        .zip(counts.iter().zip(hits.into_iter()))
        .map(|(group, (&count, titles))| FrequencyStat {
            group_key: group.group_key.clone(),
            count,
            percentage: percentage(count, total, cfg.min_titles_for_percentage),
            titles,
        })
        .collect();

    // Stable: tied counts retain declared group order.
    stats.sort_by(|a, b| b.count.cmp(&a.count));

    (stats, total)
}

fn percentage(count: u32, total: usize, min_total: usize) -> f64 {
    if total == 0 || total < min_total {
        return 0.0;
    }
    let pct = count as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

// ----- Rank span (shared formatting contract for renderers) -----

/// Min/max over the deduplicated rank set, plus the highlight decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankSpan {
    pub min: u32,
    pub max: u32,
    pub highlighted: bool,
}

impl RankSpan {
    /// "[min]" for a single value, "[min - max]" for a range.
    pub fn render(&self) -> String {
        if self.min == self.max {
            format!("[{}]", self.min)
        } else {
            format!("[{} - {}]", self.min, self.max)
        }
    }
}

/// None for an empty rank list; the caller decides how to display
/// "no rank observed".
pub fn rank_span(ranks: &[u32], threshold: u32) -> Option<RankSpan> {
    let min = ranks.iter().copied().min()?;
    let max = ranks.iter().copied().max()?;
    Some(RankSpan {
        min,
        max,
        highlighted: min <= threshold,
    })
}
