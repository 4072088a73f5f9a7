//! SnapshotAggregator — fold a chronological day of decoded snapshots into
//! one history per source.
//!
//! The fold is left-to-right over (time label, snapshot) pairs; each physical
//! snapshot must be passed exactly once (re-folding the same snapshot double
//! counts occurrences). Histories are keyed by display alias because legacy
//! files only persisted the alias; resolve_ids() recovers the id-keyed view
//! and surfaces orphaned aliases instead of dropping them.

use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::codec::DecodedSnapshot;
use crate::model::AggregatedTitleInfo;

/// title -> merged day-level info, for one source.
pub type TitleHistory = BTreeMap<String, AggregatedTitleInfo>;

/// Result of aggregating one day, keyed by display alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedDay {
    pub by_alias: BTreeMap<String, TitleHistory>,
    /// alias -> source id, collected from snapshot headers that carry one.
    /// First sighting wins; a conflicting later id is logged and ignored.
    pub alias_ids: BTreeMap<String, String>,
}

impl AggregatedDay {
    pub fn history(&self, alias: &str) -> Option<&TitleHistory> {
        self.by_alias.get(alias)
    }

    pub fn info(&self, alias: &str, title: &str) -> Option<&AggregatedTitleInfo> {
        self.by_alias.get(alias).and_then(|h| h.get(title))
    }
}

/// Id-keyed view of an aggregated day plus the aliases that could not be
/// resolved to any id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedDay {
    pub by_id: BTreeMap<String, TitleHistory>,
    /// Aliases with no embedded id and no match in the live alias table.
    /// Explicitly surfaced: their histories exist but are excluded from
    /// by_id, and callers must not silently merge them elsewhere.
    pub orphaned: Vec<String>,
}

/// Fold an ordered day of snapshots into per-source title histories.
pub fn aggregate(snapshots: &[(String, DecodedSnapshot)]) -> AggregatedDay {
    let mut day = AggregatedDay::default();
    for (time_label, snapshot) in snapshots {
        fold_snapshot(&mut day, time_label, snapshot);
    }
    day
}

/// Fold one more snapshot into an existing day. Associative over a
/// chronological sequence, but NOT idempotent: folding the same physical
/// snapshot twice double counts occurrences.
pub fn fold_snapshot(day: &mut AggregatedDay, time_label: &str, snapshot: &DecodedSnapshot) {
    for section in &snapshot.sections {
        if let Some(id) = &section.source_id {
            match day.alias_ids.get(&section.alias) {
                None => {
                    day.alias_ids.insert(section.alias.clone(), id.clone());
                }
                Some(prev) if prev != id => {
                    warn!(
                        "aggregate: alias {:?} maps to both id {:?} and {:?}; keeping the first",
                        section.alias, prev, id
                    );
                }
                Some(_) => {}
            }
        }

        let history = day.by_alias.entry(section.alias.clone()).or_default();
        for parsed in &section.titles {
            match history.get_mut(&parsed.title) {
                Some(info) => info.fold_sighting(
                    time_label,
                    parsed.rank,
                    parsed.url.as_deref(),
                    parsed.mobile_url.as_deref(),
                ),
                None => {
                    history.insert(
                        parsed.title.clone(),
                        AggregatedTitleInfo::first_sighting(
                            time_label,
                            parsed.rank,
                            parsed.url.clone(),
                            parsed.mobile_url.clone(),
                        ),
                    );
                }
            }
        }
    }
}

/// Recover the id-keyed view of a day. Embedded header ids win; the live
/// id -> alias table is the fallback for legacy alias-only files. An alias
/// no id maps to ends up in `orphaned` (and is logged), never merged away.
pub fn resolve_ids(day: &AggregatedDay, live: &BTreeMap<String, String>) -> ResolvedDay {
    let mut resolved = ResolvedDay::default();

    for (alias, history) in &day.by_alias {
        let id = day.alias_ids.get(alias).cloned().or_else(|| {
            live.iter()
                .find(|(_, live_alias)| *live_alias == alias)
                .map(|(id, _)| id.clone())
        });

        match id {
            Some(id) => {
                resolved.by_id.insert(id, history.clone());
            }
            None => {
                warn!(
                    "aggregate: alias {:?} has no source id in headers or the live table; \
                     its history is orphaned",
                    alias
                );
                resolved.orphaned.push(alias.clone());
            }
        }
    }

    resolved
}
