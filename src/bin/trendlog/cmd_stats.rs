use anyhow::Result;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;

use trendlog::stats::FrequencyStat;
use trendlog::{aggregate, detect, report, stats};
use trendlog::rules::RuleSet;

use crate::util::{resolve_config, resolve_store};

#[derive(Serialize)]
struct StatsOutput<'a> {
    total_titles: usize,
    stats: &'a [FrequencyStat],
    orphaned_aliases: &'a [String],
}

pub fn exec(
    root: Option<PathBuf>,
    rules: PathBuf,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let cfg = resolve_config(root);
    let rule_set = RuleSet::load(&rules)?;
    let store = resolve_store(&cfg, date.as_deref());

    let snapshots = store.list_chronological()?;
    let Some((label, latest)) = snapshots.last() else {
        println!("no snapshots for {}", store.date_folder());
        return Ok(());
    };

    let day = aggregate::aggregate(&snapshots);
    let new_titles = detect::detect_new(&snapshots);
    let batch = latest.to_batch(label);

    // Surface alias histories no live id maps to instead of dropping them.
    let resolved = aggregate::resolve_ids(&day, &batch.alias_map());
    if !resolved.orphaned.is_empty() {
        warn!(
            "stats: {} orphaned alias histor(ies): {}",
            resolved.orphaned.len(),
            resolved.orphaned.join(", ")
        );
    }

    let (frequency, total) =
        stats::compute_stats(&batch, &rule_set, Some(&day), Some(&new_titles), &cfg);

    if json {
        let out = StatsOutput {
            total_titles: total,
            stats: &frequency,
            orphaned_aliases: &resolved.orphaned,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", report::render_text(&frequency, total, &batch.failures, &cfg));
    if !resolved.orphaned.is_empty() {
        println!();
        println!("orphaned aliases (no live source id): {}", resolved.orphaned.join(", "));
    }
    Ok(())
}
