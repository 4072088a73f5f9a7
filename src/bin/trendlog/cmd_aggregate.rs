use anyhow::Result;
use std::path::PathBuf;

use trendlog::aggregate;
use trendlog::stats::rank_span;

use crate::util::{resolve_config, resolve_store};

pub fn exec(root: Option<PathBuf>, date: Option<String>, json: bool) -> Result<()> {
    let cfg = resolve_config(root);
    let store = resolve_store(&cfg, date.as_deref());

    let snapshots = store.list_chronological()?;
    let day = aggregate::aggregate(&snapshots);

    if json {
        println!("{}", serde_json::to_string_pretty(&day)?);
        return Ok(());
    }

    if day.by_alias.is_empty() {
        println!("no snapshots for {}", store.date_folder());
        return Ok(());
    }

    println!(
        "{}: {} snapshot(s), {} source(s)",
        store.date_folder(),
        snapshots.len(),
        day.by_alias.len()
    );
    for (alias, history) in &day.by_alias {
        match day.alias_ids.get(alias) {
            Some(id) => println!("{} (ID: {}) - {} title(s)", alias, id, history.len()),
            None => println!("{} - {} title(s)", alias, history.len()),
        }
        for (title, info) in history {
            let span = rank_span(&info.ranks, cfg.rank_threshold)
                .map(|s| s.render())
                .unwrap_or_else(|| "[-]".to_string());
            println!(
                "  {} {} ({}, {}次)",
                span,
                title,
                info.time_span(),
                info.occurrences
            );
        }
    }
    Ok(())
}
